use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use standup_rally::config::{DEFAULT_BASE_URL, DEFAULT_TIMEOUT_SECS};
use standup_rally::RallyConfig;

#[derive(serde::Serialize, serde::Deserialize, Default, Clone, Debug, PartialEq)]
pub struct StandupConfig {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

#[derive(serde::Serialize, serde::Deserialize, Clone, Debug, PartialEq)]
pub struct Profile {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default)]
    pub workspace: Option<String>,
    #[serde(default)]
    pub project: Option<String>,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key: String::new(),
            timeout_secs: None,
            workspace: None,
            project: None,
        }
    }
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

/// Everything a command needs to talk to Rally, built once per invocation.
#[derive(Debug, Clone)]
pub struct Connection {
    pub rally: RallyConfig,
    pub workspace: Option<String>,
    pub project: Option<String>,
}

impl Connection {
    /// Command-line scope wins over the profile's defaults.
    pub fn scope(
        &self,
        workspace: Option<String>,
        project: Option<String>,
    ) -> anyhow::Result<standup_core::Scope> {
        let workspace = workspace
            .or_else(|| self.workspace.clone())
            .filter(|w| !w.trim().is_empty())
            .ok_or_else(|| {
                anyhow::anyhow!("workspace is required; pass --workspace or set it in the profile")
            })?;
        Ok(standup_core::Scope::new(
            workspace,
            project.or_else(|| self.project.clone()),
        ))
    }
}

fn home_dir() -> anyhow::Result<PathBuf> {
    dirs::home_dir().ok_or_else(|| anyhow::anyhow!("could not find home directory"))
}

pub fn config_path() -> anyhow::Result<PathBuf> {
    Ok(home_dir()?.join(".standup").join("config.toml"))
}

pub fn load_config() -> StandupConfig {
    match config_path() {
        Ok(path) => load_config_from(&path),
        Err(_) => StandupConfig::default(),
    }
}

/// A missing or unreadable file yields the empty configuration.
pub fn load_config_from(path: &Path) -> StandupConfig {
    if path.exists() {
        if let Ok(content) = std::fs::read_to_string(path) {
            if let Ok(config) = toml::from_str(&content) {
                return config;
            }
        }
    }
    StandupConfig::default()
}

pub fn save_config(config: &StandupConfig) -> anyhow::Result<()> {
    save_config_to(&config_path()?, config)
}

pub fn save_config_to(path: &Path, config: &StandupConfig) -> anyhow::Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    std::fs::write(path, content)?;
    Ok(())
}

/// Merge the named profile with `RALLY_*` environment overrides.
pub fn resolve_connection(
    config: &StandupConfig,
    profile: &str,
    env: impl Fn(&str) -> Option<String>,
) -> anyhow::Result<Connection> {
    let base = config.profiles.get(profile).cloned().unwrap_or_default();

    let api_key = env("RALLY_API_KEY")
        .filter(|k| !k.is_empty())
        .unwrap_or(base.api_key);
    if api_key.is_empty() {
        anyhow::bail!(
            "no API key for profile '{profile}'; run `standup config set --api-key <key> --profile {profile}` or set RALLY_API_KEY"
        );
    }

    let base_url = env("RALLY_BASE_URL")
        .filter(|u| !u.is_empty())
        .unwrap_or(base.base_url);

    let timeout_secs = match env("RALLY_TIMEOUT_SECS") {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map_err(|_| anyhow::anyhow!("RALLY_TIMEOUT_SECS must be an integer, got '{raw}'"))?,
        None => base.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
    };

    Ok(Connection {
        rally: RallyConfig::new(api_key)
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(timeout_secs)),
        workspace: base.workspace,
        project: base.project,
    })
}

/// Resolve the named profile against the user's config file and process
/// environment.
pub fn connection(profile: &str) -> anyhow::Result<Connection> {
    resolve_connection(&load_config(), profile, |key| std::env::var(key).ok())
}

pub fn mask(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    if chars.len() > 10 {
        let head: String = chars[..4].iter().collect();
        let tail: String = chars[chars.len() - 4..].iter().collect();
        format!("{head}…{tail}")
    } else {
        "*".repeat(chars.len())
    }
}
