use clap::{Args, Subcommand};

use crate::config::{load_config, mask, save_config, Profile};
use crate::output::{header, kv};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Create or update the selected profile
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        timeout_secs: Option<u64>,
        /// Default workspace ref
        #[arg(long)]
        workspace: Option<String>,
        /// Default project ref
        #[arg(long)]
        project: Option<String>,
    },
    /// Show the selected profile
    Show,
    /// List configured profiles
    List,
}

pub fn run(args: ConfigArgs, profile: &str) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Set {
            api_key,
            base_url,
            timeout_secs,
            workspace,
            project,
        } => {
            let mut config = load_config();
            let entry = config
                .profiles
                .entry(profile.to_string())
                .or_insert_with(Profile::default);
            if let Some(key) = api_key {
                entry.api_key = key;
            }
            if let Some(url) = base_url {
                entry.base_url = url;
            }
            if timeout_secs.is_some() {
                entry.timeout_secs = timeout_secs;
            }
            if workspace.is_some() {
                entry.workspace = workspace;
            }
            if project.is_some() {
                entry.project = project;
            }
            save_config(&config)?;
            println!("Saved profile '{profile}'");
        }
        ConfigCommand::Show => {
            let config = load_config();
            let entry = config
                .profiles
                .get(profile)
                .ok_or_else(|| anyhow::anyhow!("profile '{}' not found", profile))?;
            println!("{}", header(profile));
            println!("{}", kv("base url", &entry.base_url));
            println!("{}", kv("api key", &mask(&entry.api_key)));
            if let Some(timeout) = entry.timeout_secs {
                println!("{}", kv("timeout", &format!("{timeout}s")));
            }
            println!("{}", kv("workspace", entry.workspace.as_deref().unwrap_or("-")));
            println!("{}", kv("project", entry.project.as_deref().unwrap_or("-")));
        }
        ConfigCommand::List => {
            let config = load_config();
            if config.profiles.is_empty() {
                println!("No profiles configured.");
            } else {
                for (name, entry) in &config.profiles {
                    println!("{name} {}", entry.base_url);
                }
            }
        }
    }
    Ok(())
}
