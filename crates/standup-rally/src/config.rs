use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://rally1.rallydev.com";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const WSAPI_PATH: &str = "/slm/webservice/v2.0";

/// Connection settings for the Rally Web Services API.
#[derive(Debug, Clone)]
pub struct RallyConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl RallyConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn endpoint(&self, suffix: &str) -> String {
        format!("{}{}{}", self.base_url.trim_end_matches('/'), WSAPI_PATH, suffix)
    }

    pub fn artifact_endpoint(&self) -> String {
        self.endpoint("/Artifact")
    }

    pub fn conversation_post_endpoint(&self) -> String {
        self.endpoint("/conversationpost")
    }
}
