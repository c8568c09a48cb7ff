use std::net::SocketAddr;
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub targets_path: PathBuf,
    /// Optional YAML override for the built-in category dictionary.
    pub categories_path: Option<PathBuf>,
    pub http_timeout_secs: u64,
    pub user_agent: String,
    /// Maximum posts/videos fetched per platform profile.
    pub media_limit: u32,
    pub max_concurrent_targets: usize,
    pub instagram_access_token: Option<String>,
    pub instagram_base_url: Option<String>,
    pub youtube_api_key: Option<String>,
    pub youtube_base_url: Option<String>,
    pub linkedin_access_token: Option<String>,
    pub linkedin_base_url: Option<String>,
    pub registry_url: Option<String>,
    pub registry_api_key: Option<String>,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("targets_path", &self.targets_path)
            .field("categories_path", &self.categories_path)
            .field("http_timeout_secs", &self.http_timeout_secs)
            .field("user_agent", &self.user_agent)
            .field("media_limit", &self.media_limit)
            .field("max_concurrent_targets", &self.max_concurrent_targets)
            .field(
                "instagram_access_token",
                &self.instagram_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("instagram_base_url", &self.instagram_base_url)
            .field(
                "youtube_api_key",
                &self.youtube_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("youtube_base_url", &self.youtube_base_url)
            .field(
                "linkedin_access_token",
                &self.linkedin_access_token.as_ref().map(|_| "[redacted]"),
            )
            .field("linkedin_base_url", &self.linkedin_base_url)
            .field("registry_url", &self.registry_url)
            .field(
                "registry_api_key",
                &self.registry_api_key.as_ref().map(|_| "[redacted]"),
            )
            .finish()
    }
}
