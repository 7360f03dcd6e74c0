use std::net::SocketAddr;

/// Browser-identifying user agent sent to upstream retailers by default.
///
/// Several of the storefronts serve a bot challenge page to non-browser
/// agents, so the default mimics desktop Chrome.
pub const DEFAULT_SCRAPER_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

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

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Per upstream request timeout, covering connect through body read.
    pub scraper_request_timeout_secs: u64,
    /// Redirects followed per upstream request before giving up.
    pub scraper_max_redirects: usize,
    pub scraper_user_agent: String,
}
