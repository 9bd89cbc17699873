use std::net::SocketAddr;

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
    /// Lifetime of a cached aggregate response, in seconds.
    pub cache_ttl_secs: u64,
    /// Per-request timeout for vendor fetches. The upstream design had no
    /// timeout at all; a bounded one is a deliberate hardening addition.
    pub request_timeout_secs: u64,
    pub user_agent: String,
}
