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

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    /// Base64-encoded HMAC secret shared with the token issuer.
    pub jwt_secret: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub inference_url: String,
    pub inference_timeout_secs: u64,
    /// Model requested for ad-hoc analysis and session processing.
    pub default_model: String,
    /// Model whose stored results feed summaries and rankings.
    pub report_model: String,
    pub positive_share_cutoff: f64,
    pub negative_share_cutoff: f64,
    pub ranking_min_posts: usize,
    pub rate_limit_per_minute: usize,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("jwt_secret", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("inference_url", &self.inference_url)
            .field("inference_timeout_secs", &self.inference_timeout_secs)
            .field("default_model", &self.default_model)
            .field("report_model", &self.report_model)
            .field("positive_share_cutoff", &self.positive_share_cutoff)
            .field("negative_share_cutoff", &self.negative_share_cutoff)
            .field("ranking_min_posts", &self.ranking_min_posts)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
