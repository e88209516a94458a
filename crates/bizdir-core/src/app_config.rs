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
    pub log_level: String,
    /// API key for the forward-geocoding provider. Optional so record
    /// search still works in deployments without address suggestions.
    pub geocode_api_key: Option<String>,
    pub geocode_base_url: String,
    pub geocode_timeout_secs: u64,
    /// Maximum candidates requested per suggestion lookup.
    pub suggestion_limit: usize,
    /// ISO country code restriction passed to the provider.
    pub suggestion_country_code: String,
    /// Minimum trimmed input length before a lookup is dispatched.
    pub suggestion_min_query_len: usize,
    /// Records file consumed by the CLI's file-backed feed.
    pub records_path: PathBuf,
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("log_level", &self.log_level)
            .field(
                "geocode_api_key",
                &self.geocode_api_key.as_ref().map(|_| "[redacted]"),
            )
            .field("geocode_base_url", &self.geocode_base_url)
            .field("geocode_timeout_secs", &self.geocode_timeout_secs)
            .field("suggestion_limit", &self.suggestion_limit)
            .field("suggestion_country_code", &self.suggestion_country_code)
            .field("suggestion_min_query_len", &self.suggestion_min_query_len)
            .field("records_path", &self.records_path)
            .finish()
    }
}
