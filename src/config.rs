use std::path::PathBuf;
use std::time::Duration;

pub const QUOTES_ENDPOINT: &str = "https://pro-api.coinmarketcap.com/v1/cryptocurrency/quotes/latest";
pub const API_KEY_VAR: &str = "API_KEY";
pub const DEFAULT_SYMBOL: &str = "XRP";
pub const DEFAULT_CONVERT: &str = "CAD";
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Absent key is not an error here; the API rejects the request instead.
    pub api_key: Option<String>,
    pub endpoint: String,
    pub symbol: String,
    pub convert: String,
    pub refresh_interval: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            endpoint: QUOTES_ENDPOINT.to_string(),
            symbol: DEFAULT_SYMBOL.to_string(),
            convert: DEFAULT_CONVERT.to_string(),
            refresh_interval: REFRESH_INTERVAL,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self {
            api_key: std::env::var(API_KEY_VAR)
                .ok()
                .filter(|key| !key.trim().is_empty()),
            ..Self::default()
        }
    }
}

pub fn log_path() -> PathBuf {
    std::env::current_dir()
        .unwrap_or_else(|_| PathBuf::from("."))
        .join("xrp-ticker.log")
}
