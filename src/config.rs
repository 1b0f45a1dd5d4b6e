//! Runtime configuration: backend URL, session file and request timeout

use std::path::PathBuf;
use std::time::Duration;

use crate::error::{ApiError, ApiResult};

/// Environment variable holding the backend base URL
pub const API_URL_ENV: &str = "CHEESE_API_URL";
pub const DEFAULT_API_URL: &str = "http://localhost:3000";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
    pub session_path: PathBuf,
    pub timeout: Duration,
}

/// Returns the default session path: ~/.local/share/cheese_inventory/session.json
pub fn default_session_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("cheese_inventory")
        .join("session.json")
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            session_path: default_session_path(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Defaults, with the base URL taken from `CHEESE_API_URL` when set
    pub fn from_env() -> ApiResult<Self> {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            config.api_url = normalize_url(&url)?;
        }
        Ok(config)
    }

    pub fn with_api_url(mut self, url: &str) -> ApiResult<Self> {
        self.api_url = normalize_url(url)?;
        Ok(self)
    }

    pub fn with_session_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.session_path = path.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }
}

fn normalize_url(raw: &str) -> ApiResult<String> {
    let url = raw.trim().trim_end_matches('/');
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(url.to_string())
    } else {
        Err(ApiError::Config(format!(
            "API URL must start with http:// or https:// (got {raw:?})"
        )))
    }
}
