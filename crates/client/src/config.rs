//! Client configuration.

use std::time::Duration;

/// Public deployment of the catalog API.
pub const DEFAULT_API_URL: &str = "https://api.potterdb.com";

/// Environment variable overriding the API base URL.
pub const API_URL_ENV: &str = "LOREBOOK_API_URL";

/// Settings for the HTTP adapter and the favorites store.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog API, without the `/v1` prefix.
    pub base_url: String,
    /// Per-request timeout for the HTTP adapter.
    pub request_timeout: Duration,
    /// Debounce window for coalescing favorites writes.
    pub favorites_debounce: Duration,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_API_URL.to_string(),
            request_timeout: Duration::from_secs(30),
            favorites_debounce: Duration::from_millis(1000),
        }
    }
}

impl ClientConfig {
    /// Defaults with the base URL taken from `LOREBOOK_API_URL` when set.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                config.base_url = url;
            }
        }
        config
    }
}
