//! Application settings configuration.

use serde::{Deserialize, Serialize};

/// Base URL of the public user directory.
pub const DEFAULT_API_BASE_URL: &str = "https://jsonplaceholder.typicode.com";

/// Application-wide settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Base URL of the user directory API.
    pub api_base_url: String,
    /// Per-request timeout in seconds.
    pub request_timeout_secs: u64,
    /// Event loop tick rate in milliseconds.
    pub tick_rate_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: 30,
            tick_rate_ms: 100,
        }
    }
}
