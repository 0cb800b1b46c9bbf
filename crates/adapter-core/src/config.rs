//! Environment-backed configuration helpers.

use std::time::Duration;

use crate::errors::{AdapterError, Result};

/// Default timeout for upstream requests.
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Read a required, non-empty environment variable.
pub fn env_var(key: &str) -> Result<String> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => Ok(value),
        _ => Err(AdapterError::config(format!(
            "Missing required environment variable {}",
            key
        ))),
    }
}

/// Read an environment variable, falling back to `default` when unset or empty.
pub fn env_or(key: &str, default: &str) -> String {
    std::env::var(key)
        .ok()
        .filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Read a millisecond duration, falling back to `default_ms`.
pub fn env_duration_ms(key: &str, default_ms: u64) -> Result<Duration> {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .map_err(|_| AdapterError::config(format!("{} must be a number of milliseconds", key))),
        _ => Ok(Duration::from_millis(default_ms)),
    }
}

/// Base HTTP options for one upstream.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HttpOptions {
    /// Base URL without a trailing slash.
    pub base_url: String,
    pub timeout: Duration,
}

impl HttpOptions {
    pub fn new(base_url: &str, timeout: Duration) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        }
    }

    /// Join a path onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    /// Build a `reqwest` client with this timeout.
    pub fn build_client(&self) -> Result<reqwest::Client> {
        reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|e| AdapterError::config(format!("Failed to initialize HTTP client: {}", e)))
    }
}
