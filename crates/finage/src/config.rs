//! Finage adapter configuration.

use std::fmt;

use ea_core::config::{env_duration_ms, env_or, env_var, DEFAULT_TIMEOUT_MS};
use ea_core::{HttpOptions, Result, SymbolOverrides};

/// Adapter name, also the namespace for symbol overrides.
pub const NAME: &str = "FINAGE";

/// Default REST endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://api.finage.co.uk";

const BUNDLED_OVERRIDES: &str = include_str!("../symbols.json");

/// Settings for the Finage REST API.
#[derive(Clone)]
pub struct FinageConfig {
    pub api_key: String,
    pub http: HttpOptions,
}

impl FinageConfig {
    pub fn new(api_key: impl Into<String>, http: HttpOptions) -> Self {
        Self {
            api_key: api_key.into(),
            http,
        }
    }

    /// Load from `API_KEY`, `API_ENDPOINT` and `REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let api_key = env_var("API_KEY")?;
        let base_url = env_or("API_ENDPOINT", DEFAULT_API_ENDPOINT);
        let timeout = env_duration_ms("REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;
        Ok(Self::new(api_key, HttpOptions::new(&base_url, timeout)))
    }
}

impl fmt::Debug for FinageConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinageConfig")
            .field("api_key", &"<redacted>")
            .field("http", &self.http)
            .finish()
    }
}

/// The symbol override table shipped with the adapter.
pub fn bundled_overrides() -> Result<SymbolOverrides> {
    SymbolOverrides::from_json_str(BUNDLED_OVERRIDES)
}
