//! GSR websocket authentication settings.

use std::fmt;

use ea_core::config::{env_duration_ms, env_or, env_var, DEFAULT_TIMEOUT_MS};
use ea_core::{HttpOptions, Result};

/// Adapter name used in logs and upstream errors.
pub const NAME: &str = "GSR";

/// Default REST endpoint hosting `/token`.
pub const DEFAULT_API_ENDPOINT: &str = "https://oracle.prod.rest.gsr.io/v1";

/// Credentials and endpoint for token requests.
#[derive(Clone)]
pub struct GsrSettings {
    pub user_id: String,
    pub public_key: String,
    pub private_key: String,
    pub http: HttpOptions,
}

impl GsrSettings {
    pub fn new(
        user_id: impl Into<String>,
        public_key: impl Into<String>,
        private_key: impl Into<String>,
        http: HttpOptions,
    ) -> Self {
        Self {
            user_id: user_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
            http,
        }
    }

    /// Load from `WS_USER_ID`, `WS_PUBLIC_KEY`, `WS_PRIVATE_KEY`,
    /// `API_ENDPOINT` and `REQUEST_TIMEOUT_MS`.
    pub fn from_env() -> Result<Self> {
        let user_id = env_var("WS_USER_ID")?;
        let public_key = env_var("WS_PUBLIC_KEY")?;
        let private_key = env_var("WS_PRIVATE_KEY")?;
        let base_url = env_or("API_ENDPOINT", DEFAULT_API_ENDPOINT);
        let timeout = env_duration_ms("REQUEST_TIMEOUT_MS", DEFAULT_TIMEOUT_MS)?;

        Ok(Self::new(
            user_id,
            public_key,
            private_key,
            HttpOptions::new(&base_url, timeout),
        ))
    }
}

impl fmt::Debug for GsrSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GsrSettings")
            .field("user_id", &self.user_id)
            .field("public_key", &self.public_key)
            .field("private_key", &"<redacted>")
            .field("http", &self.http)
            .finish()
    }
}
