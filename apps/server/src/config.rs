use std::{net::SocketAddr, path::PathBuf, time::Duration};

use anyhow::Context;

/// Output format of the tracing subscriber.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Read `EA_LOG_FORMAT`; anything other than `json` selects text.
    pub fn from_env() -> Self {
        match std::env::var("EA_LOG_FORMAT") {
            Ok(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Text,
        }
    }
}

pub struct Config {
    pub listen_addr: SocketAddr,
    /// Upper bound on one upstream round trip, enforced per request.
    pub request_timeout: Duration,
    /// Replaces the bundled symbol override table when set.
    pub symbol_overrides_path: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        let listen_addr: SocketAddr = std::env::var("EA_LISTEN_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:8080".to_string())
            .parse()
            .context("Invalid EA_LISTEN_ADDR")?;
        let timeout_ms: u64 = std::env::var("EA_REQUEST_TIMEOUT_MS")
            .unwrap_or_else(|_| "30000".into())
            .parse()
            .unwrap_or(30000);
        let symbol_overrides_path = std::env::var("EA_SYMBOL_OVERRIDES_PATH")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from);
        Ok(Self {
            listen_addr,
            request_timeout: Duration::from_millis(timeout_ms),
            symbol_overrides_path,
            log_format: LogFormat::from_env(),
        })
    }
}
