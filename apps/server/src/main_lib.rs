use std::sync::Arc;
use std::time::Duration;

use ea_core::SymbolOverrides;
use ea_finage::{bundled_overrides, FinageAdapter, FinageConfig};
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter, Layer};

use crate::config::{Config, LogFormat};

pub struct AppState {
    pub finage: FinageAdapter,
    /// Deadline for one adapter call, upstream round trip included.
    pub request_timeout: Duration,
}

/// Install the global subscriber. `log` records from the adapter crates are
/// forwarded into it.
pub fn init_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let output = match format {
        LogFormat::Json => fmt::layer()
            .json()
            .flatten_event(true)
            .with_current_span(false)
            .boxed(),
        LogFormat::Text => fmt::layer().compact().with_target(true).boxed(),
    };

    tracing_subscriber::registry().with(filter).with(output).init();
}

/// Load the override table once; it is shared read-only by every request.
pub fn load_overrides(config: &Config) -> anyhow::Result<SymbolOverrides> {
    let overrides = match &config.symbol_overrides_path {
        Some(path) => {
            tracing::info!("Loading symbol overrides from {}", path.display());
            SymbolOverrides::load(path)?
        }
        None => bundled_overrides()?,
    };
    if overrides.is_empty() {
        tracing::warn!("Symbol override table is empty; symbols pass through unchanged");
    }
    Ok(overrides)
}

pub fn build_state(config: &Config) -> anyhow::Result<Arc<AppState>> {
    let overrides = Arc::new(load_overrides(config)?);
    let finage_config = FinageConfig::from_env()?;
    tracing::info!("Finage endpoint: {}", finage_config.http.base_url);

    let finage = FinageAdapter::from_config(&finage_config, overrides)?;
    Ok(Arc::new(AppState {
        finage,
        request_timeout: config.request_timeout,
    }))
}
