//! Wires the Finage client and override table into a callable adapter.

use std::sync::Arc;

use ea_core::{AdapterRequest, AdapterResponse, Result, SymbolOverrides};

use crate::client::{FinageApi, FinageClient};
use crate::config::FinageConfig;
use crate::endpoint::forex;

/// The Finage adapter with its upstream client and symbol overrides injected.
#[derive(Clone)]
pub struct FinageAdapter {
    api: Arc<dyn FinageApi>,
    overrides: Arc<SymbolOverrides>,
}

impl FinageAdapter {
    pub fn new(api: Arc<dyn FinageApi>, overrides: Arc<SymbolOverrides>) -> Self {
        Self { api, overrides }
    }

    /// Build an adapter backed by the real Finage REST API.
    pub fn from_config(config: &FinageConfig, overrides: Arc<SymbolOverrides>) -> Result<Self> {
        let client = FinageClient::new(config)?;
        Ok(Self::new(Arc::new(client), overrides))
    }

    /// Run the `forex` endpoint for one request.
    pub async fn forex(&self, request: &AdapterRequest) -> Result<AdapterResponse> {
        forex::execute(self.api.as_ref(), &self.overrides, request).await
    }
}
