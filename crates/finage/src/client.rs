//! HTTP client for the Finage REST API.

use async_trait::async_trait;
use ea_core::{build_url_path, HttpOptions, Requester, Result};
use serde_json::Value;

use crate::config::{FinageConfig, NAME};

const LAST_FOREX_PATH: &str = "/last/forex/:from:to";

/// Upstream operations used by the adapter endpoints.
#[async_trait]
pub trait FinageApi: Send + Sync {
    /// Fetch the last forex quote for `from`/`to`, returning the raw JSON body.
    ///
    /// Expected shape: `{ "symbol": "EURUSD", "ask": 1.08, "bid": 1.07, "timestamp": 1700000000000 }`
    async fn last_forex(&self, from: &str, to: &str) -> Result<Value>;
}

/// `reqwest`-backed [`FinageApi`].
#[derive(Clone)]
pub struct FinageClient {
    requester: Requester,
    http: HttpOptions,
    api_key: String,
}

impl FinageClient {
    pub fn new(config: &FinageConfig) -> Result<Self> {
        let client = config.http.build_client()?;
        Ok(Self {
            requester: Requester::new(client, NAME),
            http: config.http.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl FinageApi for FinageClient {
    async fn last_forex(&self, from: &str, to: &str) -> Result<Value> {
        let path = build_url_path(LAST_FOREX_PATH, &[("from", from), ("to", to)]);
        let url = self.http.url(&path);
        self.requester
            .get_json(&url, &[("apikey", self.api_key.as_str())])
            .await
    }
}
