//! Access-token acquisition for the websocket client.
//!
//! One signed POST to `{api_endpoint}/token` per call. The websocket session
//! manager owns retry and refresh; nothing here is cached.

use std::fmt;

use ea_core::{AdapterError, Requester, Result};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};

use crate::config::{GsrSettings, NAME};
use crate::signature::{current_time_nanos, generate_signature};

/// Body of the token request.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignedTokenRequest {
    pub api_key: String,
    pub user_id: String,
    pub ts: i64,
    pub signature: String,
}

impl SignedTokenRequest {
    /// Sign a request for `settings` at `ts` nanoseconds.
    pub fn sign(settings: &GsrSettings, ts: i64) -> Result<Self> {
        let signature = generate_signature(
            &settings.user_id,
            &settings.public_key,
            &settings.private_key,
            ts,
        )?;

        Ok(Self {
            api_key: settings.public_key.clone(),
            user_id: settings.user_id.clone(),
            ts,
            signature,
        })
    }
}

/// Wire shape of the token response; `success` selects the variant.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawTokenResponse {
    success: bool,
    #[serde(default)]
    ts: Option<i64>,
    #[serde(default)]
    token: Option<String>,
    #[serde(default)]
    valid_until: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

/// Outcome reported by the token endpoint.
#[derive(Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawTokenResponse")]
pub enum AccessTokenResponse {
    Success(AccessToken),
    Failure { error: String, ts: Option<i64> },
}

impl TryFrom<RawTokenResponse> for AccessTokenResponse {
    type Error = String;

    fn try_from(raw: RawTokenResponse) -> std::result::Result<Self, Self::Error> {
        if !raw.success {
            return Ok(Self::Failure {
                error: raw
                    .error
                    .unwrap_or_else(|| "Unable to get access token".to_string()),
                ts: raw.ts,
            });
        }

        let token = raw
            .token
            .ok_or_else(|| "successful response is missing token".to_string())?;
        let valid_until = raw
            .valid_until
            .ok_or_else(|| "successful response is missing validUntil".to_string())?;

        Ok(Self::Success(AccessToken {
            token,
            valid_until,
            ts: raw.ts,
        }))
    }
}

/// A bearer token for the websocket session.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    pub token: String,
    /// Expiry as reported upstream.
    pub valid_until: String,
    pub ts: Option<i64>,
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token", &"<redacted>")
            .field("valid_until", &self.valid_until)
            .field("ts", &self.ts)
            .finish()
    }
}

impl fmt::Debug for AccessTokenResponse {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Success(token) => f.debug_tuple("Success").field(token).finish(),
            Self::Failure { error, ts } => f
                .debug_struct("Failure")
                .field("error", error)
                .field("ts", ts)
                .finish(),
        }
    }
}

/// Fetches signed access tokens.
#[derive(Clone)]
pub struct TokenClient {
    requester: Requester,
    settings: GsrSettings,
    token_url: String,
}

impl TokenClient {
    pub fn new(settings: GsrSettings) -> Result<Self> {
        let client = settings.http.build_client()?;
        let token_url = settings.http.url("/token");

        Ok(Self {
            requester: Requester::new(client, NAME),
            settings,
            token_url,
        })
    }

    /// Fetch a token and return only the bearer string.
    pub async fn get_token(&self) -> Result<String> {
        Ok(self.fetch_access_token().await?.token)
    }

    /// Fetch a token signed with the current time.
    pub async fn fetch_access_token(&self) -> Result<AccessToken> {
        self.fetch_access_token_at(current_time_nanos()).await
    }

    /// Fetch a token signed with an explicit nanosecond timestamp.
    pub async fn fetch_access_token_at(&self, ts: i64) -> Result<AccessToken> {
        debug!("Fetching new access token");

        self.request_token(ts).await.inspect_err(|e| {
            error!("Unable to get access token: {}", e);
        })
    }

    async fn request_token(&self, ts: i64) -> Result<AccessToken> {
        let request = SignedTokenRequest::sign(&self.settings, ts)?;
        let response = self.requester.post_json(&self.token_url, &request).await?;
        let status = response.status;
        if !response.is_success() {
            warn!("Token endpoint responded with status {}", status);
        }

        let outcome: AccessTokenResponse =
            serde_json::from_value(response.body).map_err(|e| {
                AdapterError::upstream_status(
                    NAME,
                    status,
                    format!("Unexpected token response: {}", e),
                )
            })?;

        match outcome {
            AccessTokenResponse::Success(token) => Ok(token),
            AccessTokenResponse::Failure { error, .. } => Err(AdapterError::AuthFailure(error)),
        }
    }
}
