//! Outbound HTTP helpers shared by adapters.
//!
//! [`Requester`] wraps a `reqwest::Client` and maps every failure onto
//! [`AdapterError::Upstream`]. It performs exactly one request per call; retry
//! and backoff are left to the caller.

use log::debug;
use serde::Serialize;
use serde_json::Value;

use crate::errors::{AdapterError, Result};

/// Longest slice of an error body carried into an error message.
const MAX_ERROR_BODY: usize = 256;

/// Status and decoded JSON body of an upstream response.
#[derive(Clone, Debug)]
pub struct UpstreamResponse {
    pub status: u16,
    pub body: Value,
}

impl UpstreamResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Single-shot JSON client for one upstream provider.
#[derive(Debug, Clone)]
pub struct Requester {
    client: reqwest::Client,
    provider: &'static str,
}

impl Requester {
    pub fn new(client: reqwest::Client, provider: &'static str) -> Self {
        Self { client, provider }
    }

    /// GET `url` with `query` and return the JSON body of a 2xx response.
    ///
    /// The query is never logged since it usually carries an API key.
    pub async fn get_json(&self, url: &str, query: &[(&str, &str)]) -> Result<Value> {
        debug!("{} GET {}", self.provider, url);

        let response = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| AdapterError::transport(self.provider, e))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| AdapterError::transport(self.provider, e))?;

        if !status.is_success() {
            return Err(AdapterError::upstream_status(
                self.provider,
                status.as_u16(),
                format!("Request failed with status {}: {}", status, truncate(&text)),
            ));
        }

        self.decode(status.as_u16(), &text)
    }

    /// POST `body` as JSON to `url` and decode the response body.
    ///
    /// Unlike [`get_json`](Self::get_json) the body is decoded for any status,
    /// since some upstreams describe failures in the payload.
    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        url: &str,
        body: &B,
    ) -> Result<UpstreamResponse> {
        debug!("{} POST {}", self.provider, url);

        let response = self
            .client
            .post(url)
            .json(body)
            .send()
            .await
            .map_err(|e| AdapterError::transport(self.provider, e))?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AdapterError::transport(self.provider, e))?;

        let body = self.decode(status, &text)?;
        Ok(UpstreamResponse { status, body })
    }

    fn decode(&self, status: u16, text: &str) -> Result<Value> {
        serde_json::from_str(text).map_err(|e| {
            AdapterError::upstream_status(
                self.provider,
                status,
                format!("Failed to parse response: {}", e),
            )
        })
    }
}

fn truncate(text: &str) -> &str {
    match text.char_indices().nth(MAX_ERROR_BODY) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Substitute `:name` placeholders in `template` with URL-encoded values.
///
/// Placeholders may be adjacent (`/last/forex/:from:to`). Unknown
/// placeholders are left untouched.
pub fn build_url_path(template: &str, params: &[(&str, &str)]) -> String {
    let mut path = String::with_capacity(template.len());
    let mut chars = template.chars().peekable();

    while let Some(c) = chars.next() {
        if c != ':' {
            path.push(c);
            continue;
        }

        let mut name = String::new();
        while let Some(&next) = chars.peek() {
            if next.is_ascii_alphanumeric() || next == '_' {
                name.push(next);
                chars.next();
            } else {
                break;
            }
        }

        match params.iter().find(|(key, _)| *key == name) {
            Some((_, value)) => path.push_str(&urlencoding::encode(value)),
            None => {
                path.push(':');
                path.push_str(&name);
            }
        }
    }

    path
}

/// Extract a usable number from `data` at `path`.
///
/// Accepts JSON numbers and numeric strings. Fails when the field is absent,
/// non-numeric, non-finite or zero.
pub fn validate_result_number(provider: &str, data: &Value, path: &[&str]) -> Result<f64> {
    let location = path.join(".");

    let value = path
        .iter()
        .try_fold(data, |current, key| current.get(*key))
        .filter(|value| !value.is_null())
        .ok_or_else(|| {
            AdapterError::upstream(
                provider,
                format!("Result could not be found in path: {}", location),
            )
        })?;

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number {
        Some(n) if n.is_finite() && n != 0.0 => Ok(n),
        _ => Err(AdapterError::upstream(
            provider,
            format!("Invalid result received at {}: {}", location, value),
        )),
    }
}
