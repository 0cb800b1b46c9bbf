//! Request signing for the token endpoint.
//!
//! The upstream verifier recomputes the HMAC over the exact string
//! `userId=<userId>&apiKey=<publicKey>&ts=<ts>`; field order and formatting
//! must not change.

use chrono::Utc;
use ea_core::{AdapterError, Result};
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Current wall-clock time in nanoseconds.
///
/// Only millisecond precision is available; the value is milliseconds
/// scaled by 1,000,000.
pub fn current_time_nanos() -> i64 {
    Utc::now().timestamp_millis() * 1_000_000
}

/// The message covered by the signature.
pub fn signing_message(user_id: &str, public_key: &str, ts: i64) -> String {
    format!("userId={}&apiKey={}&ts={}", user_id, public_key, ts)
}

/// Hex-encoded HMAC-SHA256 of [`signing_message`] keyed by `private_key`.
pub fn generate_signature(
    user_id: &str,
    public_key: &str,
    private_key: &str,
    ts: i64,
) -> Result<String> {
    let mut mac = HmacSha256::new_from_slice(private_key.as_bytes())
        .map_err(|e| AdapterError::config(format!("Invalid HMAC secret: {}", e)))?;
    mac.update(signing_message(user_id, public_key, ts).as_bytes());
    Ok(hex::encode(mac.finalize().into_bytes()))
}
