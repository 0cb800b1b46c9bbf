//! GSR websocket authentication.
//!
//! The websocket feed requires a short-lived bearer token obtained from the
//! REST `/token` endpoint with an HMAC-SHA256 signed request.
//!
//! ```rust,ignore
//! use ea_gsr::{GsrSettings, TokenClient};
//!
//! let client = TokenClient::new(GsrSettings::from_env()?)?;
//! let token = client.get_token().await?;
//! ```

pub mod config;
pub mod signature;
pub mod token;

pub use config::{GsrSettings, DEFAULT_API_ENDPOINT, NAME};
pub use signature::{current_time_nanos, generate_signature, signing_message};
pub use token::{AccessToken, AccessTokenResponse, SignedTokenRequest, TokenClient};
