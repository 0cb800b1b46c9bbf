//! Finage external adapter.
//!
//! Fetches the last forex quote for a currency pair from the Finage REST API
//! and returns the ask/bid midpoint.
//!
//! ```text
//! request { base, quote }
//!     -> validate + alias resolution
//!     -> base symbol override, uppercase
//!     -> pair ordering (some pairs are only listed reversed)
//!     -> GET /last/forex/{from}{to}?apikey=...
//!     -> (ask + bid) / 2, reciprocal if the pair was reversed
//!     -> { jobRunID, result, data }
//! ```

pub mod adapter;
pub mod client;
pub mod config;
pub mod endpoint;
pub mod pairs;

pub use adapter::FinageAdapter;
pub use client::{FinageApi, FinageClient};
pub use config::{bundled_overrides, FinageConfig, DEFAULT_API_ENDPOINT, NAME};
pub use pairs::PairOrdering;
