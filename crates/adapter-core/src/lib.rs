//! Shared building blocks for external data adapters.
//!
//! An adapter receives a request envelope, validates its parameters, calls a
//! single upstream endpoint, and shapes the upstream payload into a result
//! envelope. This crate provides the pieces every adapter shares:
//!
//! - [`validator`] - declarative input schemas with alias resolution
//! - [`overrides`] - the adapter-specific symbol override table
//! - [`requester`] - single-shot JSON requests and result extraction
//! - [`envelope`] - inbound request and outbound result/error envelopes
//! - [`config`] - environment-backed configuration helpers
//! - [`errors`] - the request-scoped error taxonomy

pub mod config;
pub mod envelope;
pub mod errors;
pub mod overrides;
pub mod requester;
pub mod validator;

pub use config::HttpOptions;
pub use envelope::{AdapterRequest, AdapterResponse, ErroredResponse};
pub use errors::{AdapterError, Result, Violation, ViolationKind};
pub use overrides::SymbolOverrides;
pub use requester::{build_url_path, validate_result_number, Requester, UpstreamResponse};
pub use validator::{InputParameter, ParamKind, ValidatedInput, Validator};
