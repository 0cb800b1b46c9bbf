//! Error types shared by every adapter.
//!
//! - [`AdapterError`]: the request-scoped failure returned by adapter operations
//! - [`Violation`]: a single input parameter that failed validation

use std::fmt;

use thiserror::Error;

/// Result type alias for adapter operations.
pub type Result<T> = std::result::Result<T, AdapterError>;

/// Why an input parameter was rejected.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ViolationKind {
    /// Neither the canonical name nor any alias was supplied.
    MissingRequired,
    /// The value was present but had the wrong JSON type.
    WrongType { expected: &'static str },
    /// The `overrides` object did not have the `{ adapter: { symbol: override } }` shape.
    InvalidOverrides,
    /// The value is well-typed but not one the adapter accepts.
    Unsupported { value: String },
}

/// A single rejected input parameter.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Violation {
    /// Canonical parameter name (never an alias).
    pub parameter: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn missing(parameter: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            kind: ViolationKind::MissingRequired,
        }
    }

    pub fn wrong_type(parameter: impl Into<String>, expected: &'static str) -> Self {
        Self {
            parameter: parameter.into(),
            kind: ViolationKind::WrongType { expected },
        }
    }

    pub fn unsupported(parameter: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            parameter: parameter.into(),
            kind: ViolationKind::Unsupported {
                value: value.into(),
            },
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            ViolationKind::MissingRequired => {
                write!(f, "Required parameter not supplied: {}", self.parameter)
            }
            ViolationKind::WrongType { expected } => {
                write!(f, "{} parameter must be of type {}", self.parameter, expected)
            }
            ViolationKind::InvalidOverrides => {
                write!(f, "{} must map adapter names to symbol tables", self.parameter)
            }
            ViolationKind::Unsupported { value } => {
                write!(f, "{} {} is not supported", self.parameter, value)
            }
        }
    }
}

fn join_violations(violations: &[Violation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// Errors that can occur while serving an adapter request.
///
/// None of these are fatal to the process. Each one fails only the request
/// that produced it and is handed back to the caller, which owns any retry
/// policy.
#[derive(Error, Debug)]
pub enum AdapterError {
    /// Input parameters were missing or malformed.
    /// Raised before any network call is made.
    #[error("Validation failed: {}", join_violations(.0))]
    Validation(Vec<Violation>),

    /// The upstream call failed or returned data that could not be used.
    #[error("Upstream error: {provider} - {message}")]
    Upstream {
        /// The upstream source that failed
        provider: String,
        /// HTTP status, when a response was received
        status: Option<u16>,
        /// Description of the failure
        message: String,
    },

    /// The authentication endpoint rejected the credentials.
    /// The message is passed through verbatim from the upstream.
    #[error("{0}")]
    AuthFailure(String),

    /// Required configuration is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl AdapterError {
    /// Create an upstream error without an HTTP status.
    pub fn upstream(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status: None,
            message: message.into(),
        }
    }

    /// Create an upstream error for a non-success HTTP response.
    pub fn upstream_status(
        provider: impl Into<String>,
        status: u16,
        message: impl Into<String>,
    ) -> Self {
        Self::Upstream {
            provider: provider.into(),
            status: Some(status),
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Map a `reqwest` transport error onto the upstream variant.
    pub fn transport(provider: impl Into<String>, error: reqwest::Error) -> Self {
        let message = if error.is_timeout() {
            "Request timed out".to_string()
        } else {
            format!("Request failed: {}", error)
        };
        Self::Upstream {
            provider: provider.into(),
            status: error.status().map(|s| s.as_u16()),
            message,
        }
    }

    /// HTTP status used when this error is returned to an inbound caller.
    pub fn status_code(&self) -> u16 {
        match self {
            Self::Validation(_) => 400,
            Self::AuthFailure(_) => 401,
            Self::Config(_) => 500,
            Self::Upstream { .. } => 502,
        }
    }

    /// Short machine-friendly name used in errored envelopes.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Validation(_) => "ValidationError",
            Self::Upstream { .. } => "UpstreamError",
            Self::AuthFailure(_) => "AuthFailure",
            Self::Config(_) => "ConfigError",
        }
    }
}
