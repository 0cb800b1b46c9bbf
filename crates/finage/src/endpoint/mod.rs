//! Adapter endpoints.

pub mod forex;

/// Endpoint names accepted in the inbound `endpoint` field.
pub const SUPPORTED_ENDPOINTS: &[&str] = &["forex"];
