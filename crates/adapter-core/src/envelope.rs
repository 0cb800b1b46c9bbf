//! Inbound request and outbound result envelopes.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::errors::AdapterError;

/// Job run id used when the caller did not supply one.
pub const DEFAULT_JOB_RUN_ID: &str = "1";

/// An inbound adapter request: `{ "id": ..., "data": { ... } }`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct AdapterRequest {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,

    #[serde(default)]
    pub data: Map<String, Value>,
}

impl AdapterRequest {
    /// Build a request from a job id and a `data` object.
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self {
        Self {
            id: Some(Value::String(id.into())),
            data,
        }
    }

    /// The job run id echoed back in every response.
    ///
    /// Strings pass through, numbers are stringified, anything else
    /// falls back to [`DEFAULT_JOB_RUN_ID`].
    pub fn job_run_id(&self) -> String {
        match &self.id {
            Some(Value::String(s)) if !s.is_empty() => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            _ => DEFAULT_JOB_RUN_ID.to_string(),
        }
    }
}

/// Successful adapter result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdapterResponse {
    #[serde(rename = "jobRunID")]
    pub job_run_id: String,
    pub result: f64,
    pub status_code: u16,
    /// Full upstream payload with `result` added.
    pub data: Value,
}

impl AdapterResponse {
    /// Wrap an upstream payload and its derived result.
    pub fn success(job_run_id: impl Into<String>, upstream: Value, result: f64) -> Self {
        let data = match upstream {
            Value::Object(mut map) => {
                map.insert("result".to_string(), Value::from(result));
                Value::Object(map)
            }
            other => other,
        };

        Self {
            job_run_id: job_run_id.into(),
            result,
            status_code: 200,
            data,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub name: String,
    pub message: String,
}

/// Failed adapter result.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ErroredResponse {
    #[serde(rename = "jobRunID")]
    pub job_run_id: String,
    pub status: String,
    pub status_code: u16,
    pub error: ErrorDetail,
}

impl ErroredResponse {
    pub fn from_error(job_run_id: impl Into<String>, error: &AdapterError) -> Self {
        Self {
            job_run_id: job_run_id.into(),
            status: "errored".to_string(),
            status_code: error.status_code(),
            error: ErrorDetail {
                name: error.name().to_string(),
                message: error.to_string(),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_job_run_id_defaults() {
        let request: AdapterRequest = serde_json::from_value(json!({ "data": {} })).unwrap();
        assert_eq!(request.job_run_id(), "1");
    }

    #[test]
    fn test_job_run_id_numeric() {
        let request: AdapterRequest =
            serde_json::from_value(json!({ "id": 42, "data": {} })).unwrap();
        assert_eq!(request.job_run_id(), "42");
    }

    #[test]
    fn test_success_inserts_result_into_payload() {
        let upstream = json!({ "symbol": "EURUSD", "ask": 1.2, "bid": 1.0 });
        let response = AdapterResponse::success("abc", upstream, 1.1);

        assert_eq!(response.status_code, 200);
        assert_eq!(response.data["symbol"], "EURUSD");
        assert_eq!(response.data["result"], 1.1);

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["jobRunID"], "abc");
        assert_eq!(json["statusCode"], 200);
    }

    #[test]
    fn test_errored_envelope() {
        let error = AdapterError::AuthFailure("bad creds".to_string());
        let response = ErroredResponse::from_error("7", &error);
        let json = serde_json::to_value(&response).unwrap();

        assert_eq!(json["jobRunID"], "7");
        assert_eq!(json["status"], "errored");
        assert_eq!(json["statusCode"], 401);
        assert_eq!(json["error"]["name"], "AuthFailure");
        assert_eq!(json["error"]["message"], "bad creds");
    }
}
