use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use ea_core::{AdapterError, ErroredResponse};

/// An adapter failure paired with the job it belongs to.
#[derive(Debug)]
pub struct ApiError {
    pub job_run_id: String,
    pub error: AdapterError,
}

impl ApiError {
    pub fn new(job_run_id: impl Into<String>, error: AdapterError) -> Self {
        Self {
            job_run_id: job_run_id.into(),
            error,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErroredResponse::from_error(self.job_run_id, &self.error);
        let status = StatusCode::from_u16(body.status_code)
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(body)).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
