use std::sync::Arc;

use axum::{
    extract::State,
    routing::{get, post},
    Json, Router,
};
use ea_core::{AdapterError, AdapterRequest, AdapterResponse, Violation};
use ea_finage::endpoint::SUPPORTED_ENDPOINTS;
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::{
    error::{ApiError, ApiResult},
    main_lib::AppState,
};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Reject requests naming an endpoint this adapter does not serve.
fn check_endpoint(request: &AdapterRequest) -> Result<(), AdapterError> {
    match request.data.get("endpoint") {
        None | Some(Value::Null) => Ok(()),
        Some(Value::String(name)) if SUPPORTED_ENDPOINTS.contains(&name.as_str()) => Ok(()),
        Some(Value::String(name)) => Err(AdapterError::Validation(vec![Violation::unsupported(
            "endpoint",
            name.as_str(),
        )])),
        Some(_) => Err(AdapterError::Validation(vec![Violation::wrong_type(
            "endpoint", "string",
        )])),
    }
}

async fn execute(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdapterRequest>,
) -> ApiResult<Json<AdapterResponse>> {
    let job_run_id = request.job_run_id();

    let result = match check_endpoint(&request) {
        Ok(()) => tokio::time::timeout(state.request_timeout, state.finage.forex(&request))
            .await
            .unwrap_or_else(|_| {
                Err(AdapterError::upstream(
                    ea_finage::NAME,
                    format!(
                        "Request timed out after {}ms",
                        state.request_timeout.as_millis()
                    ),
                ))
            }),
        Err(e) => Err(e),
    };

    match result {
        Ok(response) => {
            tracing::debug!(job_run_id = %job_run_id, result = response.result, "Request served");
            Ok(Json(response))
        }
        Err(error) => {
            tracing::warn!(job_run_id = %job_run_id, "Request failed: {}", error);
            Err(ApiError::new(job_run_id, error))
        }
    }
}

pub fn app_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", post(execute))
        .route("/forex", post(execute))
        .route("/health", get(health))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
