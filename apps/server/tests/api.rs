use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use ea_core::{AdapterError, Result, SymbolOverrides};
use ea_finage::{FinageAdapter, FinageApi};
use ea_server::{api::app_router, AppState};
use serde_json::{json, Value};
use tower::ServiceExt;

/// Serves fixed quotes and records the pairs it was asked for.
#[derive(Default)]
struct StubFinage {
    calls: Mutex<Vec<String>>,
}

#[async_trait]
impl FinageApi for StubFinage {
    async fn last_forex(&self, from: &str, to: &str) -> Result<Value> {
        let pair = format!("{}{}", from, to);
        self.calls.lock().unwrap().push(pair.clone());

        match pair.as_str() {
            "EURUSD" => Ok(json!({ "symbol": "EURUSD", "ask": 1.2, "bid": 1.0, "timestamp": 1 })),
            "USDJPY" => Ok(json!({ "symbol": "USDJPY", "ask": 151.0, "bid": 149.0, "timestamp": 1 })),
            "GBPUSD" => Ok(json!({ "symbol": "GBPUSD", "ask": 1.27, "timestamp": 1 })),
            "EURGBP" => {
                tokio::time::sleep(Duration::from_secs(5)).await;
                Ok(json!({ "symbol": "EURGBP", "ask": 0.86, "bid": 0.84, "timestamp": 1 }))
            }
            _ => Err(AdapterError::upstream_status("FINAGE", 404, "Symbol not found")),
        }
    }
}

fn router_with_timeout(api: Arc<StubFinage>, request_timeout: Duration) -> Router {
    let mut overrides = SymbolOverrides::new();
    overrides.insert("finage", "EURT", "EUR");

    let state = Arc::new(AppState {
        finage: FinageAdapter::new(api, Arc::new(overrides)),
        request_timeout,
    });
    app_router(state)
}

fn test_router(api: Arc<StubFinage>) -> Router {
    router_with_timeout(api, Duration::from_secs(5))
}

async fn post(app: Router, body: Value) -> (StatusCode, Value) {
    post_to(app, "/", body).await
}

async fn post_to(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn returns_success_envelope() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        test_router(api.clone()),
        json!({ "id": "job-1", "data": { "base": "EURT", "quote": "usd" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobRunID"], "job-1");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["result"], 1.1);
    assert_eq!(body["data"]["symbol"], "EURUSD");
    assert_eq!(body["data"]["result"], 1.1);
    assert_eq!(*api.calls.lock().unwrap(), vec!["EURUSD".to_string()]);
}

#[tokio::test]
async fn forex_route_runs_forex_endpoint() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post_to(
        test_router(api.clone()),
        "/forex",
        json!({ "id": "1", "data": { "base": "EUR", "quote": "USD" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobRunID"], "1");
    assert_eq!(body["statusCode"], 200);
    assert_eq!(body["result"], 1.1);
    assert_eq!(*api.calls.lock().unwrap(), vec!["EURUSD".to_string()]);
}

#[tokio::test]
async fn slow_upstream_returns_errored_envelope() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        router_with_timeout(api, Duration::from_millis(50)),
        json!({ "id": "job-slow", "data": { "base": "EUR", "quote": "GBP" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["jobRunID"], "job-slow");
    assert_eq!(body["status"], "errored");
    assert_eq!(body["error"]["name"], "UpstreamError");
}

#[tokio::test]
async fn inverts_reversed_pairs() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        test_router(api.clone()),
        json!({ "id": 9, "data": { "from": "JPY", "to": "USD" } }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["jobRunID"], "9");
    let result = body["result"].as_f64().unwrap();
    assert!((result - 1.0 / 150.0).abs() < 1e-15);
    assert_eq!(*api.calls.lock().unwrap(), vec!["USDJPY".to_string()]);
}

#[tokio::test]
async fn missing_base_is_bad_request_without_upstream_call() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        test_router(api.clone()),
        json!({ "id": "job-2", "data": { "quote": "USD" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jobRunID"], "job-2");
    assert_eq!(body["status"], "errored");
    assert_eq!(body["error"]["name"], "ValidationError");
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn missing_bid_is_bad_gateway() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        test_router(api),
        json!({ "id": "job-3", "data": { "base": "GBP", "quote": "USD" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["name"], "UpstreamError");
    assert!(body.get("result").is_none());
}

#[tokio::test]
async fn unsupported_endpoint_is_rejected() {
    let api = Arc::new(StubFinage::default());
    let (status, body) = post(
        test_router(api.clone()),
        json!({ "data": { "endpoint": "stock", "base": "EUR", "quote": "USD" } }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["jobRunID"], "1");
    assert!(api.calls.lock().unwrap().is_empty());
}

#[tokio::test]
async fn health_check() {
    let response = test_router(Arc::new(StubFinage::default()))
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}
