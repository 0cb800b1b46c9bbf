use std::sync::{Mutex, Once};
use std::time::Duration;

use axum::{routing::post, Json, Router};
use ea_core::{AdapterError, HttpOptions};
use ea_gsr::{GsrSettings, TokenClient};
use log::{Level, LevelFilter, Log, Metadata, Record};
use serde_json::json;

/// Collects records emitted by the token client.
struct CapturingLogger {
    records: Mutex<Vec<(Level, String)>>,
}

impl Log for CapturingLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.target().starts_with("ea_gsr")
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        self.records
            .lock()
            .unwrap()
            .push((record.level(), record.args().to_string()));
    }

    fn flush(&self) {}
}

static LOGGER: CapturingLogger = CapturingLogger {
    records: Mutex::new(Vec::new()),
};
static INIT: Once = Once::new();

fn take_records() -> Vec<(Level, String)> {
    INIT.call_once(|| {
        log::set_logger(&LOGGER).unwrap();
        log::set_max_level(LevelFilter::Trace);
    });
    std::mem::take(&mut *LOGGER.records.lock().unwrap())
}

fn error_records(records: &[(Level, String)]) -> Vec<&str> {
    records
        .iter()
        .filter(|(level, _)| *level == Level::Error)
        .map(|(_, message)| message.as_str())
        .collect()
}

fn client(base_url: &str) -> TokenClient {
    let settings = GsrSettings::new(
        "u1",
        "pub",
        "secret",
        HttpOptions::new(base_url, Duration::from_secs(5)),
    );
    TokenClient::new(settings).unwrap()
}

// One test so that records from concurrent tests never interleave.
#[tokio::test]
async fn token_failures_are_logged_at_error_level() {
    take_records();

    // Upstream rejects the credentials
    let router = Router::new().route(
        "/token",
        post(|| async { Json(json!({ "success": false, "ts": 1, "error": "bad creds" })) }),
    );
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    let error = client(&format!("http://{}", addr))
        .get_token()
        .await
        .unwrap_err();
    assert!(matches!(error, AdapterError::AuthFailure(_)));

    let records = take_records();
    let errors = error_records(&records);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Unable to get access token"));
    assert!(errors[0].contains("bad creds"));

    // Nothing listening
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let closed = listener.local_addr().unwrap();
    drop(listener);

    let error = client(&format!("http://{}", closed))
        .get_token()
        .await
        .unwrap_err();
    assert!(matches!(error, AdapterError::Upstream { .. }));

    let records = take_records();
    let errors = error_records(&records);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].starts_with("Unable to get access token"));
}
