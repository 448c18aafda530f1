#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use analysis::{AnalysisError, AnalysisRequest, AnalysisResult, TextIntelligenceProvider};
use async_trait::async_trait;
use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use serde_json::Value;
use server::{build_http_app, AppState};
use tower::util::ServiceExt;

/// Provider double that records calls and replays a fixed outcome.
pub struct FakeProvider {
    outcome: Result<AnalysisResult, AnalysisError>,
    calls: AtomicUsize,
    last_request: Mutex<Option<AnalysisRequest>>,
}

impl FakeProvider {
    pub fn succeeding(result: AnalysisResult) -> Arc<Self> {
        Arc::new(Self {
            outcome: Ok(result),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn failing(err: AnalysisError) -> Arc<Self> {
        Arc::new(Self {
            outcome: Err(err),
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<AnalysisRequest> {
        self.last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

#[async_trait]
impl TextIntelligenceProvider for FakeProvider {
    fn name(&self) -> &str {
        "fake"
    }

    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self
            .last_request
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(request.clone());
        self.outcome.clone()
    }
}

pub fn build_app(provider: Arc<dyn TextIntelligenceProvider>) -> axum::Router {
    build_app_with_metadata(provider, PathBuf::from("/nonexistent/deepgram.toml"))
}

pub fn build_app_with_metadata(
    provider: Arc<dyn TextIntelligenceProvider>,
    metadata_path: PathBuf,
) -> axum::Router {
    build_http_app(AppState::new(provider, metadata_path))
}

async fn send(app: &axum::Router, req: Request<Body>) -> (StatusCode, Value, Option<String>) {
    let resp = app
        .clone()
        .oneshot(req)
        .await
        .expect("request should be handled");

    let status = resp.status();
    let request_id = resp
        .headers()
        .get("x-request-id")
        .and_then(|h| h.to_str().ok())
        .map(|s| s.to_string());
    let bytes = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("body should read");
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice::<Value>(&bytes)
            .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(&bytes).to_string()))
    };

    (status, json, request_id)
}

pub async fn post_json(app: &axum::Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request should build");
    let (status, json, _) = send(app, req).await;
    (status, json)
}

pub async fn post_raw(
    app: &axum::Router,
    uri: &str,
    content_type: &str,
    body: &str,
) -> (StatusCode, Value) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", content_type)
        .body(Body::from(body.to_string()))
        .expect("request should build");
    let (status, json, _) = send(app, req).await;
    (status, json)
}

pub async fn get(app: &axum::Router, uri: &str) -> (StatusCode, Value, Option<String>) {
    let req = Request::builder()
        .method("GET")
        .uri(uri)
        .body(Body::empty())
        .expect("request should build");
    send(app, req).await
}
