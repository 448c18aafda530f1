//! End-to-end runs of the HTTP surface against a stubbed Deepgram endpoint.

mod common;

use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use analysis::ProviderCredential;
use axum::http::StatusCode;
use common::{build_app, get, post_json};
use mockito::Matcher;
use provider::{ProviderConfig, ReadClient};
use serde_json::json;

fn app_against(server: &mockito::ServerGuard) -> axum::Router {
    let config = ProviderConfig::new(ProviderCredential::new("test-key").unwrap())
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(5));
    build_app(Arc::new(ReadClient::new(config).unwrap()))
}

#[tokio::test]
async fn provider_summary_is_passed_through() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/read")
        .match_header("authorization", "Token test-key")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("summarize".into(), "v2".into()),
            Matcher::UrlEncoded("language".into(), "en".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "metadata": {
                    "request_id": "dg-1",
                    "created": "2026-01-01T12:00:00Z",
                    "language": "en",
                    "summary_info": { "model_uuid": "m-1", "input_tokens": 12, "output_tokens": 5 }
                },
                "results": { "summary": { "text": "A short summary." } }
            })
            .to_string(),
        )
        .create_async()
        .await;

    let app = app_against(&server);
    let (status, body) = post_json(
        &app,
        "/api/text-intelligence",
        json!({ "text": "Some longer text to summarize.", "features": ["summarize"] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["results"]["summary"], "A short summary.");
    assert_eq!(body["results"]["metadata"]["request_id"], "dg-1");
    assert_eq!(body["results"]["metadata"]["summary_info"]["input_tokens"], 12);
    mock.assert_async().await;
}

#[tokio::test]
async fn provider_failures_map_to_gateway_errors() {
    for upstream in [401_usize, 429, 500] {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("POST", "/v1/read")
            .match_query(Matcher::Any)
            .with_status(upstream)
            .with_body(r#"{"err_code":"X","err_msg":"provider said no"}"#)
            .create_async()
            .await;

        let app = app_against(&server);
        let (status, body) = post_json(
            &app,
            "/api/text-intelligence",
            json!({ "text": "hello", "features": ["topics"] }),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_GATEWAY, "upstream {upstream}");
        assert_eq!(body["error"]["code"], "UPSTREAM_ERROR");
        assert_eq!(body["error"]["details"]["upstream_status"], upstream);
        assert!(body["error"]["message"]
            .as_str()
            .unwrap()
            .contains("provider said no"));
    }
}

#[tokio::test]
async fn malformed_provider_body_is_protocol_error() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/read")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>not json</html>")
        .create_async()
        .await;

    let app = app_against(&server);
    let (status, body) = post_json(
        &app,
        "/api/text-intelligence",
        json!({ "text": "hello", "features": ["sentiment"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["code"], "UPSTREAM_PROTOCOL_ERROR");

    let (status, _, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn validation_failure_never_reaches_provider() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", "/v1/read")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let app = app_against(&server);
    let (status, _) = post_json(
        &app,
        "/api/text-intelligence",
        json!({ "text": "hello", "url": "https://example.com", "features": ["topics"] }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    mock.assert_async().await;
}

#[tokio::test]
async fn slow_provider_is_service_unavailable() {
    let mut server = mockito::Server::new_async().await;
    server
        .mock("POST", "/v1/read")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_chunked_body(|w| {
            std::thread::sleep(Duration::from_secs(3));
            w.write_all(br#"{"results":{"summary":{"text":"late"}}}"#)
        })
        .create_async()
        .await;

    let config = ProviderConfig::new(ProviderCredential::new("test-key").unwrap())
        .with_base_url(server.url())
        .with_timeout(Duration::from_secs(1));
    let app = build_app(Arc::new(ReadClient::new(config).unwrap()));

    let (status, body) = post_json(
        &app,
        "/api/text-intelligence",
        json!({ "text": "hello", "features": ["summarize"] }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
    assert!(body["error"]["message"].as_str().unwrap().contains("timed out"));
}

#[tokio::test]
async fn unreachable_provider_is_service_unavailable() {
    let config = ProviderConfig::new(ProviderCredential::new("test-key").unwrap())
        .with_base_url("http://127.0.0.1:9")
        .with_timeout(Duration::from_secs(2));
    let app = build_app(Arc::new(ReadClient::new(config).unwrap()));

    let (status, body) = post_json(
        &app,
        "/api/text-intelligence",
        json!({ "text": "hello", "features": ["topics"] }),
    )
    .await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["error"]["code"], "UPSTREAM_UNAVAILABLE");
}
