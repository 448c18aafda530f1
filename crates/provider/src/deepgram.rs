//! Deepgram Text Intelligence client.

use analysis::{
    AnalysisError, AnalysisRequest, AnalysisResult, AnalysisSource, Feature,
    TextIntelligenceProvider,
};
use async_trait::async_trait;
use reqwest::{header, Client};

use crate::config::ProviderConfig;
use crate::wire::{self, ReadBody, ReadResponse};

/// Client for `POST /v1/read`.
///
/// Holds a pooled [`reqwest::Client`] and the credential; cheap to share
/// behind an `Arc` across request handlers.
#[derive(Debug, Clone)]
pub struct ReadClient {
    config: ProviderConfig,
    client: Client,
}

impl ReadClient {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`AnalysisError::Configuration`] if the HTTP client cannot be
    /// constructed (e.g. TLS backend initialisation failure).
    pub fn new(config: ProviderConfig) -> Result<Self, AnalysisError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("text-intelligence/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AnalysisError::Configuration {
                message: format!("failed to build HTTP client: {e}"),
            })?;
        Ok(Self { config, client })
    }

    /// Query parameters selecting language and features.
    fn query(request: &AnalysisRequest) -> Vec<(&'static str, String)> {
        let mut query = vec![("language", request.language.as_str().to_string())];
        for feature in request.features.iter() {
            let value = match feature {
                Feature::Summarize => "v2",
                Feature::Topics | Feature::Sentiment | Feature::Intents => "true",
            };
            query.push((feature.as_str(), value.to_string()));
        }
        query
    }

    fn transport_error(&self, err: &reqwest::Error) -> AnalysisError {
        let message = if err.is_timeout() {
            format!("request timed out after {}s", self.config.timeout.as_secs())
        } else if err.is_connect() {
            format!("could not connect: {err}")
        } else {
            format!("request failed: {err}")
        };
        AnalysisError::UpstreamUnavailable { message }
    }
}

#[async_trait]
impl TextIntelligenceProvider for ReadClient {
    fn name(&self) -> &str {
        "deepgram"
    }

    #[tracing::instrument(
        name = "provider.analyze",
        skip_all,
        fields(
            provider = "deepgram",
            source = request.source.kind(),
            features = %request.features,
            status = tracing::field::Empty,
        )
    )]
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError> {
        let body = match &request.source {
            AnalysisSource::Text(text) => ReadBody::Text { text },
            AnalysisSource::Url(url) => ReadBody::Url { url: url.as_str() },
        };

        let resp = self
            .client
            .post(self.config.read_url())
            .query(&Self::query(request))
            .header(
                header::AUTHORIZATION,
                format!("Token {}", self.config.credential.expose()),
            )
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                let err = self.transport_error(&e);
                tracing::warn!(error = %err, "Provider request failed");
                err
            })?;

        let status = resp.status();
        tracing::Span::current().record("status", status.as_u16());

        // An unreadable body is a transport failure.
        let bytes = resp.bytes().await.map_err(|e| {
            let err = self.transport_error(&e);
            tracing::warn!(error = %err, "Provider response body could not be read");
            err
        })?;

        if !status.is_success() {
            let message = wire::error_message(&bytes, status.canonical_reason().unwrap_or(""));
            tracing::error!(
                status = status.as_u16(),
                message = %message,
                "Provider returned an error status"
            );
            return Err(AnalysisError::UpstreamError {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: ReadResponse = serde_json::from_slice(&bytes).map_err(|e| {
            tracing::error!(error = %e, "Provider response is not valid JSON for the read API");
            AnalysisError::UpstreamProtocolError {
                message: e.to_string(),
            }
        })?;

        let result = parsed.into_result().map_err(|message| {
            tracing::error!(message = %message, "Provider response contains invalid values");
            AnalysisError::UpstreamProtocolError { message }
        })?;

        tracing::debug!(
            request_id = result
                .metadata
                .request_id
                .as_ref()
                .map(|id| id.as_str())
                .unwrap_or("-"),
            "Provider response received"
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use analysis::{validate, ProviderCredential, UnvalidatedRequest};
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::io::Write;
    use std::time::Duration;

    fn client_for(base_url: &str) -> ReadClient {
        let config = ProviderConfig::new(ProviderCredential::new("test-key").unwrap())
            .with_base_url(base_url)
            .with_timeout(Duration::from_secs(5));
        ReadClient::new(config).unwrap()
    }

    fn text_request(features: &[&str]) -> AnalysisRequest {
        validate(UnvalidatedRequest {
            text: Some("The weather is lovely today.".to_string()),
            url: None,
            features: features.iter().map(|f| f.to_string()).collect(),
            ..Default::default()
        })
        .unwrap()
    }

    #[tokio::test]
    async fn sends_credential_features_and_text() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/read")
            .match_header("authorization", "Token test-key")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("language".into(), "en".into()),
                Matcher::UrlEncoded("summarize".into(), "v2".into()),
                Matcher::UrlEncoded("sentiment".into(), "true".into()),
            ]))
            .match_body(Matcher::Json(json!({ "text": "The weather is lovely today." })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(
                json!({
                    "metadata": { "request_id": "abc" },
                    "results": {
                        "summary": { "text": "Nice weather." },
                        "sentiments": { "average": { "sentiment": "positive", "sentiment_score": 0.6 } }
                    }
                })
                .to_string(),
            )
            .create_async()
            .await;

        let result = client_for(&server.url())
            .analyze(&text_request(&["summarize", "sentiment"]))
            .await
            .unwrap();

        mock.assert_async().await;
        assert_eq!(result.summary.as_deref(), Some("Nice weather."));
        assert_eq!(result.metadata.request_id.unwrap().as_str(), "abc");
    }

    #[tokio::test]
    async fn url_source_is_sent_as_url_field() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("POST", "/v1/read")
            .match_query(Matcher::UrlEncoded("topics".into(), "true".into()))
            .match_body(Matcher::Json(json!({ "url": "https://example.com/post" })))
            .with_status(200)
            .with_body(r#"{"results":{"topics":{"segments":[]}}}"#)
            .create_async()
            .await;

        let request = validate(UnvalidatedRequest {
            url: Some("https://example.com/post".to_string()),
            features: vec!["topics".to_string()],
            ..Default::default()
        })
        .unwrap();
        let result = client_for(&server.url()).analyze(&request).await.unwrap();

        mock.assert_async().await;
        assert_eq!(result.topics, Some(Vec::new()));
    }

    #[tokio::test]
    async fn error_status_carries_code_and_provider_message() {
        for status in [401_u16, 429, 500] {
            let mut server = Server::new_async().await;
            let _mock = server
                .mock("POST", "/v1/read")
                .match_query(Matcher::Any)
                .with_status(status as usize)
                .with_body(r#"{"err_code":"X","err_msg":"provider says no"}"#)
                .create_async()
                .await;

            let err = client_for(&server.url())
                .analyze(&text_request(&["topics"]))
                .await
                .unwrap_err();

            assert_eq!(
                err,
                AnalysisError::UpstreamError {
                    status,
                    message: "provider says no".to_string(),
                }
            );
        }
    }

    #[tokio::test]
    async fn malformed_json_is_a_protocol_error() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("POST", "/v1/read")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body("{ not json")
            .create_async()
            .await;

        let err = client_for(&server.url())
            .analyze(&text_request(&["intents"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::UpstreamProtocolError { .. }));
    }

    #[tokio::test]
    async fn unreachable_provider_is_unavailable() {
        // Port 9 (discard) on loopback is not expected to be listening.
        let err = client_for("http://127.0.0.1:9")
            .analyze(&text_request(&["summarize"]))
            .await
            .unwrap_err();

        assert!(matches!(err, AnalysisError::UpstreamUnavailable { .. }));
    }

    #[tokio::test]
    async fn slow_provider_times_out_as_unavailable() {
        let mut server = Server::new_async().await;
        server
            .mock("POST", "/v1/read")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_secs(3));
                w.write_all(br#"{"results":{}}"#)
            })
            .create_async()
            .await;

        let config = ProviderConfig::new(ProviderCredential::new("test-key").unwrap())
            .with_base_url(server.url())
            .with_timeout(Duration::from_secs(1));
        let err = ReadClient::new(config)
            .unwrap()
            .analyze(&text_request(&["topics"]))
            .await
            .unwrap_err();

        match err {
            AnalysisError::UpstreamUnavailable { message } => {
                assert!(message.contains("timed out"), "{message}");
            }
            other => panic!("expected UpstreamUnavailable, got {other:?}"),
        }
    }

    #[test]
    fn query_lists_features_in_canonical_order() {
        let query = ReadClient::query(&text_request(&["intents", "summarize"]));
        assert_eq!(
            query,
            vec![
                ("language", "en".to_string()),
                ("summarize", "v2".to_string()),
                ("intents", "true".to_string()),
            ]
        );
    }
}
