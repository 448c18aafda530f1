use analysis::{
    validate, AnalysisResult, Feature, FeatureModelInfo, ResultMetadata, UnvalidatedRequest,
};
use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::{Extension, Json};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::error::{ApiError, ErrorEnvelope};
use crate::extract::{AnalyzeBody, AnalyzeForm, AnalyzeRequestBody};
use crate::logging::RequestId;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameters
// ---------------------------------------------------------------------------

/// Optional per-feature switches, combined with the body's `features` list.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct AnalyzeQuery {
    /// Language tag; the body's `language` takes precedence.
    language: Option<String>,
    /// `true` or `v2` to summarise. `v1` is rejected.
    summarize: Option<String>,
    /// `true` to detect topics.
    topics: Option<String>,
    /// `true` to analyse sentiment.
    sentiment: Option<String>,
    /// `true` to recognise intents.
    intents: Option<String>,
}

impl AnalyzeQuery {
    /// Flags present on the query string, still uninterpreted.
    fn flags(&self) -> Vec<(Feature, String)> {
        [
            (Feature::Summarize, &self.summarize),
            (Feature::Topics, &self.topics),
            (Feature::Sentiment, &self.sentiment),
            (Feature::Intents, &self.intents),
        ]
        .into_iter()
        .filter_map(|(feature, value)| value.clone().map(|v| (feature, v)))
        .collect()
    }
}

// ---------------------------------------------------------------------------
// Response body
// ---------------------------------------------------------------------------

/// Successful analysis response.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalyzeResponse {
    pub results: AnalysisResultBody,
}

/// One section per requested feature; sections the provider did not return
/// are omitted.
#[derive(Debug, Serialize, ToSchema)]
pub struct AnalysisResultBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics: Option<Vec<TopicBody>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment: Option<SentimentBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents: Option<Vec<IntentBody>>,
    pub metadata: MetadataBody,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TopicBody {
    pub topic: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct IntentBody {
    pub intent: String,
    /// In `[0, 1]`.
    pub confidence: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct SentimentBody {
    /// `positive`, `negative` or `neutral`.
    #[schema(example = "positive")]
    pub label: String,
    /// In `[-1, 1]`.
    pub score: f64,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ModelInfoBody {
    pub model_uuid: Option<String>,
    pub input_tokens: Option<u64>,
    pub output_tokens: Option<u64>,
}

/// Provider bookkeeping for the call.
#[derive(Debug, Serialize, ToSchema)]
pub struct MetadataBody {
    pub request_id: Option<String>,
    /// RFC 3339 creation time reported by the provider.
    pub created: Option<String>,
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary_info: Option<ModelInfoBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topics_info: Option<ModelInfoBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sentiment_info: Option<ModelInfoBody>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub intents_info: Option<ModelInfoBody>,
}

impl From<FeatureModelInfo> for ModelInfoBody {
    fn from(info: FeatureModelInfo) -> Self {
        Self {
            model_uuid: info.model_uuid.map(|m| m.to_string()),
            input_tokens: info.input_tokens.map(|t| t.as_u64()),
            output_tokens: info.output_tokens.map(|t| t.as_u64()),
        }
    }
}

impl From<ResultMetadata> for MetadataBody {
    fn from(meta: ResultMetadata) -> Self {
        Self {
            request_id: meta.request_id.map(|id| id.to_string()),
            created: meta.created.map(|ts| ts.to_string()),
            language: meta.language,
            summary_info: meta.summary_info.map(Into::into),
            topics_info: meta.topics_info.map(Into::into),
            sentiment_info: meta.sentiment_info.map(Into::into),
            intents_info: meta.intents_info.map(Into::into),
        }
    }
}

impl From<AnalysisResult> for AnalysisResultBody {
    fn from(result: AnalysisResult) -> Self {
        Self {
            summary: result.summary,
            topics: result.topics.map(|topics| {
                topics
                    .into_iter()
                    .map(|t| TopicBody {
                        topic: t.topic,
                        confidence: t.confidence.as_f64(),
                    })
                    .collect()
            }),
            sentiment: result.sentiment.map(|s| SentimentBody {
                label: s.label.to_string(),
                score: s.score.as_f64(),
            }),
            intents: result.intents.map(|intents| {
                intents
                    .into_iter()
                    .map(|i| IntentBody {
                        intent: i.intent,
                        confidence: i.confidence.as_f64(),
                    })
                    .collect()
            }),
            metadata: result.metadata.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Handler
// ---------------------------------------------------------------------------

/// Analyse text or a URL with the requested features.
///
/// Send exactly one of `text` or `url`. Features come from the body's
/// `features` list and/or the per-feature query flags; at least one is
/// required.
#[utoipa::path(
    post,
    path = "/api/text-intelligence",
    tag = "Analysis",
    params(AnalyzeQuery),
    request_body(
        description = "Text or URL to analyse",
        content(
            (AnalyzeRequestBody = "application/json"),
            (AnalyzeForm = "application/x-www-form-urlencoded")
        )
    ),
    responses(
        (status = 200, description = "Analysis result", body = AnalyzeResponse),
        (status = 400, description = "Request violates a validation rule", body = ErrorEnvelope),
        (status = 413, description = "Body exceeds the size limit", body = ErrorEnvelope),
        (status = 502, description = "Provider returned an error or an unreadable response", body = ErrorEnvelope),
        (status = 503, description = "Provider unreachable or timed out", body = ErrorEnvelope)
    )
)]
pub async fn analyze(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    query: Result<Query<AnalyzeQuery>, QueryRejection>,
    AnalyzeBody(body): AnalyzeBody,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let Query(query) = query.map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;

    let outcome = match validate(build_request(body, &query)) {
        Ok(request) => state.provider.analyze(&request).await,
        Err(err) => Err(err),
    };

    match outcome {
        Ok(result) => Ok(Json(AnalyzeResponse {
            results: result.into(),
        })),
        Err(err) => {
            if err.is_client_error() {
                tracing::info!(
                    request_id = %request_id.0,
                    code = err.code(),
                    message = %err,
                    "Analysis request rejected"
                );
            } else if err.is_upstream() {
                tracing::warn!(
                    request_id = %request_id.0,
                    provider = state.provider.name(),
                    code = err.code(),
                    error = %err,
                    "Analysis failed upstream"
                );
            } else {
                tracing::error!(request_id = %request_id.0, error = %err, "Analysis failed");
            }
            Err(err.into())
        }
    }
}

/// Merges body fields and query flags into the validator's input.
fn build_request(body: AnalyzeRequestBody, query: &AnalyzeQuery) -> UnvalidatedRequest {
    UnvalidatedRequest {
        text: body.text,
        url: body.url,
        features: body.features,
        flags: query.flags(),
        language: body.language.or_else(|| query.language.clone()),
    }
}
