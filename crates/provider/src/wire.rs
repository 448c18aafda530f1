//! Wire shapes of the Deepgram read API and their conversion into domain
//! results.
//!
//! Only the fields this gateway surfaces are modelled; everything else in the
//! provider's body is ignored. A field that is present but has the wrong type
//! or an out-of-range value makes the whole body a protocol error.

use analysis::{
    collapse_labels, AnalysisResult, Confidence, FeatureModelInfo, IntentScore, ModelUuid,
    RequestId, ResultMetadata, Sentiment, SentimentLabel, SentimentScore, Timestamp, TokenCount,
    TopicScore,
};
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Request body
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
#[serde(untagged)]
pub(crate) enum ReadBody<'a> {
    Text { text: &'a str },
    Url { url: &'a str },
}

// ---------------------------------------------------------------------------
// Success body
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub(crate) struct ReadResponse {
    #[serde(default)]
    metadata: Option<WireMetadata>,
    results: WireResults,
}

#[derive(Debug, Default, Deserialize)]
struct WireMetadata {
    request_id: Option<String>,
    created: Option<String>,
    language: Option<String>,
    summary_info: Option<WireModelInfo>,
    topics_info: Option<WireModelInfo>,
    sentiment_info: Option<WireModelInfo>,
    intents_info: Option<WireModelInfo>,
}

#[derive(Debug, Deserialize)]
struct WireModelInfo {
    model_uuid: Option<String>,
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireResults {
    summary: Option<WireSummary>,
    topics: Option<WireSegments<WireTopicSegment>>,
    intents: Option<WireSegments<WireIntentSegment>>,
    sentiments: Option<WireSentiments>,
}

#[derive(Debug, Deserialize)]
struct WireSummary {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireSegments<T> {
    #[serde(default = "Vec::new")]
    segments: Vec<T>,
}

#[derive(Debug, Deserialize)]
struct WireTopicSegment {
    #[serde(default)]
    topics: Vec<WireTopic>,
}

#[derive(Debug, Deserialize)]
struct WireTopic {
    topic: String,
    confidence_score: f64,
}

#[derive(Debug, Deserialize)]
struct WireIntentSegment {
    #[serde(default)]
    intents: Vec<WireIntent>,
}

#[derive(Debug, Deserialize)]
struct WireIntent {
    intent: String,
    confidence_score: f64,
}

#[derive(Debug, Deserialize)]
struct WireSentiments {
    average: Option<WireSentiment>,
}

#[derive(Debug, Deserialize)]
struct WireSentiment {
    sentiment: String,
    sentiment_score: f64,
}

impl ReadResponse {
    /// Converts the provider body into a domain result.
    ///
    /// Returns a description of the first invalid value on failure.
    pub(crate) fn into_result(self) -> Result<AnalysisResult, String> {
        let results = self.results;

        let summary = results.summary.and_then(|s| s.text);

        let topics = match results.topics {
            Some(wire) => {
                let mut scored = Vec::new();
                for topic in wire.segments.into_iter().flat_map(|s| s.topics) {
                    scored.push((topic.topic, confidence(topic.confidence_score)?));
                }
                Some(
                    collapse_labels(scored)
                        .into_iter()
                        .map(|(topic, confidence)| TopicScore { topic, confidence })
                        .collect(),
                )
            }
            None => None,
        };

        let intents = match results.intents {
            Some(wire) => {
                let mut scored = Vec::new();
                for intent in wire.segments.into_iter().flat_map(|s| s.intents) {
                    scored.push((intent.intent, confidence(intent.confidence_score)?));
                }
                Some(
                    collapse_labels(scored)
                        .into_iter()
                        .map(|(intent, confidence)| IntentScore { intent, confidence })
                        .collect(),
                )
            }
            None => None,
        };

        let sentiment = match results.sentiments.and_then(|s| s.average) {
            Some(avg) => {
                let label = SentimentLabel::parse(&avg.sentiment)
                    .ok_or_else(|| format!("unknown sentiment label '{}'", avg.sentiment))?;
                let score = SentimentScore::new(avg.sentiment_score).ok_or_else(|| {
                    format!("sentiment score {} outside [-1, 1]", avg.sentiment_score)
                })?;
                Some(Sentiment { label, score })
            }
            None => None,
        };

        Ok(AnalysisResult {
            summary,
            topics,
            sentiment,
            intents,
            metadata: self.metadata.unwrap_or_default().into_metadata(),
        })
    }
}

impl WireMetadata {
    fn into_metadata(self) -> ResultMetadata {
        ResultMetadata {
            request_id: self.request_id.and_then(RequestId::new),
            // An unparsable timestamp is dropped rather than failing the call.
            created: self.created.as_deref().and_then(Timestamp::parse_rfc3339),
            language: self.language,
            summary_info: self.summary_info.map(WireModelInfo::into_info),
            topics_info: self.topics_info.map(WireModelInfo::into_info),
            sentiment_info: self.sentiment_info.map(WireModelInfo::into_info),
            intents_info: self.intents_info.map(WireModelInfo::into_info),
        }
    }
}

impl WireModelInfo {
    fn into_info(self) -> FeatureModelInfo {
        FeatureModelInfo {
            model_uuid: self.model_uuid.and_then(ModelUuid::new),
            input_tokens: self.input_tokens.map(TokenCount::new),
            output_tokens: self.output_tokens.map(TokenCount::new),
        }
    }
}

fn confidence(value: f64) -> Result<Confidence, String> {
    Confidence::new(value).ok_or_else(|| format!("confidence score {value} outside [0, 1]"))
}

// ---------------------------------------------------------------------------
// Error body
// ---------------------------------------------------------------------------

/// Longest raw error body quoted back to callers.
const MAX_ERROR_BODY_CHARS: usize = 512;

#[derive(Debug, Deserialize)]
struct WireError {
    err_msg: Option<String>,
    message: Option<String>,
    error: Option<serde_json::Value>,
}

/// Extracts a human-readable message from a provider error body.
///
/// Prefers `err_msg`, then `message`, then a string `error` field; falls back
/// to the (truncated) raw body, and finally to `fallback`.
pub(crate) fn error_message(body: &[u8], fallback: &str) -> String {
    if let Ok(wire) = serde_json::from_slice::<WireError>(body) {
        let from_error = wire
            .error
            .as_ref()
            .and_then(|e| e.as_str().map(str::to_string));
        if let Some(msg) = wire
            .err_msg
            .or(wire.message)
            .or(from_error)
            .filter(|m| !m.trim().is_empty())
        {
            return msg;
        }
    }

    let raw = String::from_utf8_lossy(body);
    let raw = raw.trim();
    if raw.is_empty() {
        return fallback.to_string();
    }
    match raw.char_indices().nth(MAX_ERROR_BODY_CHARS) {
        Some((cut, _)) => format!("{}...", &raw[..cut]),
        None => raw.to_string(),
    }
}
