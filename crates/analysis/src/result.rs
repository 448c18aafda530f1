//! Analysis results.
//!
//! An [`AnalysisResult`] carries one optional section per [`crate::Feature`];
//! a section is `None` when the feature was not requested or the provider
//! returned nothing for it.

use serde::{Deserialize, Serialize};

use crate::identifiers::{ModelUuid, RequestId};
use crate::types::{Confidence, SentimentLabel, SentimentScore, Timestamp, TokenCount};

/// A detected topic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicScore {
    pub topic: String,
    pub confidence: Confidence,
}

/// A detected speaker/author intent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentScore {
    pub intent: String,
    pub confidence: Confidence,
}

/// Overall sentiment of the analysed text.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Sentiment {
    pub label: SentimentLabel,
    pub score: SentimentScore,
}

/// Which model produced one feature's output and what it cost.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureModelInfo {
    pub model_uuid: Option<ModelUuid>,
    pub input_tokens: Option<TokenCount>,
    pub output_tokens: Option<TokenCount>,
}

/// Provider-supplied bookkeeping for one call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResultMetadata {
    pub request_id: Option<RequestId>,
    pub created: Option<Timestamp>,
    pub language: Option<String>,
    pub summary_info: Option<FeatureModelInfo>,
    pub topics_info: Option<FeatureModelInfo>,
    pub sentiment_info: Option<FeatureModelInfo>,
    pub intents_info: Option<FeatureModelInfo>,
}

/// The outcome of a successful analysis call.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub summary: Option<String>,
    pub topics: Option<Vec<TopicScore>>,
    pub sentiment: Option<Sentiment>,
    pub intents: Option<Vec<IntentScore>>,
    pub metadata: ResultMetadata,
}

/// Collapses labelled scores reported across several text segments into one
/// ordered list.
///
/// Order of first appearance is kept. A label seen more than once keeps its
/// first position and the highest confidence reported for it. Labels are
/// compared case-insensitively after trimming.
pub fn collapse_labels<I>(scores: I) -> Vec<(String, Confidence)>
where
    I: IntoIterator<Item = (String, Confidence)>,
{
    let mut out: Vec<(String, Confidence)> = Vec::new();
    for (label, confidence) in scores {
        let label = label.trim().to_string();
        if label.is_empty() {
            continue;
        }
        match out
            .iter_mut()
            .find(|(seen, _)| seen.eq_ignore_ascii_case(&label))
        {
            Some((_, best)) if confidence > *best => *best = confidence,
            Some(_) => {}
            None => out.push((label, confidence)),
        }
    }
    out
}
