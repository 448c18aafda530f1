//! Analysis requests and the Request Validator.
//!
//! Callers hand the server an [`UnvalidatedRequest`]; [`validate`] turns it into
//! an [`AnalysisRequest`] whose invariants the provider client may rely on:
//!
//! - exactly one of text or URL is present and non-empty;
//! - the URL, if any, is an absolute `http`/`https` URL;
//! - the feature set is non-empty and every feature is recognised;
//! - the language tag is well formed.
//!
//! Validation has no side effects and never touches the provider.

use std::collections::BTreeSet;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{AnalysisError, InvalidInputCode};
use crate::identifiers::{LanguageCode, SourceUrl};

// ---------------------------------------------------------------------------
// Features
// ---------------------------------------------------------------------------

/// One analysis capability the provider can run.
///
/// The declaration order is the canonical order used when features are
/// listed (e.g. in provider query strings).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Feature {
    Summarize,
    Topics,
    Sentiment,
    Intents,
}

impl Feature {
    /// Returns the canonical lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Summarize => "summarize",
            Self::Topics => "topics",
            Self::Sentiment => "sentiment",
            Self::Intents => "intents",
        }
    }

    /// Interprets the value of a per-feature query flag such as
    /// `?summarize=true`.
    ///
    /// `true`/`false` are accepted for every feature; summarization also takes
    /// `v2` (the current summarizer). `v1` is a retired summarizer version and
    /// is rejected. An empty value counts as `false`.
    pub fn parse_flag(self, value: &str) -> Result<bool, AnalysisError> {
        match (self, value.trim().to_ascii_lowercase().as_str()) {
            (_, "true") => Ok(true),
            (_, "false" | "") => Ok(false),
            (Self::Summarize, "v2") => Ok(true),
            (Self::Summarize, "v1") => Err(AnalysisError::invalid(
                InvalidInputCode::InvalidFeatures,
                "Summarization v1 is no longer supported. Please use v2 or true.",
            )),
            (_, other) => Err(AnalysisError::invalid(
                InvalidInputCode::InvalidFeatures,
                format!("Invalid value '{other}' for feature flag '{}'", self.as_str()),
            )),
        }
    }
}

impl FromStr for Feature {
    type Err = AnalysisError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "summarize" | "summary" => Ok(Self::Summarize),
            "topics" | "topic" => Ok(Self::Topics),
            "sentiment" | "sentiments" => Ok(Self::Sentiment),
            "intents" | "intent" => Ok(Self::Intents),
            _ => Err(AnalysisError::invalid(
                InvalidInputCode::InvalidFeatures,
                format!(
                    "Unrecognized feature '{s}'; expected one of: summarize, topics, sentiment, intents"
                ),
            )),
        }
    }
}

impl std::fmt::Display for Feature {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------

/// A non-empty set of requested features.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureSet(BTreeSet<Feature>);

impl FeatureSet {
    /// Builds a set from any collection of features, returning `None` if it
    /// is empty. Duplicates collapse.
    pub fn new(features: impl IntoIterator<Item = Feature>) -> Option<Self> {
        let set: BTreeSet<Feature> = features.into_iter().collect();
        if set.is_empty() {
            None
        } else {
            Some(Self(set))
        }
    }

    /// Returns `true` if `feature` was requested.
    pub fn contains(&self, feature: Feature) -> bool {
        self.0.contains(&feature)
    }

    /// Iterates the requested features in canonical order.
    pub fn iter(&self) -> impl Iterator<Item = Feature> + '_ {
        self.0.iter().copied()
    }

    /// Number of requested features (always at least one).
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Display for FeatureSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<&str> = self.iter().map(Feature::as_str).collect();
        write!(f, "{}", names.join(","))
    }
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

/// What the provider should analyse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisSource {
    /// Inline text supplied by the caller.
    Text(String),
    /// A document the provider fetches itself.
    Url(SourceUrl),
}

impl AnalysisSource {
    /// Short label for logging (`"text"` or `"url"`). Never the content.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Url(_) => "url",
        }
    }
}

/// A validated analysis request.
///
/// Construct through [`validate`]; the fields are public for reading but the
/// invariants are only guaranteed for values produced by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    /// Text or URL to analyse.
    pub source: AnalysisSource,
    /// Capabilities to run (non-empty).
    pub features: FeatureSet,
    /// Language the provider should assume.
    pub language: LanguageCode,
}

/// The raw inbound shape, before any rule has been checked.
///
/// Empty strings are treated the same as absent fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnvalidatedRequest {
    pub text: Option<String>,
    pub url: Option<String>,
    /// Feature names as supplied; unknown names are rejected by [`validate`].
    #[serde(default)]
    pub features: Vec<String>,
    /// Per-feature switch values (`?summarize=v2`), read with
    /// [`Feature::parse_flag`] once the source rules have passed.
    #[serde(default)]
    pub flags: Vec<(Feature, String)>,
    pub language: Option<String>,
}

/// Checks every request rule and produces an [`AnalysisRequest`].
///
/// # Errors
///
/// Returns [`AnalysisError::InvalidInput`] naming the first violated rule.
pub fn validate(raw: UnvalidatedRequest) -> Result<AnalysisRequest, AnalysisError> {
    let text = raw.text.filter(|t| !t.is_empty());
    let url = raw.url.filter(|u| !u.is_empty());

    let source = match (text, url) {
        (None, None) => {
            return Err(AnalysisError::invalid(
                InvalidInputCode::InvalidText,
                "Request must contain either 'text' or 'url' field",
            ));
        }
        (Some(_), Some(_)) => {
            return Err(AnalysisError::invalid(
                InvalidInputCode::InvalidText,
                "Request must contain either 'text' or 'url', not both",
            ));
        }
        (Some(text), None) => {
            if text.trim().is_empty() {
                return Err(AnalysisError::invalid(
                    InvalidInputCode::InvalidText,
                    "Text content cannot be empty",
                ));
            }
            AnalysisSource::Text(text)
        }
        (None, Some(url)) => match SourceUrl::new(url.trim()) {
            Some(url) => AnalysisSource::Url(url),
            None => {
                return Err(AnalysisError::invalid(
                    InvalidInputCode::InvalidUrl,
                    "Invalid URL format",
                ));
            }
        },
    };

    let mut parsed = raw
        .features
        .iter()
        .map(|name| name.parse::<Feature>())
        .collect::<Result<Vec<_>, _>>()?;
    for (feature, value) in &raw.flags {
        if feature.parse_flag(value)? {
            parsed.push(*feature);
        }
    }
    let features = FeatureSet::new(parsed).ok_or_else(|| {
        AnalysisError::invalid(
            InvalidInputCode::InvalidFeatures,
            "At least one feature must be requested (summarize, topics, sentiment, intents)",
        )
    })?;

    let language = match raw.language.as_deref().map(str::trim) {
        None | Some("") => LanguageCode::default(),
        Some(tag) => LanguageCode::new(tag).ok_or_else(|| {
            AnalysisError::invalid(
                InvalidInputCode::InvalidLanguage,
                format!("Invalid language tag '{tag}'"),
            )
        })?,
    };

    tracing::debug!(
        source = source.kind(),
        features = %features,
        language = %language,
        "Analysis request validated"
    );

    Ok(AnalysisRequest {
        source,
        features,
        language,
    })
}
