//! Core domain for the text intelligence gateway.
//!
//! This crate contains the request and result types, the request validator,
//! the error taxonomy, and the [`TextIntelligenceProvider`] port. Infrastructure
//! crates implement the port; they never add request rules.
//!
//! ## Architectural Layer
//!
//! **Business logic + port definitions.** This crate has no I/O dependencies.
//! It defines *what* is needed; `provider` defines *how* to reach the upstream
//! service and `server` defines how callers reach us.
//!
//! ## Module Layout
//!
//! | Module | Contents |
//! |--------|----------|
//! | [`request`] | `Feature`, `FeatureSet`, `AnalysisRequest`, [`validate`] |
//! | [`result`] | `AnalysisResult` and its sections |
//! | [`identifiers`] | Newtype identifiers (`RequestId`, `LanguageCode`, `SourceUrl`) |
//! | [`types`] | Scored value types (`Confidence`, `SentimentScore`, `Timestamp`) |
//! | [`credential`] | `ProviderCredential` |
//! | [`errors`] | `AnalysisError` and `InvalidInputCode` |
//! | [`ports`] | `TextIntelligenceProvider` |

pub mod credential;
pub mod errors;
pub mod identifiers;
pub mod ports;
pub mod request;
pub mod result;
pub mod types;

// Re-export everything at the crate root for ergonomic usage by downstream crates.
pub use credential::ProviderCredential;
pub use errors::{AnalysisError, InvalidInputCode};
pub use identifiers::{LanguageCode, ModelUuid, RequestId, SourceUrl};
pub use ports::TextIntelligenceProvider;
pub use request::{
    validate, AnalysisRequest, AnalysisSource, Feature, FeatureSet, UnvalidatedRequest,
};
pub use result::{
    collapse_labels, AnalysisResult, FeatureModelInfo, IntentScore, ResultMetadata, Sentiment,
    TopicScore,
};
pub use types::{Confidence, SentimentLabel, SentimentScore, Timestamp, TokenCount};
