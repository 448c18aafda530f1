//! Error taxonomy for the text intelligence domain.
//!
//! [`AnalysisError`] distinguishes caller mistakes ([`AnalysisError::InvalidInput`])
//! from the three ways the upstream provider can fail. The HTTP surface maps
//! each variant to a status class; the variants themselves carry no transport
//! types so that this crate stays free of I/O dependencies.

use serde::{Deserialize, Serialize};
use thiserror::Error;

// ---------------------------------------------------------------------------
// Validation codes
// ---------------------------------------------------------------------------

/// Machine-readable reason attached to [`AnalysisError::InvalidInput`].
///
/// Serialised in `SCREAMING_SNAKE_CASE` (e.g. `"INVALID_TEXT"`), which is the
/// form clients match on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InvalidInputCode {
    /// Text is missing, blank, or supplied together with a URL.
    InvalidText,
    /// URL is not an absolute `http`/`https` URL.
    InvalidUrl,
    /// Feature set is empty, names an unknown feature, or requests a retired
    /// feature version.
    InvalidFeatures,
    /// Language tag is not a plausible BCP-47 tag.
    InvalidLanguage,
    /// Request body could not be decoded at all.
    InvalidBody,
}

impl InvalidInputCode {
    /// Returns the wire form of the code.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::InvalidText => "INVALID_TEXT",
            Self::InvalidUrl => "INVALID_URL",
            Self::InvalidFeatures => "INVALID_FEATURES",
            Self::InvalidLanguage => "INVALID_LANGUAGE",
            Self::InvalidBody => "INVALID_BODY",
        }
    }
}

impl std::fmt::Display for InvalidInputCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Domain errors
// ---------------------------------------------------------------------------

/// Every failure an analysis call can end in.
///
/// None of these is fatal to the process and none is retried: each is
/// surfaced to the HTTP caller exactly once.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    /// The caller's request violates a validation rule. Client-caused.
    #[error("{message}")]
    InvalidInput {
        /// Which rule was violated.
        code: InvalidInputCode,
        /// Human-readable description naming the violated constraint.
        message: String,
    },

    /// The provider could not be reached, timed out, or dropped the
    /// connection before a full response arrived.
    #[error("Text intelligence provider is unavailable: {message}")]
    UpstreamUnavailable {
        /// Description of the transport failure.
        message: String,
    },

    /// The provider answered with a non-success status.
    #[error("Text intelligence provider returned status {status}: {message}")]
    UpstreamError {
        /// HTTP status code returned by the provider.
        status: u16,
        /// Error message supplied by the provider (or a fallback).
        message: String,
    },

    /// The provider answered with a success status but the body could not be
    /// interpreted.
    #[error("Text intelligence provider sent an unreadable response: {message}")]
    UpstreamProtocolError {
        /// Description of the decoding failure.
        message: String,
    },

    /// Runtime configuration is invalid or incomplete.
    ///
    /// Produced at load time; the server never starts with an invalid config.
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration problem.
        message: String,
    },
}

impl AnalysisError {
    /// Shorthand for building an [`AnalysisError::InvalidInput`].
    pub fn invalid(code: InvalidInputCode, message: impl Into<String>) -> Self {
        Self::InvalidInput {
            code,
            message: message.into(),
        }
    }

    /// Returns `true` if the error was caused by the caller.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidInput { .. })
    }

    /// Returns `true` if the error originated at the provider.
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnavailable { .. }
                | Self::UpstreamError { .. }
                | Self::UpstreamProtocolError { .. }
        )
    }

    /// Stable machine-readable code for this error.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidInput { code, .. } => code.as_str(),
            Self::UpstreamUnavailable { .. } => "UPSTREAM_UNAVAILABLE",
            Self::UpstreamError { .. } => "UPSTREAM_ERROR",
            Self::UpstreamProtocolError { .. } => "UPSTREAM_PROTOCOL_ERROR",
            Self::Configuration { .. } => "CONFIGURATION_ERROR",
        }
    }
}
