//! Port trait implemented by provider adapters.

use async_trait::async_trait;

use crate::errors::AnalysisError;
use crate::request::AnalysisRequest;
use crate::result::AnalysisResult;

/// A text intelligence service that can run the requested features.
///
/// Implementations own their credential and transport; they are constructed
/// once at startup and shared read-only between concurrent requests, hence
/// `Send + Sync`.
///
/// Each call to [`analyze`](TextIntelligenceProvider::analyze) performs one
/// upstream attempt. Implementations must not retry.
#[async_trait]
pub trait TextIntelligenceProvider: Send + Sync {
    /// Short provider name used in logs (e.g. `"deepgram"`).
    fn name(&self) -> &str;

    /// Runs `request` against the provider.
    ///
    /// # Errors
    ///
    /// - [`AnalysisError::UpstreamUnavailable`] when the provider cannot be reached.
    /// - [`AnalysisError::UpstreamError`] when it answers with a non-success status.
    /// - [`AnalysisError::UpstreamProtocolError`] when its answer cannot be decoded.
    async fn analyze(&self, request: &AnalysisRequest) -> Result<AnalysisResult, AnalysisError>;
}
