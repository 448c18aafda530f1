//! Provider client configuration.

use std::time::Duration;

use analysis::ProviderCredential;

/// Deepgram's public API origin.
pub const DEFAULT_BASE_URL: &str = "https://api.deepgram.com";

/// Upper bound on one provider round trip.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Everything [`crate::ReadClient`] needs to reach the provider.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// API key sent on every call.
    pub credential: ProviderCredential,
    /// Origin of the provider API, without a trailing path.
    pub base_url: String,
    /// Whole-request timeout (connect + send + receive).
    pub timeout: Duration,
}

impl ProviderConfig {
    /// Configuration pointing at the public Deepgram API with the default timeout.
    pub fn new(credential: ProviderCredential) -> Self {
        Self {
            credential,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Overrides the API origin (proxies, tests).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Overrides the request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Full URL of the read endpoint.
    pub(crate) fn read_url(&self) -> String {
        format!("{}/v1/read", self.base_url.trim_end_matches('/'))
    }
}
