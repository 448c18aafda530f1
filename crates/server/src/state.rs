use std::path::PathBuf;
use std::sync::Arc;

use analysis::TextIntelligenceProvider;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    /// Upstream provider; owns the credential.
    pub provider: Arc<dyn TextIntelligenceProvider>,
    /// TOML file whose `[meta]` table `/api/metadata` serves.
    pub metadata_path: Arc<PathBuf>,
}

impl AppState {
    pub fn new(provider: Arc<dyn TextIntelligenceProvider>, metadata_path: impl Into<PathBuf>) -> Self {
        Self {
            provider,
            metadata_path: Arc::new(metadata_path.into()),
        }
    }
}
