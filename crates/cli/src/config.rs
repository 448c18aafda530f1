//! Command-line and environment configuration.

use std::path::PathBuf;
use std::time::Duration;

use analysis::ProviderCredential;
use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};

/// Primary environment variable holding the Deepgram API key.
pub const API_KEY_VAR: &str = "DEEPGRAM_API_KEY";

/// Provider-neutral fallback for the API key.
pub const FALLBACK_API_KEY_VAR: &str = "PROVIDER_API_KEY";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable lines.
    Text,
    /// One JSON object per event.
    Json,
}

/// Text intelligence HTTP server backed by Deepgram.
#[derive(Debug, Parser)]
#[command(name = "text-intelligence", version, about)]
pub struct Args {
    /// Interface to bind.
    #[arg(long, env = "HOST", default_value = "0.0.0.0")]
    pub host: String,

    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 8080)]
    pub port: u16,

    /// Origin of the Deepgram API.
    #[arg(long, env = "DEEPGRAM_API_URL", default_value = provider::config::DEFAULT_BASE_URL)]
    pub provider_url: String,

    /// Timeout for one provider round trip, in seconds.
    #[arg(long, env = "PROVIDER_TIMEOUT_SECS", default_value_t = 30)]
    pub timeout_secs: u64,

    /// TOML file whose `[meta]` table is served at `/api/metadata`.
    #[arg(long, env = "METADATA_FILE", default_value = "deepgram.toml")]
    pub metadata_file: PathBuf,

    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Text)]
    pub log_format: LogFormat,
}

impl Args {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn provider_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Resolves the provider credential through `lookup`, trying
/// [`API_KEY_VAR`] first and [`FALLBACK_API_KEY_VAR`] second.
///
/// Blank values count as unset. A missing key is logged at `error` before
/// being returned.
pub fn load_credential(lookup: impl Fn(&str) -> Option<String>) -> Result<ProviderCredential> {
    for var in [API_KEY_VAR, FALLBACK_API_KEY_VAR] {
        if let Some(credential) = lookup(var).and_then(ProviderCredential::new) {
            tracing::debug!(source = var, "provider credential loaded");
            return Ok(credential);
        }
    }
    tracing::error!(
        primary = API_KEY_VAR,
        fallback = FALLBACK_API_KEY_VAR,
        "Cannot start without a provider credential"
    );
    bail!(
        "{API_KEY_VAR} is not set. Create an API key at https://console.deepgram.com \
         and export it, or add it to a .env file next to the binary"
    )
}
