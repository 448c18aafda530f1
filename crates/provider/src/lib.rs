//! Text intelligence provider infrastructure adapter.
//!
//! Implements the [`analysis::TextIntelligenceProvider`] trait for Deepgram's
//! `/v1/read` Text Intelligence endpoint. Other providers are added as new
//! modules in this crate without any changes to the `analysis` crate.
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** HTTP transport, request formatting, response parsing
//! and status mapping live here. The [`analysis`] crate sees only
//! [`analysis::TextIntelligenceProvider`].
//!
//! ## Failure mapping
//!
//! | Upstream outcome | Error |
//! |------------------|-------|
//! | connect failure, timeout, truncated body | `UpstreamUnavailable` |
//! | non-2xx status | `UpstreamError { status, message }` |
//! | 2xx with undecodable body | `UpstreamProtocolError` |
//!
//! Every call is attempted exactly once.

pub mod config;
pub mod deepgram;
mod wire;

pub use config::ProviderConfig;
pub use deepgram::ReadClient;
