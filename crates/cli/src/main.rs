//! Text intelligence server entry point.
//!
//! This binary is the composition root. It:
//!
//! 1. Loads `.env` (when present) and parses [`config::Args`].
//! 2. Installs the tracing subscriber, with optional OTLP export.
//! 3. Resolves the Deepgram credential, exiting non-zero before binding when
//!    it is missing.
//! 4. Builds the [`provider::ReadClient`], injects it into
//!    [`server::AppState`] and serves until Ctrl-C or SIGTERM.

mod config;
mod observability;

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use provider::{ProviderConfig, ReadClient};
use server::{build_http_app, AppState};

use crate::config::Args;

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();
    let _telemetry = observability::init(args.log_format)?;

    let credential = config::load_credential(|key| std::env::var(key).ok())?;
    let provider_config = ProviderConfig::new(credential)
        .with_base_url(args.provider_url.clone())
        .with_timeout(args.provider_timeout());
    let client = ReadClient::new(provider_config).context("failed to create provider client")?;

    let state = AppState::new(Arc::new(client), args.metadata_file.clone());
    let app = build_http_app(state);

    let addr = args.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;

    tracing::info!(
        %addr,
        provider_url = %args.provider_url,
        timeout_secs = args.timeout_secs,
        "text intelligence server listening"
    );
    tracing::info!("  POST /api/text-intelligence");
    tracing::info!("  GET  /api/metadata");
    tracing::info!("  GET  /health");
    tracing::info!("  GET  /docs");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::warn!(error = %e, "failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to register SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("shutdown signal received");
}
