use axum::extract::State;
use axum::Json;
use serde::Serialize;
use serde_json::Value;
use std::path::Path;
use utoipa::ToSchema;

use crate::error::{ApiError, ErrorEnvelope};
use crate::state::AppState;

/// Error code used for every metadata failure.
const METADATA_UNAVAILABLE: &str = "METADATA_UNAVAILABLE";

/// Contents of the `[meta]` table, passed through as JSON.
#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct AppMetadata(pub Value);

/// Application metadata (title, description, repository, ...) read from the
/// `[meta]` table of the configured TOML file.
///
/// The file is re-read on every call so it can be edited without a restart.
#[utoipa::path(
    get,
    path = "/api/metadata",
    tag = "Service",
    responses(
        (status = 200, description = "The `[meta]` table", body = AppMetadata),
        (status = 500, description = "File missing, unparsable, or without `[meta]`", body = ErrorEnvelope)
    )
)]
pub async fn metadata(State(state): State<AppState>) -> Result<Json<AppMetadata>, ApiError> {
    let meta = load_meta(&state.metadata_path).await.map_err(|message| {
        tracing::error!(path = %state.metadata_path.display(), %message, "Failed to read metadata");
        ApiError::internal(METADATA_UNAVAILABLE, message)
    })?;
    Ok(Json(AppMetadata(meta)))
}

async fn load_meta(path: &Path) -> Result<Value, String> {
    let name = path.display();
    let raw = tokio::fs::read_to_string(path)
        .await
        .map_err(|e| format!("Failed to read metadata file '{name}': {e}"))?;
    let mut table: toml::Table =
        toml::from_str(&raw).map_err(|e| format!("Failed to parse metadata file '{name}': {e}"))?;
    let meta = table
        .remove("meta")
        .ok_or_else(|| format!("Missing [meta] section in '{name}'"))?;
    serde_json::to_value(meta).map_err(|e| format!("Failed to convert metadata to JSON: {e}"))
}
