//! HTTP error responses.
//!
//! Every failure leaves the server as the same envelope:
//!
//! ```json
//! { "error": { "type": "validation_error", "code": "INVALID_TEXT",
//!              "message": "...", "details": {} } }
//! ```

use analysis::{AnalysisError, InvalidInputCode};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};
use utoipa::ToSchema;

/// Error envelope returned by every endpoint.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorEnvelope {
    pub error: ErrorDetail,
}

/// Body of an [`ErrorEnvelope`].
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorDetail {
    /// Error class: `validation_error`, `upstream_error` or `internal_error`.
    #[serde(rename = "type")]
    pub kind: String,
    /// Stable machine-readable code (e.g. `INVALID_URL`, `UPSTREAM_ERROR`).
    pub code: String,
    /// Human-readable description.
    pub message: String,
    /// Extra structured context, e.g. `upstream_status`.
    #[schema(value_type = Object)]
    pub details: Value,
}

/// An error on its way to becoming an HTTP response.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    kind: &'static str,
    code: String,
    message: String,
    details: Value,
}

impl ApiError {
    /// A body or query string that could not be decoded at all. Keeps the
    /// extractor's status (400, 413, 415, ...).
    pub fn from_rejection(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            kind: "validation_error",
            code: InvalidInputCode::InvalidBody.as_str().to_string(),
            message: message.into(),
            details: json!({}),
        }
    }

    /// 500 for failures inside this server.
    pub fn internal(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            kind: "internal_error",
            code: code.into(),
            message: message.into(),
            details: json!({}),
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }

    pub fn code(&self) -> &str {
        &self.code
    }
}

impl From<AnalysisError> for ApiError {
    fn from(err: AnalysisError) -> Self {
        let (status, kind, details) = match &err {
            AnalysisError::InvalidInput { .. } => {
                (StatusCode::BAD_REQUEST, "validation_error", json!({}))
            }
            AnalysisError::UpstreamUnavailable { .. } => {
                (StatusCode::SERVICE_UNAVAILABLE, "upstream_error", json!({}))
            }
            AnalysisError::UpstreamError { status, .. } => (
                StatusCode::BAD_GATEWAY,
                "upstream_error",
                json!({ "upstream_status": status }),
            ),
            AnalysisError::UpstreamProtocolError { .. } => {
                (StatusCode::BAD_GATEWAY, "upstream_error", json!({}))
            }
            AnalysisError::Configuration { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal_error", json!({}))
            }
        };
        Self {
            status,
            kind,
            code: err.code().to_string(),
            message: err.to_string(),
            details,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (
            self.status,
            Json(ErrorEnvelope {
                error: ErrorDetail {
                    kind: self.kind.to_string(),
                    code: self.code,
                    message: self.message,
                    details: self.details,
                },
            }),
        )
            .into_response()
    }
}
