//! Request body decoding for the analysis endpoint.
//!
//! The endpoint accepts the same fields either as JSON or as an
//! `application/x-www-form-urlencoded` form. [`AnalyzeBody`] picks the decoder
//! from the `Content-Type` header and normalises both into
//! [`AnalyzeRequestBody`].

use axum::extract::{FromRequest, Request};
use axum::http::header::CONTENT_TYPE;
use axum::{Form, Json};
use serde::Deserialize;
use utoipa::ToSchema;

use crate::error::ApiError;

/// JSON body of `POST /api/text-intelligence`.
///
/// Exactly one of `text` and `url` must be non-empty.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalyzeRequestBody {
    /// Raw text to analyse.
    #[schema(example = "Customer called to upgrade their plan and was happy with the result.")]
    pub text: Option<String>,
    /// `http`/`https` URL of a document to analyse.
    pub url: Option<String>,
    /// Features to run: `summarize`, `topics`, `sentiment`, `intents`.
    #[serde(default)]
    #[schema(example = json!(["summarize", "sentiment"]))]
    pub features: Vec<String>,
    /// Language tag; defaults to `en`.
    pub language: Option<String>,
}

/// Form-encoded body of `POST /api/text-intelligence`.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct AnalyzeForm {
    pub text: Option<String>,
    pub url: Option<String>,
    /// Comma-separated feature names, e.g. `summarize,topics`.
    pub features: Option<String>,
    pub language: Option<String>,
}

impl From<AnalyzeForm> for AnalyzeRequestBody {
    fn from(form: AnalyzeForm) -> Self {
        let features = form
            .features
            .as_deref()
            .unwrap_or("")
            .split(',')
            .map(str::trim)
            .filter(|f| !f.is_empty())
            .map(str::to_string)
            .collect();
        Self {
            text: form.text,
            url: form.url,
            features,
            language: form.language,
        }
    }
}

/// Extractor that decodes the analysis body as JSON or form data.
#[derive(Debug)]
pub struct AnalyzeBody(pub AnalyzeRequestBody);

impl<S> FromRequest<S> for AnalyzeBody
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(|ct| ct.starts_with("application/x-www-form-urlencoded"))
            .unwrap_or(false);

        if is_form {
            let Form(form) = Form::<AnalyzeForm>::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            Ok(Self(form.into()))
        } else {
            let Json(body) = Json::<AnalyzeRequestBody>::from_request(req, state)
                .await
                .map_err(|e| ApiError::from_rejection(e.status(), e.body_text()))?;
            Ok(Self(body))
        }
    }
}
