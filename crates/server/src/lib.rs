//! Text intelligence HTTP surface.
//!
//! Exposes the analysis endpoint and its companions over axum, generates the
//! OpenAPI document from handler annotations, and serves Swagger UI.
//!
//! ## Routes
//!
//! | Method | Path | Handler |
//! |--------|------|---------|
//! | `POST` | `/api/text-intelligence` | [`api::analyze`] |
//! | `GET`  | `/api/metadata` | [`api::metadata`] |
//! | `GET`  | `/health` | [`api::health`] |
//! | `GET`  | `/api/openapi.json` | generated OpenAPI 3 document |
//! | `GET`  | `/docs` | Swagger UI |
//!
//! ## Architectural Layer
//!
//! **Infrastructure.** Request decoding, status mapping and documentation live
//! here. Business rules come from the [`analysis`] crate; the upstream call
//! goes through whatever [`analysis::TextIntelligenceProvider`] the composition
//! root injects into [`state::AppState`].

pub mod api;
pub mod app;
pub mod error;
pub mod extract;
pub mod logging;
pub mod state;

pub use app::build_http_app;
pub use state::AppState;
