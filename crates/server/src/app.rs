use crate::state::AppState;
use crate::{api, logging};
use axum::middleware;
use axum::Router;
use tower_http::cors::{Any, CorsLayer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Path of the generated OpenAPI JSON document.
pub const OPENAPI_PATH: &str = "/api/openapi.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Text Intelligence API",
        description = "Summarization, topic detection, sentiment analysis and intent recognition, powered by Deepgram",
        version = "1.0.0",
    ),
    tags(
        (name = "Analysis", description = "Text intelligence"),
        (name = "Service", description = "Health and application metadata")
    )
)]
struct ApiDoc;

/// Builds the complete HTTP application: routes, documentation, CORS and
/// request logging.
pub fn build_http_app(state: AppState) -> Router {
    let (analysis_router, analysis_spec) = api::analysis_routes().split_for_parts();
    let (service_router, service_spec) = api::service_routes().split_for_parts();

    let mut spec = ApiDoc::openapi();
    spec.merge(analysis_spec);
    spec.merge(service_spec);

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    analysis_router
        .merge(service_router)
        .with_state(state)
        .merge(SwaggerUi::new("/docs").url(OPENAPI_PATH, spec))
        .layer(cors)
        .layer(middleware::from_fn(logging::request_logging))
}
