pub mod analyze;
pub mod health;
pub mod metadata;

pub use analyze::analyze;
pub use health::health;
pub use metadata::metadata;

use utoipa_axum::{router::OpenApiRouter, routes};

use crate::state::AppState;

pub fn analysis_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(analyze::analyze))
}

pub fn service_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(health::health))
        .routes(routes!(metadata::metadata))
}
