//! Route configuration.

use axum::Router;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::handlers::{guest_routes, health_routes};
use crate::openapi::ApiDoc;
use crate::state::AppState;

/// Mount point of the guests app, as the host platform routes it
pub const APP_BASE_PATH: &str = "/index.php/apps/guests";

/// Create the main router with all routes.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/health", health_routes())
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .nest(APP_BASE_PATH, guest_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
