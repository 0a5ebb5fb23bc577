//! Route configuration.

use crate::handlers;
use crate::state::AppState;
use axum::extract::DefaultBodyLimit;
use axum::routing::{get, put};
use axum::Router;
use tower_http::trace::TraceLayer;

/// Create the application router.
pub fn create_router(state: AppState) -> Router {
    let max_push_bytes = state.config.server.max_push_bytes;

    Router::new()
        // Publish resource
        .route(
            "/package",
            put(handlers::put_package).get(handlers::package_method_not_allowed),
        )
        // Registration resource; any other /registrations path falls
        // through to the default 404
        .route(
            "/registrations/{id}/index.json",
            get(handlers::get_registration),
        )
        // Flat-container content resource
        .route("/content/{*key}", get(handlers::get_content))
        // Health probe (unauthenticated, for load balancers)
        .route("/health", get(handlers::health_check))
        .layer(DefaultBodyLimit::max(max_push_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
