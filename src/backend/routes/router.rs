/**
 * Router Configuration
 *
 * This module provides the main router creation function that combines
 * all route configurations into a single Axum router.
 *
 * # Layers
 *
 * Applied outermost first:
 * 1. `TraceLayer` - one span per request
 * 2. CORS for the configured origin
 * 3. Request body limit (16 KiB; bodies carry JSON and media URLs only)
 *
 * # Fallback
 *
 * Unknown paths get the standard JSON error body with status 404.
 */

use axum::extract::DefaultBodyLimit;
use axum::Router;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::backend::error::BackendError;
use crate::backend::routes::api_routes::configure_api_routes;
use crate::backend::server::config::cors_layer;
use crate::backend::server::state::AppState;

/// Maximum accepted request body
pub const BODY_LIMIT_BYTES: usize = 16 * 1024;

async fn route_not_found() -> BackendError {
    BackendError::not_found("Route not found")
}

/// Create the Axum router with all routes configured
///
/// # Routes
///
/// - `/api/v1/...` - the API (see [`configure_api_routes`])
/// - `/static/...` - files from the `public` directory
pub fn create_router(app_state: AppState) -> Router<()> {
    let cors = cors_layer(&app_state.config);

    Router::new()
        .nest("/api/v1", configure_api_routes(&app_state))
        .nest_service("/static", ServeDir::new("public"))
        .fallback(route_not_found)
        .layer(DefaultBodyLimit::max(BODY_LIMIT_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
