/**
 * Server Initialization
 *
 * This module handles the initialization and setup of the Axum HTTP server:
 * database loading, state creation and route configuration.
 *
 * # Initialization Process
 *
 * 1. Connect to PostgreSQL and run migrations (if a URL is configured)
 * 2. Derive JWT keys from the configuration
 * 3. Create and configure the router
 *
 * A missing or unreachable database does not stop startup; data endpoints
 * then answer 503 and the healthcheck reports the state.
 */

use axum::Router;
use sqlx::PgPool;

use crate::backend::routes::router::create_router;
use crate::backend::server::config::load_database;
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Build the router around an already-connected (or absent) pool
///
/// Tests use this directly to get an app without touching the network.
pub fn build_app(config: AppConfig, db_pool: Option<PgPool>) -> Router<()> {
    let app_state = AppState::new(config, db_pool);
    tracing::debug!(
        "App state ready (database: {})",
        if app_state.db_pool.is_some() { "configured" } else { "absent" }
    );
    create_router(app_state)
}

/// Create and configure the Axum application
pub async fn create_app(config: AppConfig) -> Router<()> {
    tracing::info!("Initializing VidTube backend server");

    let db_pool = load_database(&config).await;
    let app = build_app(config, db_pool);

    tracing::info!("Router configured");
    app
}
