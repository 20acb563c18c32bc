/**
 * Application State Management
 *
 * This module defines the application state structure and implements
 * the necessary `FromRef` traits for Axum state extraction.
 *
 * # Architecture
 *
 * `AppState` holds:
 * - The loaded configuration
 * - JWT signing keys and lifetimes
 * - The optional PostgreSQL pool
 *
 * Everything is cheap to clone (`Arc` or pool handles), so Axum can hand a
 * copy to every request.
 *
 * # State Extraction
 *
 * The `FromRef` implementations let handlers extract only what they need,
 * e.g. `State(pool): State<Option<PgPool>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;
use sqlx::PgPool;

use crate::backend::auth::sessions::TokenKeys;
use crate::backend::error::BackendError;
use crate::shared::AppConfig;

/// Application state shared by every handler
#[derive(Clone, Debug)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub tokens: Arc<TokenKeys>,
    /// Database connection pool
    ///
    /// This is `None` if the database is not configured. Handlers go
    /// through [`require_pool`], which turns that into a 503.
    pub db_pool: Option<PgPool>,
}

impl AppState {
    pub fn new(config: AppConfig, db_pool: Option<PgPool>) -> Self {
        let tokens = TokenKeys::from_config(&config);
        Self {
            config: Arc::new(config),
            tokens: Arc::new(tokens),
            db_pool,
        }
    }
}

/// Borrow the pool or fail with 503 `Database not configured`
pub fn require_pool(pool: &Option<PgPool>) -> Result<&PgPool, BackendError> {
    pool.as_ref().ok_or_else(|| {
        tracing::error!("Database not configured");
        BackendError::database_unavailable()
    })
}

impl FromRef<AppState> for Option<PgPool> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.db_pool.clone()
    }
}

impl FromRef<AppState> for Arc<TokenKeys> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.tokens.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.config.clone()
    }
}
