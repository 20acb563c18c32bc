/**
 * Server Configuration
 *
 * This module turns the loaded [`AppConfig`] into live server resources:
 * the optional PostgreSQL pool (with migrations applied) and the CORS
 * layer.
 *
 * # Error Handling
 *
 * Database errors are logged but do not prevent server startup. Without a
 * pool the server still answers the healthcheck and returns 503 from every
 * data endpoint.
 */

use std::time::Duration;

use axum::http::{header, HeaderValue, Method};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};

use crate::shared::AppConfig;

/// Database configuration result
///
/// Contains the database connection pool if successfully configured,
/// or `None` if the database is not available.
pub type DatabaseConfig = Option<PgPool>;

/// Load and initialize the database connection pool
///
/// This function:
/// 1. Reads the database URL from the configuration
/// 2. Creates a PostgreSQL connection pool
/// 3. Runs database migrations
///
/// # Returns
///
/// - `Some(PgPool)` if database is successfully configured
/// - `None` if no URL is configured or the connection fails
pub async fn load_database(config: &AppConfig) -> DatabaseConfig {
    let database_url = match &config.database_url {
        Some(url) => url,
        None => {
            tracing::warn!("DATABASE_URL not set. Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Connecting to database...");

    let pool = match PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(5))
        .connect(database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to create database connection pool: {:?}", e);
            tracing::warn!("Database features will be disabled.");
            return None;
        }
    };

    tracing::info!("Database connection pool created successfully");

    tracing::info!("Running database migrations...");
    match sqlx::migrate!().run(&pool).await {
        Ok(_) => tracing::info!("Database migrations completed successfully"),
        Err(e) => {
            tracing::error!("Failed to run database migrations: {}", e);
            tracing::warn!("Continuing without migrations - database might not be up to date");
        }
    }

    Some(pool)
}

/// Build the CORS layer for the configured origin
///
/// `*` allows any origin without credentials; a concrete origin is echoed
/// back with credentials enabled so the auth cookies travel.
pub fn cors_layer(config: &AppConfig) -> CorsLayer {
    let base = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PATCH,
            Method::PUT,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    let origin = config.cors_origin.trim();
    if origin == "*" {
        return base.allow_origin(Any);
    }

    match HeaderValue::from_str(origin) {
        Ok(value) => base
            .allow_origin(AllowOrigin::exact(value))
            .allow_credentials(true),
        Err(_) => {
            tracing::warn!("Invalid CORS_ORIGIN {:?}, allowing any origin", origin);
            base.allow_origin(Any)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_database_without_url() {
        let config = AppConfig::default();
        assert!(load_database(&config).await.is_none());
    }
}
