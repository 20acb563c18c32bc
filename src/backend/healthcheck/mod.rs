//! Healthcheck
//!
//! `GET /api/v1/healthcheck` always answers 200; the body reports whether the
//! database is reachable.

use axum::extract::State;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;

use crate::backend::error::ApiResult;
use crate::shared::ApiResponse;

/// Database reachability as reported by the healthcheck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DatabaseStatus {
    #[serde(rename = "connected")]
    Connected,
    #[serde(rename = "disconnected")]
    Disconnected,
    #[serde(rename = "not configured")]
    NotConfigured,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthStatus {
    pub status: String,
    pub database: DatabaseStatus,
}

async fn probe(pool: Option<&PgPool>) -> DatabaseStatus {
    let Some(pool) = pool else {
        return DatabaseStatus::NotConfigured;
    };

    match sqlx::query("SELECT 1").execute(pool).await {
        Ok(_) => DatabaseStatus::Connected,
        Err(e) => {
            tracing::warn!("Healthcheck database probe failed: {:?}", e);
            DatabaseStatus::Disconnected
        }
    }
}

/// `GET /healthcheck`
pub async fn healthcheck(State(pool): State<Option<PgPool>>) -> ApiResult<HealthStatus> {
    let database = probe(pool.as_ref()).await;

    Ok(ApiResponse::ok(
        HealthStatus {
            status: "OK".to_string(),
            database,
        },
        "Health check passed",
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_database_reports_not_configured() {
        let response = healthcheck(State(None)).await.unwrap();
        assert_eq!(response.status_code, 200);
        assert_eq!(response.data.database, DatabaseStatus::NotConfigured);

        let body = serde_json::to_value(&response.data).unwrap();
        assert_eq!(body, serde_json::json!({ "status": "OK", "database": "not configured" }));
    }
}
