//! Dashboard HTTP Handlers

use axum::extract::State;
use sqlx::PgPool;

use super::db;
use crate::backend::error::ApiResult;
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::models::{ChannelStats, DashboardVideo};
use crate::shared::ApiResponse;

/// `GET /stats`
pub async fn get_channel_stats(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> ApiResult<ChannelStats> {
    let pool = require_pool(&pool)?;
    let stats = db::channel_stats(pool, auth.user_id).await?;

    Ok(ApiResponse::ok(stats, "Channel stats fetched successfully"))
}

/// `GET /videos`
pub async fn get_channel_videos(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> ApiResult<Vec<DashboardVideo>> {
    let pool = require_pool(&pool)?;
    let videos = db::channel_videos(pool, auth.user_id).await?;

    Ok(ApiResponse::ok(videos, "Channel videos fetched successfully"))
}
