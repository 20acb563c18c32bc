/**
 * Channel Handlers
 *
 * `GET /api/v1/users/c/{username}` (channel profile with subscriber
 * counters) and `GET /api/v1/users/history` (the caller's watch history).
 */

use axum::extract::{Path, State};
use sqlx::PgPool;

use crate::backend::auth::users::{channel_profile, watch_history};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::models::{ChannelProfile, WatchedVideo};
use crate::shared::validation::non_blank;
use crate::shared::ApiResponse;

pub async fn get_channel_profile(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(username): Path<String>,
) -> ApiResult<ChannelProfile> {
    let pool = require_pool(&pool)?;

    let username = non_blank(Some(username.as_str()))
        .ok_or_else(|| BackendError::bad_request("username is missing"))?;

    let channel = channel_profile(pool, username, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Channel Not Found"))?;

    Ok(ApiResponse::ok(channel, "User channel fetched successfully"))
}

pub async fn get_watch_history(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> ApiResult<Vec<WatchedVideo>> {
    let pool = require_pool(&pool)?;

    let history = watch_history(pool, auth.user_id).await?;

    Ok(ApiResponse::ok(history, "Watch history fetched successfully"))
}
