//! Subscription HTTP Handlers

use axum::extract::{Path, State};
use sqlx::PgPool;

use super::db;
use crate::backend::auth::users::user_exists;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::models::{SubscribedChannel, Subscriber, SubscriptionToggle};
use crate::shared::validation::parse_id;
use crate::shared::ApiResponse;

/// `POST /c/{channelId}`
pub async fn toggle_subscription(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<SubscriptionToggle> {
    let pool = require_pool(&pool)?;
    let channel_id = parse_id(&channel_id, "channel")?;

    if channel_id == auth.user_id {
        return Err(BackendError::bad_request("You cannot subscribe to your own channel"));
    }
    if !user_exists(pool, channel_id).await? {
        return Err(BackendError::not_found("Channel not found"));
    }

    let result = db::toggle_subscription(pool, auth.user_id, channel_id).await?;
    let message = if result.subscribed {
        "Subscribed successfully"
    } else {
        "Unsubscribed successfully"
    };
    tracing::debug!("{} -> channel {}: {}", auth.username, channel_id, message);

    Ok(ApiResponse::ok(result, message))
}

/// `GET /c/{channelId}`
pub async fn get_user_channel_subscribers(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(channel_id): Path<String>,
) -> ApiResult<Vec<Subscriber>> {
    let pool = require_pool(&pool)?;
    let channel_id = parse_id(&channel_id, "channel")?;

    if !user_exists(pool, channel_id).await? {
        return Err(BackendError::not_found("Channel not found"));
    }
    let subscribers = db::channel_subscribers(pool, channel_id).await?;

    Ok(ApiResponse::ok(subscribers, "Subscribers fetched successfully"))
}

/// `GET /u/{subscriberId}`
pub async fn get_subscribed_channels(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(subscriber_id): Path<String>,
) -> ApiResult<Vec<SubscribedChannel>> {
    let pool = require_pool(&pool)?;
    let subscriber_id = parse_id(&subscriber_id, "subscriber")?;

    if !user_exists(pool, subscriber_id).await? {
        return Err(BackendError::not_found("User not found"));
    }
    let channels = db::subscribed_channels(pool, subscriber_id).await?;

    Ok(ApiResponse::ok(channels, "Subscribed channels fetched successfully"))
}
