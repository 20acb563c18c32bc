//! Tweet HTTP Handlers

use axum::extract::{rejection::JsonRejection, Path, State};
use axum::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::user_exists;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::models::{ContentRequest, Tweet, TweetView};
use crate::shared::validation::{parse_id, required};
use crate::shared::{ApiResponse, Empty};

const CONTENT_REQUIRED: &str = "Content is required to post a tweet";

async fn owned_tweet(
    pool: &PgPool,
    tweet_id: Uuid,
    user_id: Uuid,
    denied: &'static str,
) -> Result<Tweet, BackendError> {
    let tweet = db::get_tweet(pool, tweet_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Tweet not found"))?;

    if tweet.owner != user_id {
        return Err(BackendError::forbidden(denied));
    }
    Ok(tweet)
}

/// `POST /`
pub async fn create_tweet(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> ApiResult<Tweet> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;
    let content = required(request.content.as_deref(), "content", CONTENT_REQUIRED)?;

    let tweet = db::create_tweet(pool, auth.user_id, content).await?;

    Ok(ApiResponse::created(tweet, "Tweet created successfully"))
}

/// `GET /user/{userId}`
pub async fn get_user_tweets(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(user_id): Path<String>,
) -> ApiResult<Vec<TweetView>> {
    let pool = require_pool(&pool)?;
    let user_id = parse_id(&user_id, "user")?;

    if !user_exists(pool, user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }
    let tweets = db::user_tweets(pool, user_id, auth.user_id).await?;

    Ok(ApiResponse::ok(tweets, "Tweets fetched successfully"))
}

/// `PATCH /{tweetId}`
pub async fn update_tweet(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(tweet_id): Path<String>,
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> ApiResult<Tweet> {
    let pool = require_pool(&pool)?;
    let tweet_id = parse_id(&tweet_id, "tweet")?;
    let Json(request) = body?;
    let content = required(request.content.as_deref(), "content", CONTENT_REQUIRED)?;

    owned_tweet(pool, tweet_id, auth.user_id, "You are not authorized to update this tweet").await?;
    let tweet = db::update_tweet(pool, tweet_id, content).await?;

    Ok(ApiResponse::ok(tweet, "Tweet updated successfully"))
}

/// `DELETE /{tweetId}`
pub async fn delete_tweet(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(tweet_id): Path<String>,
) -> ApiResult<Empty> {
    let pool = require_pool(&pool)?;
    let tweet_id = parse_id(&tweet_id, "tweet")?;

    owned_tweet(pool, tweet_id, auth.user_id, "You are not authorized to delete this tweet").await?;
    db::delete_tweet(pool, tweet_id).await?;

    Ok(ApiResponse::ok(Empty {}, "Tweet deleted successfully"))
}
