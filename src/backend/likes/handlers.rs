//! Like HTTP Handlers

use axum::extract::{Path, State};
use sqlx::PgPool;

use super::db;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::{AuthUser, AuthenticatedUser};
use crate::backend::server::state::require_pool;
use crate::shared::models::{LikeTarget, LikeToggle, LikedVideo};
use crate::shared::validation::parse_id;
use crate::shared::ApiResponse;

fn toggle_message(target: LikeTarget, is_liked: bool) -> &'static str {
    match (target, is_liked) {
        (LikeTarget::Video(_), true) => "Like submitted successfully",
        (LikeTarget::Video(_), false) => "Like removed successfully",
        (LikeTarget::Comment(_), true) => "Comment like submitted successfully",
        (LikeTarget::Comment(_), false) => "Comment like removed successfully",
        (LikeTarget::Tweet(_), true) => "Tweet like submitted successfully",
        (LikeTarget::Tweet(_), false) => "Tweet like removed successfully",
    }
}

async fn toggle(
    pool: Option<PgPool>,
    auth: AuthenticatedUser,
    target: LikeTarget,
) -> ApiResult<LikeToggle> {
    let pool = require_pool(&pool)?;

    if !db::target_visible(pool, target, auth.user_id).await? {
        return Err(BackendError::not_found(format!("{} not found", target.noun())));
    }

    let result = db::toggle_like(pool, auth.user_id, target).await?;
    tracing::debug!("{} toggled like on {} (liked: {})", auth.username, target, result.is_liked);

    let message = toggle_message(target, result.is_liked);
    Ok(ApiResponse::ok(result, message))
}

/// `POST /toggle/v/{videoId}`
pub async fn toggle_video_like(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<LikeToggle> {
    let target = LikeTarget::Video(parse_id(&video_id, "video")?);
    toggle(pool, auth, target).await
}

/// `POST /toggle/c/{commentId}`
pub async fn toggle_comment_like(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<LikeToggle> {
    let target = LikeTarget::Comment(parse_id(&comment_id, "comment")?);
    toggle(pool, auth, target).await
}

/// `POST /toggle/t/{tweetId}`
pub async fn toggle_tweet_like(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(tweet_id): Path<String>,
) -> ApiResult<LikeToggle> {
    let target = LikeTarget::Tweet(parse_id(&tweet_id, "tweet")?);
    toggle(pool, auth, target).await
}

/// `GET /videos`
pub async fn get_liked_videos(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
) -> ApiResult<Vec<LikedVideo>> {
    let pool = require_pool(&pool)?;
    let videos = db::liked_videos(pool, auth.user_id).await?;

    Ok(ApiResponse::ok(videos, "Liked videos fetched successfully"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn test_toggle_messages_name_the_target() {
        let id = Uuid::new_v4();
        assert_eq!(toggle_message(LikeTarget::Video(id), true), "Like submitted successfully");
        assert_eq!(toggle_message(LikeTarget::Video(id), false), "Like removed successfully");
        assert_eq!(
            toggle_message(LikeTarget::Tweet(id), false),
            "Tweet like removed successfully"
        );
    }
}
