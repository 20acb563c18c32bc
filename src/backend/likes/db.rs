//! Like Database Operations
//!
//! The partial unique indexes on `likes` keep one like per user and target,
//! so a toggle is a delete followed, when nothing was deleted, by an insert
//! that tolerates a concurrent duplicate.

use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::videos::db::{video_visible, VIDEO_CARD_SELECT};
use crate::shared::models::{Like, LikeTarget, LikeToggle, LikedVideo};

const LIKE_COLUMNS: &str = "id, video_id, comment_id, tweet_id, liked_by, created_at";

/// Whether `viewer` can see the liked record
///
/// Videos and comments on videos are hidden while the video is unpublished,
/// except from its owner.
pub async fn target_visible(
    pool: &PgPool,
    target: LikeTarget,
    viewer: Uuid,
) -> Result<bool, sqlx::Error> {
    match target {
        LikeTarget::Video(id) => video_visible(pool, id, viewer).await,
        LikeTarget::Comment(id) => {
            sqlx::query_scalar(
                r#"
                SELECT EXISTS(
                    SELECT 1 FROM comments c
                    JOIN videos v ON v.id = c.video_id
                    WHERE c.id = $1 AND (v.is_published OR v.owner_id = $2)
                )
                "#,
            )
            .bind(id)
            .bind(viewer)
            .fetch_one(pool)
            .await
        }
        LikeTarget::Tweet(id) => {
            sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM tweets WHERE id = $1)")
                .bind(id)
                .fetch_one(pool)
                .await
        }
    }
}

/// Flip the user's like on `target`
pub async fn toggle_like(
    pool: &PgPool,
    user_id: Uuid,
    target: LikeTarget,
) -> Result<LikeToggle, sqlx::Error> {
    let column = target.column();

    let removed: Option<Uuid> = sqlx::query_scalar(&format!(
        "DELETE FROM likes WHERE liked_by = $1 AND {column} = $2 RETURNING id"
    ))
    .bind(user_id)
    .bind(target.id())
    .fetch_optional(pool)
    .await?;

    if removed.is_some() {
        return Ok(LikeToggle {
            is_liked: false,
            like: None,
        });
    }

    let like = sqlx::query_as::<_, Like>(&format!(
        "INSERT INTO likes (id, {column}, liked_by) VALUES ($1, $2, $3) \
         ON CONFLICT DO NOTHING RETURNING {LIKE_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(target.id())
    .bind(user_id)
    .fetch_optional(pool)
    .await?;

    // No row back means a concurrent request created the like first
    Ok(LikeToggle {
        is_liked: true,
        like,
    })
}

/// Videos the user liked, most recent like first
///
/// Videos unpublished since the like are hidden unless the user owns them.
pub async fn liked_videos(pool: &PgPool, user_id: Uuid) -> Result<Vec<LikedVideo>, sqlx::Error> {
    sqlx::query_as::<_, LikedVideo>(&format!(
        r#"
        SELECT l.id AS like_id, l.created_at AS liked_at, {VIDEO_CARD_SELECT}
        FROM likes l
        JOIN videos v ON v.id = l.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE l.liked_by = $1 AND (v.is_published OR v.owner_id = $1)
        ORDER BY l.created_at DESC, l.id DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
