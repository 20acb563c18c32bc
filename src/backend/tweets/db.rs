//! Tweet Database Operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::{Tweet, TweetView};

const TWEET_COLUMNS: &str = "id, content, owner_id, is_edited, created_at, updated_at";

pub async fn create_tweet(pool: &PgPool, owner: Uuid, content: &str) -> Result<Tweet, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "INSERT INTO tweets (id, content, owner_id) VALUES ($1, $2, $3) RETURNING {TWEET_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(owner)
    .fetch_one(pool)
    .await
}

pub async fn get_tweet(pool: &PgPool, id: Uuid) -> Result<Option<Tweet>, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!("SELECT {TWEET_COLUMNS} FROM tweets WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// A user's tweets, newest first, with like state relative to `viewer`
pub async fn user_tweets(pool: &PgPool, owner: Uuid, viewer: Uuid) -> Result<Vec<TweetView>, sqlx::Error> {
    sqlx::query_as::<_, TweetView>(
        r#"
        SELECT t.id, t.content, t.is_edited, t.created_at, t.updated_at,
               (SELECT COUNT(*) FROM likes l WHERE l.tweet_id = t.id) AS total_likes,
               EXISTS(SELECT 1 FROM likes l WHERE l.tweet_id = t.id AND l.liked_by = $2) AS is_liked,
               u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
               u.avatar AS u_avatar
        FROM tweets t
        JOIN users u ON u.id = t.owner_id
        WHERE t.owner_id = $1
        ORDER BY t.created_at DESC, t.id DESC
        "#,
    )
    .bind(owner)
    .bind(viewer)
    .fetch_all(pool)
    .await
}

pub async fn update_tweet(pool: &PgPool, id: Uuid, content: &str) -> Result<Tweet, sqlx::Error> {
    sqlx::query_as::<_, Tweet>(&format!(
        "UPDATE tweets SET content = $1, is_edited = TRUE, updated_at = NOW() \
         WHERE id = $2 RETURNING {TWEET_COLUMNS}"
    ))
    .bind(content)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_tweet(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM tweets WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
