/**
 * User Model and Database Operations
 *
 * This module handles the stored user record and every query that reads or
 * writes the `users` table, plus the two channel views built on top of it:
 * the public channel profile and the caller's watch history.
 *
 * Usernames and emails are stored lowercase, so lookups lowercase their
 * input too.
 */

use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::backend::videos::db::VIDEO_CARD_SELECT;
use crate::shared::models::{ChannelProfile, WatchedVideo};

/// User as stored in the database
///
/// Not serializable: responses go through `UserResponse`, which leaves out
/// the password hash and refresh token.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    /// Unique, lowercase
    pub username: String,
    pub full_name: String,
    pub description: Option<String>,
    /// Unique, lowercase
    pub email: String,
    pub avatar: Option<String>,
    pub avatar_id: Option<String>,
    pub cover_image: Option<String>,
    pub cover_image_id: Option<String>,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Latest refresh token issued, `None` after logout
    pub refresh_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields for a new account
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub password_hash: String,
    pub avatar: String,
    pub avatar_id: Option<String>,
    pub cover_image: Option<String>,
    pub cover_image_id: Option<String>,
}

/// Profile fields a user may change; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub email: Option<String>,
    pub description: Option<String>,
}

const USER_COLUMNS: &str = "id, username, full_name, description, email, avatar, avatar_id, \
     cover_image, cover_image_id, password_hash, refresh_token, created_at, updated_at";

/// Create a new user
///
/// # Errors
/// A unique violation if the username or email is taken.
pub async fn create_user(pool: &PgPool, new_user: &NewUser) -> Result<User, sqlx::Error> {
    let now = Utc::now();

    sqlx::query_as::<_, User>(&format!(
        r#"
        INSERT INTO users (id, username, full_name, email, password_hash, avatar, avatar_id,
                           cover_image, cover_image_id, created_at, updated_at)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $10)
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(new_user.username.trim().to_lowercase())
    .bind(new_user.full_name.trim())
    .bind(new_user.email.trim().to_lowercase())
    .bind(&new_user.password_hash)
    .bind(&new_user.avatar)
    .bind(&new_user.avatar_id)
    .bind(&new_user.cover_image)
    .bind(&new_user.cover_image_id)
    .bind(now)
    .fetch_one(pool)
    .await
}

/// Get user by ID
pub async fn get_user_by_id(pool: &PgPool, id: Uuid) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Get user by username or email
pub async fn get_user_by_login(pool: &PgPool, identifier: &str) -> Result<Option<User>, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "SELECT {USER_COLUMNS} FROM users WHERE username = $1 OR email = $1 LIMIT 1"
    ))
    .bind(identifier.trim().to_lowercase())
    .fetch_optional(pool)
    .await
}

pub async fn user_exists(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE id = $1)")
        .bind(id)
        .fetch_one(pool)
        .await
}

/// Whether an account already uses this username or email
pub async fn username_or_email_taken(
    pool: &PgPool,
    username: &str,
    email: &str,
) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM users WHERE username = $1 OR email = $2)")
        .bind(username.trim().to_lowercase())
        .bind(email.trim().to_lowercase())
        .fetch_one(pool)
        .await
}

/// Store (or clear) the user's current refresh token
pub async fn set_refresh_token(
    pool: &PgPool,
    user_id: Uuid,
    token: Option<&str>,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET refresh_token = $1, updated_at = NOW() WHERE id = $2")
        .bind(token)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

pub async fn update_password(
    pool: &PgPool,
    user_id: Uuid,
    password_hash: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE users SET password_hash = $1, updated_at = NOW() WHERE id = $2")
        .bind(password_hash)
        .bind(user_id)
        .execute(pool)
        .await?;
    Ok(())
}

/// Apply a partial profile update
pub async fn update_profile(
    pool: &PgPool,
    user_id: Uuid,
    update: &ProfileUpdate,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        r#"
        UPDATE users
        SET full_name = COALESCE($1, full_name),
            email = COALESCE($2, email),
            description = COALESCE($3, description),
            updated_at = NOW()
        WHERE id = $4
        RETURNING {USER_COLUMNS}
        "#
    ))
    .bind(update.full_name.as_deref().map(str::trim))
    .bind(update.email.as_deref().map(|e| e.trim().to_lowercase()))
    .bind(update.description.as_deref().map(str::trim))
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn update_avatar(
    pool: &PgPool,
    user_id: Uuid,
    avatar: &str,
    avatar_id: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET avatar = $1, avatar_id = $2, updated_at = NOW() \
         WHERE id = $3 RETURNING {USER_COLUMNS}"
    ))
    .bind(avatar)
    .bind(avatar_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

pub async fn update_cover_image(
    pool: &PgPool,
    user_id: Uuid,
    cover_image: &str,
    cover_image_id: Option<&str>,
) -> Result<User, sqlx::Error> {
    sqlx::query_as::<_, User>(&format!(
        "UPDATE users SET cover_image = $1, cover_image_id = $2, updated_at = NOW() \
         WHERE id = $3 RETURNING {USER_COLUMNS}"
    ))
    .bind(cover_image)
    .bind(cover_image_id)
    .bind(user_id)
    .fetch_one(pool)
    .await
}

/// Public channel profile, with `isSubscribed` relative to `viewer`
pub async fn channel_profile(
    pool: &PgPool,
    username: &str,
    viewer: Uuid,
) -> Result<Option<ChannelProfile>, sqlx::Error> {
    sqlx::query_as::<_, ChannelProfile>(
        r#"
        SELECT u.id, u.username, u.full_name, u.description, u.avatar, u.cover_image, u.created_at,
               (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS subscribers_count,
               (SELECT COUNT(*) FROM subscriptions s WHERE s.subscriber_id = u.id) AS subscriptions_count,
               EXISTS(SELECT 1 FROM subscriptions s
                      WHERE s.channel_id = u.id AND s.subscriber_id = $2) AS is_subscribed
        FROM users u
        WHERE u.username = $1
        "#,
    )
    .bind(username.trim().to_lowercase())
    .bind(viewer)
    .fetch_optional(pool)
    .await
}

/// The user's watch history, most recently watched first
pub async fn watch_history(pool: &PgPool, user_id: Uuid) -> Result<Vec<WatchedVideo>, sqlx::Error> {
    sqlx::query_as::<_, WatchedVideo>(&format!(
        r#"
        SELECT h.watched_at, {VIDEO_CARD_SELECT}
        FROM watch_history h
        JOIN videos v ON v.id = h.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE h.user_id = $1 AND (v.is_published OR v.owner_id = $1)
        ORDER BY h.watched_at DESC, v.id DESC
        "#
    ))
    .bind(user_id)
    .fetch_all(pool)
    .await
}
