//! User projections
//!
//! The full user record (with password hash and refresh token) stays on the
//! server side; these are the shapes that leave it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::video::VideoCard;

/// Compact user embedded in other records (video owner, subscriber, ...)
///
/// Queries select the user columns as `u_id`, `u_username`, `u_full_name`
/// and `u_avatar` so the summary can be flattened into any row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct UserSummary {
    #[serde(rename = "_id")]
    #[sqlx(rename = "u_id")]
    pub id: Uuid,
    #[sqlx(rename = "u_username")]
    pub username: String,
    #[sqlx(rename = "u_full_name")]
    pub full_name: String,
    #[sqlx(rename = "u_avatar")]
    pub avatar: Option<String>,
}

/// Public channel page, with counters relative to the viewer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelProfile {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub username: String,
    pub full_name: String,
    pub description: Option<String>,
    pub avatar: Option<String>,
    pub cover_image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub subscribers_count: i64,
    pub subscriptions_count: i64,
    pub is_subscribed: bool,
}

/// Watch-history entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct WatchedVideo {
    pub watched_at: DateTime<Utc>,
    #[serde(flatten)]
    #[sqlx(flatten)]
    pub video: VideoCard,
}
