//! Channel dashboard

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Aggregate numbers for one channel
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ChannelStats {
    pub total_views: i64,
    pub total_videos: i64,
    pub total_subscribers: i64,
    /// Likes received on the channel's videos
    pub total_likes: i64,
}

/// One of the caller's own videos, published or not
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct DashboardVideo {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub video_file: String,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub likes_count: i64,
    pub comments_count: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
