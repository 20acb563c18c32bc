//! Video records and projections

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;
use crate::shared::pagination::SortField;

/// Stored video
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub video_file: String,
    pub video_file_id: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnail_id: Option<String>,
    pub title: String,
    pub description: Option<String>,
    /// Length in seconds
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// List projection used by feeds, playlists and liked videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoCard {
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
    pub created_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub owner: UserSummary,
}

/// Channel block of a video page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoOwner {
    #[serde(rename = "_id")]
    #[sqlx(rename = "u_id")]
    pub id: Uuid,
    #[sqlx(rename = "u_username")]
    pub username: String,
    #[sqlx(rename = "u_full_name")]
    pub full_name: String,
    #[sqlx(rename = "u_avatar")]
    pub avatar: Option<String>,
    pub total_subscribers: i64,
    /// Whether the viewer subscribes to this channel
    pub is_subscribed: bool,
}

/// Full video page: the video, its channel, and viewer-relative like state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct VideoDetail {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub video_file: String,
    pub thumbnail: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub duration: f64,
    pub views: i64,
    pub is_published: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub owner: VideoOwner,
    pub total_likes: i64,
    pub is_liked: bool,
}

/// `POST /videos` body; media are URLs produced by the client's uploader
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub video_file: Option<String>,
    pub video_file_id: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnail_id: Option<String>,
    pub duration: Option<f64>,
}

/// `PATCH /videos/{videoId}` body
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVideoRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnail_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VideoSortField {
    CreatedAt,
    UpdatedAt,
    Views,
    Duration,
    Title,
}

impl SortField for VideoSortField {
    const DEFAULT: Self = VideoSortField::CreatedAt;

    fn from_param(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "views" => Some(Self::Views),
            "duration" => Some(Self::Duration),
            "title" => Some(Self::Title),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "v.created_at",
            Self::UpdatedAt => "v.updated_at",
            Self::Views => "v.views",
            Self::Duration => "v.duration",
            Self::Title => "v.title",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sort_fields_are_whitelisted() {
        assert_eq!(VideoSortField::from_param("views"), Some(VideoSortField::Views));
        assert_eq!(VideoSortField::from_param("owner"), None);
        assert_eq!(VideoSortField::from_param("views; DROP TABLE videos"), None);
    }

    #[test]
    fn test_create_request_accepts_partial_body() {
        let req: CreateVideoRequest =
            serde_json::from_str(r#"{"title":"Intro","videoFile":"https://cdn/v.mp4"}"#).unwrap();
        assert_eq!(req.title.as_deref(), Some("Intro"));
        assert_eq!(req.video_file.as_deref(), Some("https://cdn/v.mp4"));
        assert!(req.duration.is_none());
    }
}
