//! Playlists
//!
//! A playlist holds an ordered set of videos: order of insertion, no
//! duplicates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;
use super::video::VideoCard;
use crate::shared::pagination::SortField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    /// Video ids in insertion order
    pub videos: Vec<Uuid>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Playlist as listed on a channel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct PlaylistSummary {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub total_videos: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub owner: UserSummary,
}

/// Playlist page with its videos
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistDetail {
    #[serde(flatten)]
    pub playlist: PlaylistSummary,
    pub videos: Vec<VideoCard>,
}

/// Create/update body; both fields are required
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlaylistRequest {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaylistSortField {
    CreatedAt,
    UpdatedAt,
    Name,
}

impl SortField for PlaylistSortField {
    const DEFAULT: Self = PlaylistSortField::CreatedAt;

    fn from_param(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            "name" => Some(Self::Name),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "p.created_at",
            Self::UpdatedAt => "p.updated_at",
            Self::Name => "p.name",
        }
    }
}
