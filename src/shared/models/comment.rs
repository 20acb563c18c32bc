//! Comment records

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::user::UserSummary;
use crate::shared::pagination::SortField;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    #[sqlx(rename = "video_id")]
    pub video: Uuid,
    #[sqlx(rename = "owner_id")]
    pub owner: Uuid,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Comment as listed under a video
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct CommentView {
    #[serde(rename = "_id")]
    pub id: Uuid,
    pub content: String,
    pub is_edited: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes_count: i64,
    pub is_liked: bool,
    #[sqlx(flatten)]
    pub owner: UserSummary,
}

/// Body carrying a single `content` field (comments and tweets)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ContentRequest {
    pub content: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommentSortField {
    CreatedAt,
    UpdatedAt,
}

impl SortField for CommentSortField {
    const DEFAULT: Self = CommentSortField::CreatedAt;

    fn from_param(name: &str) -> Option<Self> {
        match name {
            "createdAt" => Some(Self::CreatedAt),
            "updatedAt" => Some(Self::UpdatedAt),
            _ => None,
        }
    }

    fn column(&self) -> &'static str {
        match self {
            Self::CreatedAt => "c.created_at",
            Self::UpdatedAt => "c.updated_at",
        }
    }
}
