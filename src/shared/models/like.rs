//! Likes
//!
//! A like points at exactly one of a video, a comment or a tweet.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::video::VideoCard;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Like {
    #[serde(rename = "_id")]
    pub id: Uuid,
    #[sqlx(rename = "video_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video: Option<Uuid>,
    #[sqlx(rename = "comment_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comment: Option<Uuid>,
    #[sqlx(rename = "tweet_id")]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tweet: Option<Uuid>,
    pub liked_by: Uuid,
    pub created_at: DateTime<Utc>,
}

/// What a like is attached to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LikeTarget {
    Video(Uuid),
    Comment(Uuid),
    Tweet(Uuid),
}

impl LikeTarget {
    pub fn id(&self) -> Uuid {
        match self {
            Self::Video(id) | Self::Comment(id) | Self::Tweet(id) => *id,
        }
    }

    /// Column of `likes` holding this kind of target
    pub fn column(&self) -> &'static str {
        match self {
            Self::Video(_) => "video_id",
            Self::Comment(_) => "comment_id",
            Self::Tweet(_) => "tweet_id",
        }
    }

    /// Lower-case noun used in messages ("video", "comment", "tweet")
    pub fn noun(&self) -> &'static str {
        match self {
            Self::Video(_) => "video",
            Self::Comment(_) => "comment",
            Self::Tweet(_) => "tweet",
        }
    }
}

impl fmt::Display for LikeTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.noun(), self.id())
    }
}

/// Result of a like toggle
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LikeToggle {
    pub is_liked: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub like: Option<Like>,
}

/// A video the caller liked, newest like first
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LikedVideo {
    /// Id of the like record
    #[serde(rename = "_id")]
    #[sqlx(rename = "like_id")]
    pub id: Uuid,
    pub liked_at: DateTime<Utc>,
    #[sqlx(flatten)]
    pub video: VideoCard,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_target_columns() {
        let id = Uuid::new_v4();
        assert_eq!(LikeTarget::Video(id).column(), "video_id");
        assert_eq!(LikeTarget::Comment(id).column(), "comment_id");
        assert_eq!(LikeTarget::Tweet(id).noun(), "tweet");
        assert_eq!(LikeTarget::Tweet(id).id(), id);
    }

    #[test]
    fn test_toggle_omits_absent_like() {
        let value = serde_json::to_value(LikeToggle { is_liked: false, like: None }).unwrap();
        assert_eq!(value, serde_json::json!({ "isLiked": false }));
    }
}
