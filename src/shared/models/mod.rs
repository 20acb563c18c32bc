//! API Data Models
//!
//! Records and projections exchanged over the `/api/v1` surface. Row types
//! derive `sqlx::FromRow` directly so query results map onto the wire shape
//! without an intermediate struct.
//!
//! # Conventions
//!
//! - Identifiers serialize as `_id`, every other field is camelCase
//! - Related users are embedded as a [`UserSummary`]
//! - Counters (`likesCount`, `totalSubscribers`, ...) are computed per query
//!
//! # Usage
//!
//! ```rust
//! use vidtube::shared::models::{VideoCard, UserSummary, VideoSortField};
//! ```

pub mod user;
pub mod video;
pub mod comment;
pub mod like;
pub mod subscription;
pub mod tweet;
pub mod playlist;
pub mod dashboard;

pub use user::{ChannelProfile, UserSummary, WatchedVideo};
pub use video::{
    CreateVideoRequest, UpdateVideoRequest, Video, VideoCard, VideoDetail, VideoOwner,
    VideoSortField,
};
pub use comment::{Comment, CommentSortField, CommentView, ContentRequest};
pub use like::{Like, LikeTarget, LikeToggle, LikedVideo};
pub use subscription::{SubscribedChannel, Subscriber, Subscription, SubscriptionToggle};
pub use tweet::{Tweet, TweetView};
pub use playlist::{Playlist, PlaylistDetail, PlaylistRequest, PlaylistSortField, PlaylistSummary};
pub use dashboard::{ChannelStats, DashboardVideo};
