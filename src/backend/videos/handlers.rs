//! Video HTTP Handlers
//!
//! Handlers for `/api/v1/videos`. Listing endpoints are paginated and
//! sortable; every mutation is restricted to the video's owner.

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
};
use axum::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::db::{self, NewVideo, VideoFilter, VideoUpdate};
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::shared::models::{
    CreateVideoRequest, UpdateVideoRequest, Video, VideoCard, VideoDetail, VideoSortField,
};
use crate::shared::pagination::{ListQuery, Page, SortDirection};
use crate::shared::validation::{non_blank, parse_id};
use crate::shared::{ApiResponse, Empty, SharedError};

const MIN_TITLE_LEN: usize = 2;

/// Load a video and check the caller owns it
async fn owned_video(pool: &PgPool, video_id: Uuid, user_id: Uuid) -> Result<Video, BackendError> {
    let video = db::get_video(pool, video_id)
        .await?
        .ok_or_else(|| BackendError::not_found("video not found"))?;

    if video.owner != user_id {
        tracing::warn!("User {} tried to modify video {} owned by {}", user_id, video_id, video.owner);
        return Err(BackendError::forbidden("You are not the owner of this video"));
    }

    Ok(video)
}

fn check_title(title: &str) -> Result<(), BackendError> {
    if title.chars().count() < MIN_TITLE_LEN {
        return Err(SharedError::validation(
            "title",
            format!("Title must be at least {MIN_TITLE_LEN} characters"),
        )
        .into());
    }
    Ok(())
}

async fn list(
    pool: &PgPool,
    query: &ListQuery,
    mut filter: VideoFilter,
) -> Result<Page<VideoCard>, BackendError> {
    let pagination = query.pagination()?;
    let sort = query.sort::<VideoSortField>(SortDirection::Desc)?;
    filter.title_query = non_blank(query.query.as_deref()).map(str::to_string);

    Ok(db::list_videos(pool, &filter, sort, pagination).await?)
}

/// `GET /public` - published videos, no authentication
pub async fn get_public_videos(
    State(pool): State<Option<PgPool>>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<VideoCard>> {
    let pool = require_pool(&pool)?;
    let Query(query) = query?;

    let filter = VideoFilter {
        published_only: true,
        ..VideoFilter::default()
    };
    let page = list(pool, &query, filter).await?;

    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

/// `GET /?userId=` - a channel's videos
///
/// Owners see their unpublished videos too.
pub async fn get_all_videos(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<VideoCard>> {
    let pool = require_pool(&pool)?;
    let Query(query) = query?;

    let owner = match non_blank(query.user_id.as_deref()) {
        Some(raw) => Some(
            Uuid::parse_str(raw).map_err(|_| BackendError::bad_request("Invalid Channel ID"))?,
        ),
        None => None,
    };

    let filter = VideoFilter {
        published_only: owner != Some(auth.user_id),
        owner,
        ..VideoFilter::default()
    };
    let page = list(pool, &query, filter).await?;

    Ok(ApiResponse::ok(page, "Videos fetched successfully"))
}

/// `GET /panel/{videoId}` - published videos to play next
pub async fn get_next_videos(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<VideoCard>> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let Query(query) = query?;

    if !db::video_visible(pool, video_id, auth.user_id).await? {
        return Err(BackendError::not_found("video not found"));
    }

    let filter = VideoFilter {
        published_only: true,
        exclude: Some(video_id),
        ..VideoFilter::default()
    };
    let page = list(pool, &query, filter).await?;

    Ok(ApiResponse::ok(page, "Next videos fetched successfully"))
}

/// `POST /` - create a video, unpublished
pub async fn publish_a_video(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<CreateVideoRequest>, JsonRejection>,
) -> ApiResult<Video> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;

    let (Some(title), Some(description)) = (
        non_blank(request.title.as_deref()),
        non_blank(request.description.as_deref()),
    ) else {
        return Err(BackendError::bad_request("Title and Description required"));
    };

    let (Some(video_file), Some(thumbnail)) = (
        non_blank(request.video_file.as_deref()),
        non_blank(request.thumbnail.as_deref()),
    ) else {
        return Err(BackendError::bad_request("All files required"));
    };

    check_title(title)?;

    let duration = request
        .duration
        .filter(|d| d.is_finite() && *d >= 0.0)
        .ok_or_else(|| {
            SharedError::validation("duration", "Duration must be a non-negative number of seconds")
        })?;

    let new_video = NewVideo {
        title: title.to_string(),
        description: description.to_string(),
        video_file: video_file.to_string(),
        video_file_id: non_blank(request.video_file_id.as_deref()).map(str::to_string),
        thumbnail: thumbnail.to_string(),
        thumbnail_id: non_blank(request.thumbnail_id.as_deref()).map(str::to_string),
        duration,
    };

    let video = db::create_video(pool, auth.user_id, &new_video).await?;
    tracing::info!("Video {} created by {}", video.id, auth.username);

    Ok(ApiResponse::created(video, "Video uploaded successfully"))
}

/// `GET /{videoId}`
pub async fn get_video_by_id(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<VideoDetail> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;

    let video = db::video_detail(pool, video_id, auth.user_id)
        .await?
        .ok_or_else(|| BackendError::not_found("video not found"))?;

    Ok(ApiResponse::ok(video, "Video fetched successfully"))
}

/// `PATCH /{videoId}`
pub async fn update_video(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
    body: Result<Json<UpdateVideoRequest>, JsonRejection>,
) -> ApiResult<Video> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let Json(request) = body?;

    let update = VideoUpdate {
        title: non_blank(request.title.as_deref()).map(str::to_string),
        description: non_blank(request.description.as_deref()).map(str::to_string),
        thumbnail: non_blank(request.thumbnail.as_deref()).map(str::to_string),
        thumbnail_id: non_blank(request.thumbnail_id.as_deref()).map(str::to_string),
    };

    if update.title.is_none() && update.description.is_none() && update.thumbnail.is_none() {
        return Err(BackendError::bad_request("Must provide field to update"));
    }
    if let Some(title) = &update.title {
        check_title(title)?;
    }

    owned_video(pool, video_id, auth.user_id).await?;
    let video = db::update_video(pool, video_id, &update).await?;

    Ok(ApiResponse::ok(video, "Video updated successfully"))
}

/// `DELETE /{videoId}`
pub async fn delete_video(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Empty> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;

    owned_video(pool, video_id, auth.user_id).await?;
    if !db::delete_video(pool, video_id).await? {
        return Err(BackendError::not_found("video not found"));
    }
    tracing::info!("Video {} deleted by {}", video_id, auth.username);

    Ok(ApiResponse::ok(Empty {}, "Video deleted successfully"))
}

/// `PATCH /toggle/publish/{videoId}`
pub async fn toggle_publish_status(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Video> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;

    owned_video(pool, video_id, auth.user_id).await?;
    let video = db::toggle_published(pool, video_id).await?;

    Ok(ApiResponse::ok(video, "Video publish status toggled successfully"))
}

/// `PATCH /views/{videoId}` - count a view and record it in the caller's history
pub async fn update_video_views(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
) -> ApiResult<Video> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;

    if !db::video_visible(pool, video_id, auth.user_id).await? {
        return Err(BackendError::not_found("video not found"));
    }

    let video = db::record_view(pool, video_id, auth.user_id).await?;

    Ok(ApiResponse::ok(video, "Video views updated successfully"))
}
