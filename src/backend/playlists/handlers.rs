//! Playlist HTTP Handlers

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
};
use axum::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::auth::users::user_exists;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::backend::videos::db::video_visible;
use crate::shared::models::{
    Playlist, PlaylistDetail, PlaylistRequest, PlaylistSortField, PlaylistSummary,
};
use crate::shared::pagination::{ListQuery, Page, SortDirection};
use crate::shared::validation::{non_blank, parse_id};
use crate::shared::{ApiResponse, Empty};

const NOT_FOUND: &str = "Playlist not found";

/// Both `name` and `description`, trimmed
fn name_and_description(request: &PlaylistRequest) -> Result<(&str, &str), BackendError> {
    match (
        non_blank(request.name.as_deref()),
        non_blank(request.description.as_deref()),
    ) {
        (Some(name), Some(description)) => Ok((name, description)),
        _ => Err(BackendError::bad_request(
            "name and description is required to create playlist",
        )),
    }
}

async fn owned_playlist(pool: &PgPool, playlist_id: Uuid, user_id: Uuid) -> Result<Playlist, BackendError> {
    let playlist = db::get_playlist(pool, playlist_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;

    if playlist.owner != user_id {
        return Err(BackendError::forbidden("You are not the owner of this playlist"));
    }
    Ok(playlist)
}

/// `POST /`
pub async fn create_playlist(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    body: Result<Json<PlaylistRequest>, JsonRejection>,
) -> ApiResult<Playlist> {
    let pool = require_pool(&pool)?;
    let Json(request) = body?;
    let (name, description) = name_and_description(&request)?;

    let playlist = db::create_playlist(pool, auth.user_id, name, description).await?;
    tracing::debug!("Playlist {} created by {}", playlist.id, auth.username);

    Ok(ApiResponse::created(playlist, "Playlist created successfully"))
}

/// `GET /user/{userId}`
pub async fn get_user_playlists(
    State(pool): State<Option<PgPool>>,
    AuthUser(_auth): AuthUser,
    Path(user_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<PlaylistSummary>> {
    let pool = require_pool(&pool)?;
    let user_id = parse_id(&user_id, "user")?;
    let Query(query) = query?;

    let pagination = query.pagination()?;
    let sort = query.sort::<PlaylistSortField>(SortDirection::Asc)?;

    if !user_exists(pool, user_id).await? {
        return Err(BackendError::not_found("User not found"));
    }
    let page = db::user_playlists(pool, user_id, sort, pagination).await?;

    Ok(ApiResponse::ok(page, "Playlists fetched successfully"))
}

/// `GET /{playlistId}`
pub async fn get_playlist_by_id(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(playlist_id): Path<String>,
) -> ApiResult<PlaylistDetail> {
    let pool = require_pool(&pool)?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    let playlist = db::playlist_summary(pool, playlist_id)
        .await?
        .ok_or_else(|| BackendError::not_found(NOT_FOUND))?;
    let videos = db::playlist_videos(pool, playlist_id, auth.user_id).await?;

    Ok(ApiResponse::ok(
        PlaylistDetail { playlist, videos },
        "Playlist fetched successfully",
    ))
}

/// `PATCH /{playlistId}`
pub async fn update_playlist(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(playlist_id): Path<String>,
    body: Result<Json<PlaylistRequest>, JsonRejection>,
) -> ApiResult<Playlist> {
    let pool = require_pool(&pool)?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;
    let Json(request) = body?;
    let (name, description) = name_and_description(&request)?;

    owned_playlist(pool, playlist_id, auth.user_id).await?;
    let playlist = db::update_playlist(pool, playlist_id, name, description).await?;

    Ok(ApiResponse::ok(playlist, "Playlist updated successfully"))
}

/// `DELETE /{playlistId}`
pub async fn delete_playlist(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(playlist_id): Path<String>,
) -> ApiResult<Empty> {
    let pool = require_pool(&pool)?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    owned_playlist(pool, playlist_id, auth.user_id).await?;
    db::delete_playlist(pool, playlist_id).await?;

    Ok(ApiResponse::ok(Empty {}, "Playlist deleted successfully"))
}

/// `PATCH /add/{videoId}/{playlistId}`
pub async fn add_video_to_playlist(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> ApiResult<Playlist> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    owned_playlist(pool, playlist_id, auth.user_id).await?;

    if !video_visible(pool, video_id, auth.user_id).await? {
        return Err(BackendError::not_found("video not found"));
    }

    let playlist = db::add_video(pool, playlist_id, video_id).await?;

    Ok(ApiResponse::ok(playlist, "Video added to playlist successfully"))
}

/// `PATCH /remove/{videoId}/{playlistId}`
pub async fn remove_video_from_playlist(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path((video_id, playlist_id)): Path<(String, String)>,
) -> ApiResult<Playlist> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let playlist_id = parse_id(&playlist_id, "playlist")?;

    owned_playlist(pool, playlist_id, auth.user_id).await?;
    let playlist = db::remove_video(pool, playlist_id, video_id).await?;

    Ok(ApiResponse::ok(playlist, "Video removed from playlist successfully"))
}
