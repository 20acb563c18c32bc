//! Comment HTTP Handlers

use axum::extract::{
    rejection::{JsonRejection, QueryRejection},
    Path, Query, State,
};
use axum::Json;
use sqlx::PgPool;
use uuid::Uuid;

use super::db;
use crate::backend::error::{ApiResult, BackendError};
use crate::backend::middleware::AuthUser;
use crate::backend::server::state::require_pool;
use crate::backend::videos::db::video_visible;
use crate::shared::models::{Comment, CommentSortField, CommentView, ContentRequest};
use crate::shared::pagination::{ListQuery, Page, SortDirection};
use crate::shared::validation::{parse_id, required};
use crate::shared::{ApiResponse, Empty};

async fn owned_comment(pool: &PgPool, comment_id: Uuid, user_id: Uuid) -> Result<Comment, BackendError> {
    let comment = db::get_comment(pool, comment_id)
        .await?
        .ok_or_else(|| BackendError::not_found("Comment not found"))?;

    if comment.owner != user_id {
        return Err(BackendError::forbidden("You are not the owner of this comment"));
    }
    Ok(comment)
}

/// `GET /{videoId}`
pub async fn get_video_comments(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
    query: Result<Query<ListQuery>, QueryRejection>,
) -> ApiResult<Page<CommentView>> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let Query(query) = query?;

    let pagination = query.pagination()?;
    let sort = query.sort::<CommentSortField>(SortDirection::Desc)?;

    if !video_visible(pool, video_id, auth.user_id).await? {
        return Err(BackendError::not_found("video not found"));
    }

    let page = db::list_comments(pool, video_id, auth.user_id, sort, pagination).await?;

    Ok(ApiResponse::ok(page, "Comments fetched successfully"))
}

/// `POST /{videoId}`
pub async fn add_comment(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(video_id): Path<String>,
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let pool = require_pool(&pool)?;
    let video_id = parse_id(&video_id, "video")?;
    let Json(request) = body?;
    let content = required(request.content.as_deref(), "content", "Comment content required")?;

    if !video_visible(pool, video_id, auth.user_id).await? {
        return Err(BackendError::not_found("video not found"));
    }

    let comment = db::create_comment(pool, video_id, auth.user_id, content).await?;
    tracing::debug!("Comment {} added to video {} by {}", comment.id, video_id, auth.username);

    Ok(ApiResponse::created(comment, "Comment added successfully"))
}

/// `PATCH /c/{commentId}`
pub async fn update_comment(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<String>,
    body: Result<Json<ContentRequest>, JsonRejection>,
) -> ApiResult<Comment> {
    let pool = require_pool(&pool)?;
    let comment_id = parse_id(&comment_id, "comment")?;
    let Json(request) = body?;
    let content = required(request.content.as_deref(), "content", "Comment content required")?;

    owned_comment(pool, comment_id, auth.user_id).await?;
    let comment = db::update_comment(pool, comment_id, content).await?;

    Ok(ApiResponse::ok(comment, "Comment updated successfully"))
}

/// `DELETE /c/{commentId}`
pub async fn delete_comment(
    State(pool): State<Option<PgPool>>,
    AuthUser(auth): AuthUser,
    Path(comment_id): Path<String>,
) -> ApiResult<Empty> {
    let pool = require_pool(&pool)?;
    let comment_id = parse_id(&comment_id, "comment")?;

    owned_comment(pool, comment_id, auth.user_id).await?;
    db::delete_comment(pool, comment_id).await?;

    Ok(ApiResponse::ok(Empty {}, "Comment deleted successfully"))
}
