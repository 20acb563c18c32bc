//! Comment Database Operations

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::shared::models::{Comment, CommentSortField, CommentView};
use crate::shared::pagination::{Page, Pagination, Sort};

const COMMENT_COLUMNS: &str = "id, content, video_id, owner_id, is_edited, created_at, updated_at";

/// One page of a video's comments, with like state relative to `viewer`
pub async fn list_comments(
    pool: &PgPool,
    video_id: Uuid,
    viewer: Uuid,
    sort: Sort<CommentSortField>,
    pagination: Pagination,
) -> Result<Page<CommentView>, sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments WHERE video_id = $1")
        .bind(video_id)
        .fetch_one(pool)
        .await?;

    let mut qb = QueryBuilder::<Postgres>::new(
        r#"
        SELECT c.id, c.content, c.is_edited, c.created_at, c.updated_at,
               (SELECT COUNT(*) FROM likes l WHERE l.comment_id = c.id) AS likes_count,
               EXISTS(SELECT 1 FROM likes l WHERE l.comment_id = c.id AND l.liked_by = "#,
    );
    qb.push_bind(viewer)
        .push(
            r#") AS is_liked,
               u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
               u.avatar AS u_avatar
        FROM comments c
        JOIN users u ON u.id = c.owner_id
        WHERE c.video_id = "#,
        )
        .push_bind(video_id)
        .push(" ORDER BY ")
        .push(sort.order_by("c.id"))
        .push(" LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let docs = qb.build_query_as::<CommentView>().fetch_all(pool).await?;

    Ok(Page::new(docs, total, pagination))
}

pub async fn create_comment(
    pool: &PgPool,
    video_id: Uuid,
    owner: Uuid,
    content: &str,
) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "INSERT INTO comments (id, content, video_id, owner_id) VALUES ($1, $2, $3, $4) \
         RETURNING {COMMENT_COLUMNS}"
    ))
    .bind(Uuid::new_v4())
    .bind(content)
    .bind(video_id)
    .bind(owner)
    .fetch_one(pool)
    .await
}

pub async fn get_comment(pool: &PgPool, id: Uuid) -> Result<Option<Comment>, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!("SELECT {COMMENT_COLUMNS} FROM comments WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Replace the content and mark the comment edited
pub async fn update_comment(pool: &PgPool, id: Uuid, content: &str) -> Result<Comment, sqlx::Error> {
    sqlx::query_as::<_, Comment>(&format!(
        "UPDATE comments SET content = $1, is_edited = TRUE, updated_at = NOW() \
         WHERE id = $2 RETURNING {COMMENT_COLUMNS}"
    ))
    .bind(content)
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a comment; its likes cascade
pub async fn delete_comment(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM comments WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}
