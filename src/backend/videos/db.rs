//! Video Database Operations
//!
//! Listing queries are assembled with `QueryBuilder` so the optional
//! filters (owner, excluded video, title search) bind as parameters. The
//! sort column always comes from a whitelisted [`VideoSortField`].

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::shared::models::{Video, VideoCard, VideoDetail, VideoSortField};
use crate::shared::pagination::{Page, Pagination, Sort};
use crate::shared::validation::contains_pattern;

/// Column list of a [`VideoCard`]; expects `videos v JOIN users u ON u.id = v.owner_id`
pub(crate) const VIDEO_CARD_SELECT: &str = r#"
    v.id, v.title, v.description, v.thumbnail, v.video_file, v.duration, v.views,
    v.is_published, v.created_at,
    (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count,
    u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name, u.avatar AS u_avatar
"#;

const VIDEO_COLUMNS: &str = "id, video_file, video_file_id, thumbnail, thumbnail_id, title, \
     description, duration, views, is_published, owner_id, created_at, updated_at";

/// Which videos a listing covers
#[derive(Debug, Clone, Default)]
pub struct VideoFilter {
    pub published_only: bool,
    pub owner: Option<Uuid>,
    pub exclude: Option<Uuid>,
    /// Case-insensitive title substring
    pub title_query: Option<String>,
}

/// Fields of a new video
#[derive(Debug, Clone)]
pub struct NewVideo {
    pub title: String,
    pub description: String,
    pub video_file: String,
    pub video_file_id: Option<String>,
    pub thumbnail: String,
    pub thumbnail_id: Option<String>,
    pub duration: f64,
}

/// Partial update; `None` keeps the current value
#[derive(Debug, Clone, Default)]
pub struct VideoUpdate {
    pub title: Option<String>,
    pub description: Option<String>,
    pub thumbnail: Option<String>,
    pub thumbnail_id: Option<String>,
}

fn push_filters(qb: &mut QueryBuilder<'_, Postgres>, filter: &VideoFilter) {
    if filter.published_only {
        qb.push(" AND v.is_published");
    }
    if let Some(owner) = filter.owner {
        qb.push(" AND v.owner_id = ").push_bind(owner);
    }
    if let Some(exclude) = filter.exclude {
        qb.push(" AND v.id <> ").push_bind(exclude);
    }
    if let Some(query) = filter.title_query.as_deref() {
        qb.push(" AND v.title ILIKE ")
            .push_bind(contains_pattern(Some(query)));
    }
}

/// One page of video cards
pub async fn list_videos(
    pool: &PgPool,
    filter: &VideoFilter,
    sort: Sort<VideoSortField>,
    pagination: Pagination,
) -> Result<Page<VideoCard>, sqlx::Error> {
    let mut count = QueryBuilder::<Postgres>::new("SELECT COUNT(*) FROM videos v WHERE TRUE");
    push_filters(&mut count, filter);
    let total: i64 = count.build_query_scalar::<i64>().fetch_one(pool).await?;

    let mut qb = QueryBuilder::<Postgres>::new(format!(
        "SELECT {VIDEO_CARD_SELECT} FROM videos v JOIN users u ON u.id = v.owner_id WHERE TRUE"
    ));
    push_filters(&mut qb, filter);
    qb.push(" ORDER BY ")
        .push(sort.order_by("v.id"))
        .push(" LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let docs = qb.build_query_as::<VideoCard>().fetch_all(pool).await?;

    Ok(Page::new(docs, total, pagination))
}

pub async fn create_video(pool: &PgPool, owner: Uuid, video: &NewVideo) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        r#"
        INSERT INTO videos (id, video_file, video_file_id, thumbnail, thumbnail_id, title,
                            description, duration, owner_id, is_published)
        VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, FALSE)
        RETURNING {VIDEO_COLUMNS}
        "#
    ))
    .bind(Uuid::new_v4())
    .bind(&video.video_file)
    .bind(&video.video_file_id)
    .bind(&video.thumbnail)
    .bind(&video.thumbnail_id)
    .bind(&video.title)
    .bind(&video.description)
    .bind(video.duration)
    .bind(owner)
    .fetch_one(pool)
    .await
}

pub async fn get_video(pool: &PgPool, id: Uuid) -> Result<Option<Video>, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!("SELECT {VIDEO_COLUMNS} FROM videos WHERE id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Whether `viewer` may see the video: published, or their own
pub async fn video_visible(pool: &PgPool, id: Uuid, viewer: Uuid) -> Result<bool, sqlx::Error> {
    sqlx::query_scalar(
        "SELECT EXISTS(SELECT 1 FROM videos WHERE id = $1 AND (is_published OR owner_id = $2))",
    )
    .bind(id)
    .bind(viewer)
    .fetch_one(pool)
    .await
}

/// Video page with channel counters and like state relative to `viewer`
pub async fn video_detail(
    pool: &PgPool,
    id: Uuid,
    viewer: Uuid,
) -> Result<Option<VideoDetail>, sqlx::Error> {
    sqlx::query_as::<_, VideoDetail>(
        r#"
        SELECT v.id, v.video_file, v.thumbnail, v.title, v.description, v.duration, v.views,
               v.is_published, v.created_at, v.updated_at,
               u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
               u.avatar AS u_avatar,
               (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = u.id) AS total_subscribers,
               EXISTS(SELECT 1 FROM subscriptions s
                      WHERE s.channel_id = u.id AND s.subscriber_id = $2) AS is_subscribed,
               (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS total_likes,
               EXISTS(SELECT 1 FROM likes l WHERE l.video_id = v.id AND l.liked_by = $2) AS is_liked
        FROM videos v
        JOIN users u ON u.id = v.owner_id
        WHERE v.id = $1 AND (v.is_published OR v.owner_id = $2)
        "#,
    )
    .bind(id)
    .bind(viewer)
    .fetch_optional(pool)
    .await
}

pub async fn update_video(pool: &PgPool, id: Uuid, update: &VideoUpdate) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        r#"
        UPDATE videos
        SET title = COALESCE($1, title),
            description = COALESCE($2, description),
            thumbnail = COALESCE($3, thumbnail),
            thumbnail_id = COALESCE($4, thumbnail_id),
            updated_at = NOW()
        WHERE id = $5
        RETURNING {VIDEO_COLUMNS}
        "#
    ))
    .bind(&update.title)
    .bind(&update.description)
    .bind(&update.thumbnail)
    .bind(&update.thumbnail_id)
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Delete a video; comments, likes, playlist entries and history rows cascade
pub async fn delete_video(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM videos WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

pub async fn toggle_published(pool: &PgPool, id: Uuid) -> Result<Video, sqlx::Error> {
    sqlx::query_as::<_, Video>(&format!(
        "UPDATE videos SET is_published = NOT is_published, updated_at = NOW() \
         WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
    ))
    .bind(id)
    .fetch_one(pool)
    .await
}

/// Count one view and move the video to the front of the viewer's history
pub async fn record_view(pool: &PgPool, id: Uuid, viewer: Uuid) -> Result<Video, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let video = sqlx::query_as::<_, Video>(&format!(
        "UPDATE videos SET views = views + 1 WHERE id = $1 RETURNING {VIDEO_COLUMNS}"
    ))
    .bind(id)
    .fetch_one(&mut *tx)
    .await?;

    sqlx::query(
        r#"
        INSERT INTO watch_history (user_id, video_id, watched_at)
        VALUES ($1, $2, NOW())
        ON CONFLICT (user_id, video_id) DO UPDATE SET watched_at = EXCLUDED.watched_at
        "#,
    )
    .bind(viewer)
    .bind(id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;
    Ok(video)
}
