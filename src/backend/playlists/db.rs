//! Playlist Database Operations
//!
//! Membership lives in `playlist_videos`; the primary key on
//! `(playlist_id, video_id)` gives set semantics and `position` keeps
//! insertion order.

use sqlx::{PgPool, Postgres, QueryBuilder};
use uuid::Uuid;

use crate::backend::videos::db::VIDEO_CARD_SELECT;
use crate::shared::models::{Playlist, PlaylistSortField, PlaylistSummary, VideoCard};
use crate::shared::pagination::{Page, Pagination, Sort};

/// Columns of a [`Playlist`] for a statement aliasing the table as `p`
const PLAYLIST_RETURNING: &str = r#"
    p.id, p.name, p.description, p.owner_id, p.created_at, p.updated_at,
    ARRAY(SELECT pv.video_id FROM playlist_videos pv
          WHERE pv.playlist_id = p.id ORDER BY pv.position) AS videos
"#;

const SUMMARY_SELECT: &str = r#"
    SELECT p.id, p.name, p.description, p.created_at, p.updated_at,
           (SELECT COUNT(*) FROM playlist_videos pv WHERE pv.playlist_id = p.id) AS total_videos,
           u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
           u.avatar AS u_avatar
    FROM playlists p
    JOIN users u ON u.id = p.owner_id
"#;

pub async fn create_playlist(
    pool: &PgPool,
    owner: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "INSERT INTO playlists AS p (id, name, description, owner_id) VALUES ($1, $2, $3, $4) \
         RETURNING {PLAYLIST_RETURNING}"
    ))
    .bind(Uuid::new_v4())
    .bind(name)
    .bind(description)
    .bind(owner)
    .fetch_one(pool)
    .await
}

pub async fn get_playlist(pool: &PgPool, id: Uuid) -> Result<Option<Playlist>, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "SELECT {PLAYLIST_RETURNING} FROM playlists p WHERE p.id = $1"
    ))
    .bind(id)
    .fetch_optional(pool)
    .await
}

/// One page of a user's playlists
pub async fn user_playlists(
    pool: &PgPool,
    owner: Uuid,
    sort: Sort<PlaylistSortField>,
    pagination: Pagination,
) -> Result<Page<PlaylistSummary>, sqlx::Error> {
    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playlists WHERE owner_id = $1")
        .bind(owner)
        .fetch_one(pool)
        .await?;

    let mut qb = QueryBuilder::<Postgres>::new(SUMMARY_SELECT);
    qb.push(" WHERE p.owner_id = ")
        .push_bind(owner)
        .push(" ORDER BY ")
        .push(sort.order_by("p.id"))
        .push(" LIMIT ")
        .push_bind(pagination.limit)
        .push(" OFFSET ")
        .push_bind(pagination.offset());

    let docs = qb.build_query_as::<PlaylistSummary>().fetch_all(pool).await?;

    Ok(Page::new(docs, total, pagination))
}

pub async fn playlist_summary(pool: &PgPool, id: Uuid) -> Result<Option<PlaylistSummary>, sqlx::Error> {
    sqlx::query_as::<_, PlaylistSummary>(&format!("{SUMMARY_SELECT} WHERE p.id = $1"))
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// Videos of a playlist in insertion order
///
/// Unpublished videos are only listed for their owner.
pub async fn playlist_videos(
    pool: &PgPool,
    playlist_id: Uuid,
    viewer: Uuid,
) -> Result<Vec<VideoCard>, sqlx::Error> {
    sqlx::query_as::<_, VideoCard>(&format!(
        r#"
        SELECT {VIDEO_CARD_SELECT}
        FROM playlist_videos pv
        JOIN videos v ON v.id = pv.video_id
        JOIN users u ON u.id = v.owner_id
        WHERE pv.playlist_id = $1 AND (v.is_published OR v.owner_id = $2)
        ORDER BY pv.position
        "#
    ))
    .bind(playlist_id)
    .bind(viewer)
    .fetch_all(pool)
    .await
}

pub async fn update_playlist(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    description: &str,
) -> Result<Playlist, sqlx::Error> {
    sqlx::query_as::<_, Playlist>(&format!(
        "UPDATE playlists p SET name = $1, description = $2, updated_at = NOW() \
         WHERE p.id = $3 RETURNING {PLAYLIST_RETURNING}"
    ))
    .bind(name)
    .bind(description)
    .bind(id)
    .fetch_one(pool)
    .await
}

pub async fn delete_playlist(pool: &PgPool, id: Uuid) -> Result<bool, sqlx::Error> {
    let result = sqlx::query("DELETE FROM playlists WHERE id = $1")
        .bind(id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected() > 0)
}

/// Add a video; adding one already present changes nothing
pub async fn add_video(pool: &PgPool, playlist_id: Uuid, video_id: Uuid) -> Result<Playlist, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let inserted = sqlx::query(
        "INSERT INTO playlist_videos (playlist_id, video_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
    )
    .bind(playlist_id)
    .bind(video_id)
    .execute(&mut *tx)
    .await?
    .rows_affected();

    if inserted > 0 {
        touch(&mut tx, playlist_id).await?;
    }

    tx.commit().await?;
    fetch_existing(pool, playlist_id).await
}

/// Remove a video; removing an absent one changes nothing
pub async fn remove_video(
    pool: &PgPool,
    playlist_id: Uuid,
    video_id: Uuid,
) -> Result<Playlist, sqlx::Error> {
    let mut tx = pool.begin().await?;

    let removed = sqlx::query("DELETE FROM playlist_videos WHERE playlist_id = $1 AND video_id = $2")
        .bind(playlist_id)
        .bind(video_id)
        .execute(&mut *tx)
        .await?
        .rows_affected();

    if removed > 0 {
        touch(&mut tx, playlist_id).await?;
    }

    tx.commit().await?;
    fetch_existing(pool, playlist_id).await
}

async fn touch(tx: &mut sqlx::Transaction<'_, Postgres>, playlist_id: Uuid) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE playlists SET updated_at = NOW() WHERE id = $1")
        .bind(playlist_id)
        .execute(&mut **tx)
        .await?;
    Ok(())
}

async fn fetch_existing(pool: &PgPool, playlist_id: Uuid) -> Result<Playlist, sqlx::Error> {
    get_playlist(pool, playlist_id).await?.ok_or(sqlx::Error::RowNotFound)
}
