//! Dashboard Queries

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::{ChannelStats, DashboardVideo};

/// Totals for one channel, computed at query time
pub async fn channel_stats(pool: &PgPool, channel: Uuid) -> Result<ChannelStats, sqlx::Error> {
    sqlx::query_as::<_, ChannelStats>(
        r#"
        SELECT
            (SELECT COALESCE(SUM(v.views), 0)::BIGINT FROM videos v WHERE v.owner_id = $1) AS total_views,
            (SELECT COUNT(*) FROM videos v WHERE v.owner_id = $1) AS total_videos,
            (SELECT COUNT(*) FROM subscriptions s WHERE s.channel_id = $1) AS total_subscribers,
            (SELECT COUNT(*) FROM likes l JOIN videos v ON v.id = l.video_id
             WHERE v.owner_id = $1) AS total_likes
        "#,
    )
    .bind(channel)
    .fetch_one(pool)
    .await
}

/// Every video of the channel, newest first
pub async fn channel_videos(pool: &PgPool, channel: Uuid) -> Result<Vec<DashboardVideo>, sqlx::Error> {
    sqlx::query_as::<_, DashboardVideo>(
        r#"
        SELECT v.id, v.title, v.description, v.thumbnail, v.video_file, v.duration, v.views,
               v.is_published, v.created_at, v.updated_at,
               (SELECT COUNT(*) FROM likes l WHERE l.video_id = v.id) AS likes_count,
               (SELECT COUNT(*) FROM comments c WHERE c.video_id = v.id) AS comments_count
        FROM videos v
        WHERE v.owner_id = $1
        ORDER BY v.created_at DESC, v.id DESC
        "#,
    )
    .bind(channel)
    .fetch_all(pool)
    .await
}
