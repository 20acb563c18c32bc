//! Subscription Database Operations

use sqlx::PgPool;
use uuid::Uuid;

use crate::shared::models::{SubscribedChannel, Subscriber, Subscription, SubscriptionToggle};

/// Flip `subscriber`'s subscription to `channel`
pub async fn toggle_subscription(
    pool: &PgPool,
    subscriber: Uuid,
    channel: Uuid,
) -> Result<SubscriptionToggle, sqlx::Error> {
    let removed: Option<Uuid> = sqlx::query_scalar(
        "DELETE FROM subscriptions WHERE subscriber_id = $1 AND channel_id = $2 RETURNING id",
    )
    .bind(subscriber)
    .bind(channel)
    .fetch_optional(pool)
    .await?;

    if removed.is_some() {
        return Ok(SubscriptionToggle {
            subscribed: false,
            subscription: None,
        });
    }

    let subscription = sqlx::query_as::<_, Subscription>(
        r#"
        INSERT INTO subscriptions (id, subscriber_id, channel_id)
        VALUES ($1, $2, $3)
        ON CONFLICT (subscriber_id, channel_id) DO NOTHING
        RETURNING id, subscriber_id, channel_id, created_at
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(subscriber)
    .bind(channel)
    .fetch_optional(pool)
    .await?;

    Ok(SubscriptionToggle {
        subscribed: true,
        subscription,
    })
}

/// Users subscribed to `channel`, newest first
pub async fn channel_subscribers(pool: &PgPool, channel: Uuid) -> Result<Vec<Subscriber>, sqlx::Error> {
    sqlx::query_as::<_, Subscriber>(
        r#"
        SELECT s.id, s.created_at,
               u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
               u.avatar AS u_avatar
        FROM subscriptions s
        JOIN users u ON u.id = s.subscriber_id
        WHERE s.channel_id = $1
        ORDER BY s.created_at DESC, s.id DESC
        "#,
    )
    .bind(channel)
    .fetch_all(pool)
    .await
}

/// Channels `subscriber` follows, newest first
pub async fn subscribed_channels(
    pool: &PgPool,
    subscriber: Uuid,
) -> Result<Vec<SubscribedChannel>, sqlx::Error> {
    sqlx::query_as::<_, SubscribedChannel>(
        r#"
        SELECT s.id, s.created_at,
               u.id AS u_id, u.username AS u_username, u.full_name AS u_full_name,
               u.avatar AS u_avatar
        FROM subscriptions s
        JOIN users u ON u.id = s.channel_id
        WHERE s.subscriber_id = $1
        ORDER BY s.created_at DESC, s.id DESC
        "#,
    )
    .bind(subscriber)
    .fetch_all(pool)
    .await
}
