//! Database test fixtures and utilities
//!
//! Database-backed tests need a reachable PostgreSQL in `DATABASE_URL`.
//! Without it [`TestDatabase::connect`] returns `None` and the test returns
//! early.

use sqlx::PgPool;

/// Remove all rows while preserving the schema
pub async fn cleanup_test_data(pool: &PgPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        "TRUNCATE TABLE watch_history, playlist_videos, playlists, likes, subscriptions, \
         tweets, comments, videos, users CASCADE",
    )
    .execute(pool)
    .await?;
    Ok(())
}

/// Test database fixture
pub struct TestDatabase {
    pool: PgPool,
}

impl TestDatabase {
    /// Connect, migrate and wipe; `None` when `DATABASE_URL` is unset
    pub async fn connect() -> Option<Self> {
        let Ok(database_url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set, skipping database test");
            return None;
        };

        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to create test database pool");
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");
        cleanup_test_data(&pool)
            .await
            .expect("Failed to clean test data");

        Some(Self { pool })
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}
