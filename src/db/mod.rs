mod models;

pub use models::*;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;
use std::path::Path;

/// Persistence for review records. Cloning shares the underlying pool.
#[derive(Clone, Debug)]
pub struct ReviewStore {
    pool: SqlitePool,
}

impl ReviewStore {
    /// Opens (creating if absent) the database file and applies migrations.
    /// An existing `reviews` table and its rows are left untouched.
    pub async fn open(path: &Path) -> Result<Self, sqlx::Error> {
        crate::storage::ensure_parent_dir(path)?;

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(options)
            .await?;

        run_migrations(&pool).await?;
        tracing::info!("Review store ready at {}", path.display());

        Ok(Self { pool })
    }

    pub async fn append(&self, review: &NewReview<'_>) -> Result<i64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            INSERT INTO reviews (filename, language, timestamp, review_data)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(review.filename)
        .bind(review.language)
        .bind(review.timestamp)
        .bind(review.review_data)
        .execute(&self.pool)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// Direct lookup for inspection; not served over HTTP.
    pub async fn get(&self, id: i64) -> Result<Option<ReviewRecord>, sqlx::Error> {
        sqlx::query_as::<_, ReviewRecord>("SELECT * FROM reviews WHERE id = ?1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
    }

    pub async fn count(&self) -> Result<i64, sqlx::Error> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM reviews")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }

    /// Waits for in-flight statements and closes every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

async fn run_migrations(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}
