//! PostgreSQL implementation of the URL repository.

use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::{StorageError, UrlRepository};

/// Unique constraint names from `migrations/*_create_url.sql`.
const SHORT_CODE_CONSTRAINT: &str = "url_short_code_key";
const ORIGINAL_URL_CONSTRAINT: &str = "url_original_url_key";

/// PostgreSQL repository for URL records.
///
/// Each call checks a connection out of the pool for the duration of one
/// statement; the connection returns to the pool when the call completes,
/// including on error.
pub struct PgUrlRepository {
    pool: Arc<PgPool>,
}

impl PgUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

/// Maps unique violations on the `url` table to their typed variants.
fn classify_insert_error(e: sqlx::Error) -> StorageError {
    let duplicate = match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => match db_err.constraint() {
            Some(SHORT_CODE_CONSTRAINT) => Some(StorageError::DuplicateShortCode),
            Some(ORIGINAL_URL_CONSTRAINT) => Some(StorageError::DuplicateOriginalUrl),
            _ => None,
        },
        _ => None,
    };

    duplicate.unwrap_or(StorageError::Database(e))
}

#[async_trait]
impl UrlRepository for PgUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, StorageError> {
        sqlx::query_as::<_, UrlRecord>(
            r#"
            INSERT INTO url (original_url, short_code)
            VALUES ($1, $2)
            RETURNING id, original_url, short_code, created_at
            "#,
        )
        .bind(&new_url.original_url)
        .bind(&new_url.short_code)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(classify_insert_error)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, StorageError> {
        let record = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM url
            WHERE short_code = $1
            "#,
        )
        .bind(short_code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(record)
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlRecord>, StorageError> {
        let records = sqlx::query_as::<_, UrlRecord>(
            r#"
            SELECT id, original_url, short_code, created_at
            FROM url
            ORDER BY created_at DESC, id DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(limit)
        .bind(offset)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(records)
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM url")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }
}
