//! Repository trait for shortened URL storage.

use crate::domain::entities::{NewUrl, UrlRecord};
use async_trait::async_trait;

/// Failures reported by a [`UrlRepository`].
///
/// Uniqueness violations are classified so the service can tell a short code
/// collision (retryable) from a duplicate destination (a client conflict).
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("short code already exists")]
    DuplicateShortCode,

    #[error("original URL already exists")]
    DuplicateOriginalUrl,

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),
}

/// Storage contract for shortened URLs.
///
/// Implementations must enforce uniqueness of both `short_code` and
/// `original_url` atomically: of two overlapping inserts with the same code,
/// exactly one succeeds and the other reports
/// [`StorageError::DuplicateShortCode`].
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Inserts a new record and returns it with its storage-assigned fields.
    ///
    /// # Errors
    ///
    /// - [`StorageError::DuplicateShortCode`] if the code is taken
    /// - [`StorageError::DuplicateOriginalUrl`] if the URL is already stored
    /// - [`StorageError::Database`] on any other failure
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, StorageError>;

    /// Finds a record by its short code.
    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, StorageError>;

    /// Lists records newest first (`created_at` DESC, then `id` DESC).
    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlRecord>, StorageError>;

    /// Counts all stored records.
    async fn count(&self) -> Result<i64, StorageError>;

    /// Verifies the backing store is reachable.
    async fn ping(&self) -> Result<(), StorageError>;
}
