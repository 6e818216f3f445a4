//! Shortened URL entity.

use chrono::{DateTime, Utc};

/// A stored mapping from a short code to its destination.
///
/// Records are immutable once created: there is no update or delete path.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct UrlRecord {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub created_at: DateTime<Utc>,
}

impl UrlRecord {
    /// Creates a new record instance.
    pub fn new(
        id: i64,
        original_url: String,
        short_code: String,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            original_url,
            short_code,
            created_at,
        }
    }
}

/// Input data for inserting a new record. `id` and `created_at` are assigned
/// by storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUrl {
    pub original_url: String,
    pub short_code: String,
}
