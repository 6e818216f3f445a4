//! In-memory implementation of the URL repository.

use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::{StorageError, UrlRepository};

#[derive(Debug, Default)]
struct Table {
    next_id: i64,
    rows: Vec<UrlRecord>,
    by_code: HashMap<String, usize>,
    by_url: HashMap<String, usize>,
}

/// Process-local repository backed by a single lock.
///
/// The table and both unique indexes sit behind one [`RwLock`], so an
/// insert's uniqueness check and write happen atomically with respect to
/// every other insert.
#[derive(Debug, Default)]
pub struct InMemoryUrlRepository {
    table: RwLock<Table>,
}

impl InMemoryUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for InMemoryUrlRepository {
    async fn insert(&self, new_url: NewUrl) -> Result<UrlRecord, StorageError> {
        let mut table = self.table.write().await;

        if table.by_code.contains_key(&new_url.short_code) {
            return Err(StorageError::DuplicateShortCode);
        }
        if table.by_url.contains_key(&new_url.original_url) {
            return Err(StorageError::DuplicateOriginalUrl);
        }

        table.next_id += 1;
        let record = UrlRecord::new(
            table.next_id,
            new_url.original_url,
            new_url.short_code,
            Utc::now(),
        );

        let index = table.rows.len();
        table.by_code.insert(record.short_code.clone(), index);
        table.by_url.insert(record.original_url.clone(), index);
        table.rows.push(record.clone());

        Ok(record)
    }

    async fn find_by_code(&self, short_code: &str) -> Result<Option<UrlRecord>, StorageError> {
        let table = self.table.read().await;

        Ok(table
            .by_code
            .get(short_code)
            .map(|&index| table.rows[index].clone()))
    }

    async fn list(&self, limit: i64, offset: i64) -> Result<Vec<UrlRecord>, StorageError> {
        let table = self.table.read().await;

        let mut rows: Vec<&UrlRecord> = table.rows.iter().collect();
        rows.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| b.id.cmp(&a.id))
        });

        Ok(rows
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(0))
            .take(usize::try_from(limit).unwrap_or(0))
            .cloned()
            .collect())
    }

    async fn count(&self) -> Result<i64, StorageError> {
        let table = self.table.read().await;
        Ok(table.rows.len() as i64)
    }

    async fn ping(&self) -> Result<(), StorageError> {
        Ok(())
    }
}
