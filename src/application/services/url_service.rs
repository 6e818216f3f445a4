//! Short URL creation, lookup, listing and redirect resolution.

use std::sync::Arc;

use serde_json::json;
use tracing::{debug, info, warn};

use crate::config::ShortenerSettings;
use crate::domain::entities::{NewUrl, UrlRecord};
use crate::domain::repositories::{StorageError, UrlRepository};
use crate::error::AppError;
use crate::utils::code_generator::{generate_code, is_addressable, is_reserved, validate_custom_code};
use crate::utils::url_normalizer::normalize_url;

/// A stored record together with its public short URL.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShortenedUrl {
    pub record: UrlRecord,
    pub short_url: String,
}

/// One page of records plus the total number stored.
#[derive(Debug, Clone)]
pub struct UrlPage {
    pub urls: Vec<ShortenedUrl>,
    pub total: i64,
}

/// Service for creating and resolving shortened URLs.
///
/// Holds the storage backend and the [`ShortenerSettings`] it was built with;
/// no other state is shared between requests.
pub struct UrlService<R: UrlRepository + ?Sized> {
    repository: Arc<R>,
    settings: ShortenerSettings,
}

impl<R: UrlRepository + ?Sized> UrlService<R> {
    /// Creates a new URL service.
    pub fn new(repository: Arc<R>, settings: ShortenerSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    pub fn settings(&self) -> &ShortenerSettings {
        &self.settings
    }

    /// Shortens `original_url`.
    ///
    /// With `custom_code`, that exact code is used or the call fails. Without
    /// it, a random code is generated; candidates that start with a reserved
    /// prefix, already exist, or lose an insert race are discarded and a new
    /// one is drawn, up to `max_code_attempts` times.
    ///
    /// # Errors
    ///
    /// - [`AppError::Validation`] if the URL or custom code is malformed
    /// - [`AppError::Conflict`] if the URL is already shortened, or the custom
    ///   code is taken
    /// - [`AppError::ResourceExhausted`] if every attempt collided
    /// - [`AppError::Internal`] on storage failures
    pub async fn create_short_url(
        &self,
        original_url: &str,
        custom_code: Option<String>,
    ) -> Result<ShortenedUrl, AppError> {
        let original_url = normalize_url(original_url).map_err(|e| {
            AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
        })?;

        let record = match custom_code {
            Some(code) => {
                validate_custom_code(&code)?;
                self.repository
                    .insert(NewUrl {
                        original_url,
                        short_code: code,
                    })
                    .await?
            }
            None => self.insert_with_generated_code(original_url).await?,
        };

        info!(
            short_code = %record.short_code,
            original_url = %record.original_url,
            "Created short URL"
        );
        metrics::counter!("urls_created_total").increment(1);

        Ok(self.with_short_url(record))
    }

    /// Generate-check-insert loop bounded by `max_code_attempts`.
    async fn insert_with_generated_code(&self, original_url: String) -> Result<UrlRecord, AppError> {
        let max_attempts = self.settings.max_code_attempts;

        for attempt in 1..=max_attempts {
            let code = generate_code(self.settings.code_length, self.settings.code_strategy);

            if is_reserved(&code) {
                debug!(attempt, code = %code, "Generated code hits a reserved prefix");
                continue;
            }

            if self.repository.find_by_code(&code).await?.is_some() {
                debug!(attempt, code = %code, "Generated code already exists");
                metrics::counter!("short_code_collisions_total").increment(1);
                continue;
            }

            let new_url = NewUrl {
                original_url: original_url.clone(),
                short_code: code,
            };

            match self.repository.insert(new_url).await {
                Ok(record) => return Ok(record),
                Err(StorageError::DuplicateShortCode) => {
                    debug!(attempt, "Lost insert race for generated code");
                    metrics::counter!("short_code_collisions_total").increment(1);
                }
                Err(e) => return Err(e.into()),
            }
        }

        warn!(
            max_attempts,
            code_length = self.settings.code_length,
            "No free short code found"
        );

        Err(AppError::exhausted(
            "Failed to generate a unique short code",
            json!({
                "attempts": max_attempts,
                "code_length": self.settings.code_length,
            }),
        ))
    }

    /// Retrieves a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches (codes that could
    /// never be stored are rejected without a storage lookup).
    pub async fn get_by_code(&self, short_code: &str) -> Result<ShortenedUrl, AppError> {
        let record = self.find_addressable(short_code).await?;
        Ok(self.with_short_url(record))
    }

    /// Resolves a short code to its redirect target.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] for unknown or reserved codes.
    pub async fn resolve(&self, short_code: &str) -> Result<String, AppError> {
        let record = self.find_addressable(short_code).await?;
        metrics::counter!("redirects_total").increment(1);
        Ok(record.original_url)
    }

    async fn find_addressable(&self, short_code: &str) -> Result<UrlRecord, AppError> {
        let not_found =
            || AppError::not_found("Short URL not found", json!({ "short_code": short_code }));

        if !is_addressable(short_code) {
            return Err(not_found());
        }

        self.repository
            .find_by_code(short_code)
            .await?
            .ok_or_else(not_found)
    }

    /// Lists records newest first together with the total count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `limit` exceeds `max_list_limit`.
    pub async fn list_urls(&self, limit: u32, offset: u32) -> Result<UrlPage, AppError> {
        if limit > self.settings.max_list_limit {
            return Err(AppError::bad_request(
                format!("limit must not exceed {}", self.settings.max_list_limit),
                json!({ "limit": limit, "max": self.settings.max_list_limit }),
            ));
        }

        let records = self
            .repository
            .list(i64::from(limit), i64::from(offset))
            .await?;
        let total = self.repository.count().await?;

        Ok(UrlPage {
            urls: records
                .into_iter()
                .map(|record| self.with_short_url(record))
                .collect(),
            total,
        })
    }

    /// Total number of stored records.
    pub async fn count(&self) -> Result<i64, AppError> {
        Ok(self.repository.count().await?)
    }

    /// Checks that storage is reachable.
    pub async fn health(&self) -> Result<(), AppError> {
        Ok(self.repository.ping().await?)
    }

    /// Builds the public short URL for a code.
    pub fn short_url(&self, short_code: &str) -> String {
        format!(
            "{}/{}",
            self.settings.base_url.trim_end_matches('/'),
            short_code
        )
    }

    fn with_short_url(&self, record: UrlRecord) -> ShortenedUrl {
        ShortenedUrl {
            short_url: self.short_url(&record.short_code),
            record,
        }
    }
}
