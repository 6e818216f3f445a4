//! DTOs for the URL endpoints.

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::application::services::{ShortenedUrl, UrlPage};

/// Custom codes use the same 62-character alphabet as generated ones.
static SHORT_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9A-Za-z]+$").expect("short code regex is valid"));

/// Body of `POST /api/v1/urls`.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateUrlRequest {
    /// Absolute `http`/`https` URL to shorten.
    #[validate(url(message = "Invalid URL format"))]
    pub original_url: String,

    /// Optional custom short code; generated when absent.
    #[validate(length(min = 3, max = 32, message = "Short code must be 3-32 characters"))]
    #[validate(regex(
        path = *SHORT_CODE_REGEX,
        message = "Short code may contain only letters and digits"
    ))]
    pub short_code: Option<String>,
}

/// A stored URL as returned by the API.
#[derive(Debug, Serialize)]
pub struct UrlResponse {
    pub id: i64,
    pub original_url: String,
    pub short_code: String,
    pub short_url: String,
    pub created_at: DateTime<Utc>,
}

impl From<ShortenedUrl> for UrlResponse {
    fn from(shortened: ShortenedUrl) -> Self {
        let ShortenedUrl { record, short_url } = shortened;

        Self {
            id: record.id,
            original_url: record.original_url,
            short_code: record.short_code,
            short_url,
            created_at: record.created_at,
        }
    }
}

/// Response of `GET /api/v1/urls`.
#[derive(Debug, Serialize)]
pub struct UrlListResponse {
    pub urls: Vec<UrlResponse>,
    pub total: i64,
}

impl From<UrlPage> for UrlListResponse {
    fn from(page: UrlPage) -> Self {
        Self {
            urls: page.urls.into_iter().map(UrlResponse::from).collect(),
            total: page.total,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::UrlRecord;

    fn request(url: &str, code: Option<&str>) -> CreateUrlRequest {
        CreateUrlRequest {
            original_url: url.to_string(),
            short_code: code.map(String::from),
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("https://example.com/page", None).validate().is_ok());
        assert!(request("https://example.com", Some("promo2025")).validate().is_ok());
    }

    #[test]
    fn test_invalid_url() {
        let errors = request("not a url", None).validate().unwrap_err();
        assert!(errors.field_errors().contains_key("original_url"));
    }

    #[test]
    fn test_invalid_short_code() {
        for code in ["ab", "has-dash", "with space", &"x".repeat(33)] {
            let errors = request("https://example.com", Some(code))
                .validate()
                .unwrap_err();
            assert!(errors.field_errors().contains_key("short_code"), "{code}");
        }
    }

    #[test]
    fn test_deserialize_without_short_code() {
        let req: CreateUrlRequest =
            serde_json::from_str(r#"{"original_url": "https://example.com"}"#).unwrap();
        assert!(req.short_code.is_none());
    }

    #[test]
    fn test_response_from_shortened() {
        let created_at = Utc::now();
        let response = UrlResponse::from(ShortenedUrl {
            record: UrlRecord::new(
                7,
                "https://example.com/".to_string(),
                "aB3xY9".to_string(),
                created_at,
            ),
            short_url: "https://sho.rt/aB3xY9".to_string(),
        });

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["short_code"], "aB3xY9");
        assert_eq!(json["short_url"], "https://sho.rt/aB3xY9");
        assert!(json["created_at"].is_string());
    }
}
