//! Destination URL validation and canonicalization.
//!
//! Stored URLs are unique, so two spellings of the same address must collapse
//! to one canonical string before the uniqueness check happens.

use url::Url;

/// Longest destination URL accepted.
pub const MAX_URL_LENGTH: usize = 2048;

/// Errors that can occur during URL normalization.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum UrlNormalizationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS URLs can be shortened")]
    UnsupportedScheme,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL exceeds {MAX_URL_LENGTH} characters")]
    TooLong,
}

/// Parses an absolute `http`/`https` URL and returns its canonical form.
///
/// # Rules
///
/// 1. Surrounding whitespace is ignored
/// 2. Scheme must be `http` or `https` (`javascript:`, `data:`, `file:` are rejected)
/// 3. Host is required and lowercased
/// 4. Default ports are dropped (80 for http, 443 for https)
/// 5. An empty path becomes `/`; path, query and fragment are otherwise kept
/// 6. Both the input and the canonical form must fit in [`MAX_URL_LENGTH`]
///
/// # Examples
///
/// ```ignore
/// assert_eq!(
///     normalize_url("HTTPS://Example.COM:443/Page").unwrap(),
///     "https://example.com/Page"
/// );
/// ```
pub fn normalize_url(input: &str) -> Result<String, UrlNormalizationError> {
    let input = input.trim();

    if input.len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    // `Url::parse` already lowercases the scheme and host and strips default ports.
    let url = Url::parse(input).map_err(|e| UrlNormalizationError::InvalidFormat(e.to_string()))?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(UrlNormalizationError::UnsupportedScheme);
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => {}
        _ => return Err(UrlNormalizationError::MissingHost),
    }

    // Parsing percent-encodes, so the stored form can be longer than the input.
    if url.as_str().len() > MAX_URL_LENGTH {
        return Err(UrlNormalizationError::TooLong);
    }

    Ok(url.into())
}
