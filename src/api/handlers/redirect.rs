//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};
use tracing::debug;

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /{short_code}`
///
/// Responds with `301 Moved Permanently` and a `Location` header. Records
/// never change, so the permanent status is safe for clients to cache.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist or starts with a
/// reserved prefix.
pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let original_url = state.url_service.resolve(&short_code).await?;

    debug!(short_code = %short_code, location = %original_url, "Redirecting");

    Ok((
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, original_url)],
    ))
}
