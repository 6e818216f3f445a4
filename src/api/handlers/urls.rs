//! Handlers for creating, listing and looking up short URLs.

use axum::{
    Json,
    extract::{
        Path, Query, State,
        rejection::{JsonRejection, QueryRejection},
    },
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::pagination::ListParams;
use crate::api::dto::url::{CreateUrlRequest, UrlListResponse, UrlResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL.
///
/// # Endpoint
///
/// `POST /api/v1/urls`
///
/// # Request Body
///
/// ```json
/// {
///   "original_url": "https://example.com/page",
///   "short_code": "promo2025"   // optional
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "id": 1,
///   "original_url": "https://example.com/page",
///   "short_code": "aB3xY9",
///   "short_url": "http://localhost:3000/aB3xY9",
///   "created_at": "2025-03-01T12:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 for a malformed body, URL or short code
/// - 409 when the URL or the custom short code is already stored
/// - 503 when no free short code could be generated
pub async fn create_url_handler(
    State(state): State<AppState>,
    payload: Result<Json<CreateUrlRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<UrlResponse>), AppError> {
    let Json(payload) = payload?;
    payload.validate()?;

    let created = state
        .url_service
        .create_short_url(&payload.original_url, payload.short_code)
        .await?;

    Ok((StatusCode::CREATED, Json(created.into())))
}

/// Lists stored URLs, newest first.
///
/// # Endpoint
///
/// `GET /api/v1/urls?limit=50&offset=0`
///
/// # Errors
///
/// Returns 400 for negative or non-numeric parameters and for a `limit`
/// above the configured maximum.
pub async fn list_urls_handler(
    State(state): State<AppState>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<UrlListResponse>, AppError> {
    let Query(params) = params?;
    let (limit, offset) = params.limit_offset();

    let page = state.url_service.list_urls(limit, offset).await?;

    Ok(Json(page.into()))
}

/// Returns a single URL by its short code.
///
/// # Endpoint
///
/// `GET /api/v1/urls/{short_code}`
///
/// # Errors
///
/// Returns 404 if the code is unknown.
pub async fn get_url_handler(
    State(state): State<AppState>,
    Path(short_code): Path<String>,
) -> Result<Json<UrlResponse>, AppError> {
    let found = state.url_service.get_by_code(&short_code).await?;

    Ok(Json(found.into()))
}
