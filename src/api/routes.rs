//! API route configuration.

use crate::api::handlers::{
    create_url_handler, get_url_handler, health_handler, list_urls_handler,
};
use crate::state::AppState;
use axum::{Router, routing::get};

/// Versioned API routes, nested under `/api/v1`.
///
/// # Endpoints
///
/// - `POST /urls`               - Create a short URL
/// - `GET  /urls`               - List short URLs (paginated)
/// - `GET  /urls/{short_code}`  - Look up one short URL
/// - `GET  /health`             - Storage health check
pub fn v1_routes() -> Router<AppState> {
    Router::new()
        .route("/urls", get(list_urls_handler).post(create_url_handler))
        .route("/urls/{short_code}", get(get_url_handler))
        .route("/health", get(health_handler))
}
