//! Handler for the site root.

use axum::{
    Json,
    extract::State,
    response::{Html, IntoResponse, Response},
};
use tracing::debug;

use crate::api::dto::health::IndexResponse;
use crate::state::AppState;

/// Serves the front-end entry page.
///
/// # Endpoint
///
/// `GET /`
///
/// Returns `FRONTEND_DIR/index.html` when a front-end build is present,
/// otherwise a small JSON document identifying the service.
pub async fn index_handler(State(state): State<AppState>) -> Response {
    let index_path = state.app_info.frontend_dir.join("index.html");

    match tokio::fs::read_to_string(&index_path).await {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            debug!(path = %index_path.display(), error = %e, "No front-end build, serving placeholder");

            Json(IndexResponse {
                msg: format!("Welcome to {}", state.app_info.name),
                name: state.app_info.name.clone(),
                version: state.app_info.version.clone(),
            })
            .into_response()
        }
    }
}
