//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /`               - Front-end entry page or JSON placeholder
//! - `GET  /{short_code}`   - Short URL redirect
//! - `/api/v1/*`            - REST API (rate limited)
//! - `/assets/*`, `/static/*` - Front-end build output
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **CORS** - Origins from configuration
//! - **Rate limiting** - Per-IP token bucket on `/api` (configurable for proxy deployments)
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{index_handler, redirect_handler};
use crate::api::middleware::rate_limit::{self, RateLimit};
use crate::api::middleware::{cors, tracing};
use crate::config::Config;
use crate::error::AppError;
use crate::state::AppState;
use axum::Router;
use axum::http::Uri;
use axum::routing::get;
use serde_json::json;
use std::path::PathBuf;
use tower::Layer;
use tower_governor::key_extractor::{PeerIpKeyExtractor, SmartIpKeyExtractor};
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::ServeDir;

/// HTTP-level options that shape the router but not the handlers.
#[derive(Debug, Clone)]
pub struct RouterOptions {
    /// When `true`, rate limiting reads client IP from `X-Forwarded-For` /
    /// `X-Real-IP` instead of the peer socket address. Enable only behind a
    /// trusted reverse proxy.
    pub behind_proxy: bool,
    /// `None` disables API rate limiting.
    pub rate_limit: Option<RateLimit>,
    pub frontend_dir: PathBuf,
    pub cors_origins: Vec<String>,
}

impl RouterOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            behind_proxy: config.behind_proxy,
            rate_limit: config.rate_limit_enabled.then_some(RateLimit {
                per_second: config.rate_limit_per_second,
                burst: config.rate_limit_burst,
            }),
            frontend_dir: config.frontend_dir.clone(),
            cors_origins: config.cors_allowed_origins.clone(),
        }
    }
}

impl Default for RouterOptions {
    fn default() -> Self {
        Self {
            behind_proxy: false,
            rate_limit: None,
            frontend_dir: PathBuf::from("frontend/dist"),
            cors_origins: vec!["*".to_string()],
        }
    }
}

/// Constructs the application router with all routes and middleware.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `options` - proxy, rate limit, front-end and CORS settings
pub fn app_router(state: AppState, options: &RouterOptions) -> NormalizePath<Router> {
    let api_router = with_rate_limit(api::routes::v1_routes(), options);

    let router = Router::new()
        .route("/", get(index_handler))
        .route("/{short_code}", get(redirect_handler))
        .nest("/api/v1", api_router)
        .nest_service("/assets", ServeDir::new(options.frontend_dir.join("assets")))
        .nest_service("/static", ServeDir::new(options.frontend_dir.join("static")))
        .fallback(not_found_handler)
        .with_state(state)
        .layer(cors::layer(&options.cors_origins))
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}

fn with_rate_limit(router: Router<AppState>, options: &RouterOptions) -> Router<AppState> {
    let Some(limits) = options.rate_limit else {
        return router;
    };

    let layered = if options.behind_proxy {
        rate_limit::layer(SmartIpKeyExtractor, limits).map(|layer| router.clone().layer(layer))
    } else {
        rate_limit::layer(PeerIpKeyExtractor, limits).map(|layer| router.clone().layer(layer))
    };

    layered.unwrap_or_else(|| {
        ::tracing::warn!(?limits, "Invalid rate limit settings, API is not rate limited");
        router
    })
}

async fn not_found_handler(uri: Uri) -> AppError {
    AppError::not_found("Route not found", json!({ "path": uri.path() }))
}
