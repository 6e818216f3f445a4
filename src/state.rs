//! Shared application state injected into all handlers.

use std::path::PathBuf;
use std::sync::Arc;

use crate::application::services::UrlService;
use crate::domain::repositories::UrlRepository;

/// Product identity and front-end location shown on `GET /`.
#[derive(Debug, Clone)]
pub struct AppInfo {
    pub name: String,
    pub version: String,
    pub frontend_dir: PathBuf,
}

/// Application state cloned into every request.
///
/// Cloning is cheap: both fields are reference counted.
#[derive(Clone)]
pub struct AppState {
    pub url_service: Arc<UrlService<dyn UrlRepository>>,
    pub app_info: Arc<AppInfo>,
}

impl AppState {
    pub fn new(url_service: Arc<UrlService<dyn UrlRepository>>, app_info: AppInfo) -> Self {
        Self {
            url_service,
            app_info: Arc::new(app_info),
        }
    }
}
