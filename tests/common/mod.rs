#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use shortlink::application::services::UrlService;
use shortlink::config::ShortenerSettings;
use shortlink::domain::repositories::UrlRepository;
use shortlink::infrastructure::persistence::InMemoryUrlRepository;
use shortlink::state::{AppInfo, AppState};

pub const BASE_URL: &str = "https://sho.rt";

pub fn test_settings() -> ShortenerSettings {
    ShortenerSettings {
        base_url: BASE_URL.to_string(),
        ..ShortenerSettings::default()
    }
}

pub fn test_app_info() -> AppInfo {
    AppInfo {
        name: "Test Shortener".to_string(),
        version: "9.9.9".to_string(),
        frontend_dir: PathBuf::from("/nonexistent/frontend"),
    }
}

pub fn create_state_with(
    repository: Arc<dyn UrlRepository>,
    settings: ShortenerSettings,
) -> AppState {
    let url_service = Arc::new(UrlService::new(repository, settings));
    AppState::new(url_service, test_app_info())
}

/// State backed by a fresh in-memory repository.
pub fn create_test_state() -> AppState {
    create_state_with(Arc::new(InMemoryUrlRepository::new()), test_settings())
}

/// Inserts a record through the service, returning its short code.
pub async fn create_test_url(state: &AppState, url: &str, code: Option<&str>) -> String {
    state
        .url_service
        .create_short_url(url, code.map(String::from))
        .await
        .unwrap()
        .record
        .short_code
}
