mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use serde_json::{Value, json};
use shortlink::routes::{RouterOptions, app_router};
use shortlink::state::AppState;
use std::path::PathBuf;
use tower::ServiceExt;

fn options() -> RouterOptions {
    RouterOptions {
        frontend_dir: PathBuf::from("/nonexistent/frontend"),
        ..RouterOptions::default()
    }
}

async fn send(
    state: &AppState,
    options: &RouterOptions,
    request: Request<Body>,
) -> axum::response::Response {
    app_router(state.clone(), options)
        .oneshot(request)
        .await
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

fn create_request(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_create_redirect_and_lookup_scenario() {
    let state = common::create_test_state();
    let options = options();

    let response = send(
        &state,
        &options,
        create_request(
            "/api/v1/urls/",
            json!({ "original_url": "https://example.com/page" }),
        ),
    )
    .await;
    assert_eq!(response.status(), StatusCode::CREATED);

    let created = body_json(response).await;
    let code = created["short_code"].as_str().unwrap().to_string();
    assert_eq!(code.len(), 6);
    assert_eq!(created["short_url"], format!("https://sho.rt/{code}"));

    let response = send(&state, &options, get(&format!("/{code}"))).await;
    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://example.com/page"
    );

    let response = send(&state, &options, get(&format!("/api/v1/urls/{code}"))).await;
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["original_url"], "https://example.com/page");
}

#[tokio::test]
async fn test_trailing_slash_is_normalized() {
    let state = common::create_test_state();
    let options = options();

    let response = send(&state, &options, get("/api/v1/urls/")).await;
    assert_eq!(response.status(), StatusCode::OK);

    let response = send(&state, &options, get("/api/v1/health/")).await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_reserved_paths_do_not_redirect() {
    let state = common::create_test_state();
    let options = options();

    for path in ["/api", "/docs", "/openapi.json", "/apiary"] {
        let response = send(&state, &options, get(path)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{path}");
    }
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let state = common::create_test_state();

    let response = send(&state, &options(), get("/api/v1/unknown/route")).await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let state = common::create_test_state();

    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "http://localhost:5173")
        .body(Body::empty())
        .unwrap();
    let response = send(&state, &options(), request).await;

    assert_eq!(response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN], "*");
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let state = common::create_test_state();
    let options = RouterOptions {
        cors_origins: vec!["https://app.example".to_string()],
        ..options()
    };

    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "https://app.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&state, &options, request).await;
    assert_eq!(
        response.headers()[header::ACCESS_CONTROL_ALLOW_ORIGIN],
        "https://app.example"
    );

    let request = Request::builder()
        .uri("/api/v1/health")
        .header(header::ORIGIN, "https://evil.example")
        .body(Body::empty())
        .unwrap();
    let response = send(&state, &options, request).await;
    assert!(
        response
            .headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .is_none()
    );
}

#[tokio::test]
async fn test_serves_frontend_build() {
    let dir = std::env::temp_dir().join(format!("shortlink-frontend-{}", std::process::id()));
    std::fs::create_dir_all(dir.join("assets")).unwrap();
    std::fs::write(dir.join("index.html"), "<h1>shortlink</h1>").unwrap();
    std::fs::write(dir.join("assets").join("app.js"), "console.log('hi');").unwrap();

    let state = common::create_test_state();
    let options = RouterOptions {
        frontend_dir: dir.clone(),
        ..options()
    };

    let response = send(&state, &options, get("/")).await;
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    assert_eq!(&bytes[..], b"<h1>shortlink</h1>");

    let response = send(&state, &options, get("/assets/app.js")).await;
    assert_eq!(response.status(), StatusCode::OK);

    std::fs::remove_dir_all(&dir).ok();
}
