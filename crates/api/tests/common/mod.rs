#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use anime_api::app::build_app;
use anime_api::auth::basic::BasicCredentials;
use anime_api::config::{ServerConfig, StorageBackend};
use anime_api::state::AppState;
use anime_db::repositories::{AnimeRepository, InMemoryAnimeRepo, InMemoryUserRepo, UserRepository};

pub const ADMIN: (&str, &str) = ("admin_memory", "123");
pub const USER: (&str, &str) = ("user_memory", "123");

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(storage: StorageBackend) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        storage,
        database_url: None,
        in_memory_users_enabled: true,
    }
}

/// Build the full application router over fresh in-memory stores.
///
/// Uses the same middleware stack as the binary.
pub fn build_test_app() -> Router {
    build_test_app_with(
        StorageBackend::Memory,
        Arc::new(InMemoryAnimeRepo::new()),
        Arc::new(InMemoryUserRepo::new()),
    )
}

pub fn build_test_app_with(
    storage: StorageBackend,
    animes: Arc<dyn AnimeRepository>,
    users: Arc<dyn UserRepository>,
) -> Router {
    let state = AppState::new(test_config(storage), animes, users)
        .expect("built-in users should hash");
    build_app(state)
}

fn basic(credentials: (&str, &str)) -> String {
    BasicCredentials {
        username: credentials.0.to_string(),
        password: credentials.1.to_string(),
    }
    .to_header_value()
}

/// Send a request, optionally authenticated and with a JSON body.
pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    credentials: Option<(&str, &str)>,
    body: Option<serde_json::Value>,
) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(credentials) = credentials {
        builder = builder.header(AUTHORIZATION, basic(credentials));
    }
    let body = match body {
        Some(json) => {
            builder = builder.header(CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    app.clone()
        .oneshot(builder.body(body).unwrap())
        .await
        .unwrap()
}

/// POST a raw, possibly malformed, JSON body.
pub async fn post_raw_json(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: &str,
) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(AUTHORIZATION, basic(credentials))
        .header(CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str, credentials: (&str, &str)) -> Response {
    send(app, Method::GET, uri, Some(credentials), None).await
}

pub async fn post_json(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::POST, uri, Some(credentials), Some(body)).await
}

pub async fn put_json(
    app: &Router,
    uri: &str,
    credentials: (&str, &str),
    body: serde_json::Value,
) -> Response {
    send(app, Method::PUT, uri, Some(credentials), Some(body)).await
}

pub async fn delete(app: &Router, uri: &str, credentials: (&str, &str)) -> Response {
    send(app, Method::DELETE, uri, Some(credentials), None).await
}

/// Collect a response body as JSON.
pub async fn body_json(response: Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Collect a response body as raw bytes.
pub async fn body_bytes(response: Response) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

/// Create an anime as the admin and return its JSON.
pub async fn create_anime(app: &Router, name: &str) -> serde_json::Value {
    let response = post_json(app, "/animes", ADMIN, serde_json::json!({ "name": name })).await;
    assert_eq!(response.status(), axum::http::StatusCode::CREATED);
    body_json(response).await
}
