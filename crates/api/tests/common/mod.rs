//! Shared helpers for HTTP-level integration tests.
//!
//! Requests are sent straight to the router with `tower::ServiceExt::oneshot`,
//! so no TCP listener is involved.

#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use chrono::NaiveDate;
use http_body_util::BodyExt;
use setlist_api::config::ServerConfig;
use setlist_api::router::build_app_router;
use setlist_api::state::AppState;
use setlist_db::models::album::CreateAlbum;
use setlist_db::models::event::CreateEvent;
use setlist_db::models::song::CreateSong;
use setlist_db::repositories::{AlbumRepo, EventRepo, SongRepo};
use sqlx::PgPool;
use tower::ServiceExt;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
        db_max_connections: 5,
        log_json: false,
    }
}

/// Build the full application router (same middleware stack as production).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState { pool };
    build_app_router(state, &config)
}

// ---------------------------------------------------------------------------
// Request helpers
// ---------------------------------------------------------------------------

async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn patch_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PATCH, uri, Some(body)).await
}

/// Send a raw (possibly malformed) JSON body.
pub async fn post_raw(app: Router, uri: &str, body: &'static str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures (created through the repository layer)
// ---------------------------------------------------------------------------

pub async fn seed_song(pool: &PgPool, title: &str) -> i64 {
    SongRepo::create(pool, &CreateSong { title: title.to_string() })
        .await
        .unwrap()
        .id
}

pub async fn seed_album(pool: &PgPool, title: &str) -> i64 {
    AlbumRepo::create(
        pool,
        &CreateAlbum {
            title: title.to_string(),
            release_date: NaiveDate::from_ymd_opt(1996, 10, 15),
        },
    )
    .await
    .unwrap()
    .id
}

pub async fn seed_event(pool: &PgPool) -> i64 {
    EventRepo::create(
        pool,
        &CreateEvent {
            title: "New Year's Run".to_string(),
            event_date: NaiveDate::from_ymd_opt(1995, 12, 31).unwrap(),
            venue_name: Some("Madison Square Garden".to_string()),
        },
    )
    .await
    .unwrap()
    .id
}

/// Extract `(id, position)` pairs from a `{ "data": [...] }` body.
pub fn id_positions(json: &serde_json::Value) -> Vec<(i64, i64)> {
    json["data"]
        .as_array()
        .expect("data should be an array")
        .iter()
        .map(|row| (row["id"].as_i64().unwrap(), row["position"].as_i64().unwrap()))
        .collect()
}
