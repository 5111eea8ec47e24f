#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use std::sync::Arc;
use tower::ServiceExt;

use seat_booking::config::Config;
use seat_booking::store::{KeyValueStore, MemoryStore};
use seat_booking::{build_router, AppState};

pub async fn app_with_store(store: Arc<dyn KeyValueStore>) -> Router {
    let state = AppState::new(Config::default(), store)
        .await
        .expect("state");
    build_router(state)
}

pub async fn app() -> Router {
    app_with_store(Arc::new(MemoryStore::new())).await
}

pub fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .expect("request")
}

pub fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub async fn read_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body");
    serde_json::from_slice(&bytes).expect("json")
}

/// Отправляет запрос и возвращает статус вместе с JSON-телом.
pub async fn call(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
    let response = app.clone().oneshot(request).await.expect("response");
    let status = response.status();
    (status, read_json(response).await)
}
