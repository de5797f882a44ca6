#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use userdesk_api::config::ServerConfig;
use userdesk_api::router::build_app_router;
use userdesk_api::state::AppState;
use userdesk_api::usecases::user::UserService;
use userdesk_db::repositories::UserRepo;

pub const TRACE_ID: &str = "test-trace-123";

/// Build a test `ServerConfig` with safe defaults.
///
/// Only `DATABASE_URL` is provided; the pool handed to [`build_test_app`]
/// is what tests actually talk to.
pub fn test_config() -> ServerConfig {
    ServerConfig::from_lookup(|key| match key {
        "DATABASE_URL" => Some("postgres://localhost/userdesk_test".to_string()),
        "SERVICE_NAME" => Some("userdesk-test".to_string()),
        "VERSION_RELEASE" => Some("0.0.0-test".to_string()),
        _ => None,
    })
    .expect("test config is valid")
}

/// Build the full application router, wired to the real repository over
/// the given pool.
///
/// Uses the same [`build_app_router`] as `main.rs` so tests exercise the
/// production middleware stack (CORS, tracing, body logging, timeout,
/// panic recovery).
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState {
        pool: pool.clone(),
        config: Arc::new(config.clone()),
        users: Arc::new(UserService::new(UserRepo::new(pool))),
    };
    build_app_router(state, &config)
}

/// Send a request with the test `Trace-ID` header and an optional JSON body.
pub async fn send(
    app: Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("Trace-ID", TRACE_ID);
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

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn delete(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect the response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
