//! Shared helpers for HTTP-level integration tests.
//!
//! Uses Axum's `tower::ServiceExt` to send requests directly to the router
//! without an actual TCP listener. The store is seeded from the embedded
//! fixtures with zero artificial latency.

use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderName, Method, Request, Response, StatusCode};
use axum::Router;
use tower::ServiceExt;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use melboard_api::config::ServerConfig;
use melboard_api::routes;
use melboard_api::state::AppState;
use melboard_events::EventBus;
use melboard_store::{LatencyProfile, Store};

/// Build a test `ServerConfig` with safe defaults and no artificial latency.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        store_latency_ms: 0,
        store_jitter_ms: 0,
        notification_retention_days: 30,
    }
}

/// Build the full application router with all middleware layers over the
/// given store.
///
/// This mirrors the router construction in `main.rs` so integration tests
/// exercise the same middleware stack (CORS, request ID, timeout, tracing,
/// panic recovery) that production uses.
pub fn build_test_app(store: Arc<Store>) -> Router {
    let config = test_config();

    let state = AppState {
        store,
        config: Arc::new(config),
        event_bus: Arc::new(EventBus::default()),
    };

    let cors = CorsLayer::new()
        .allow_origin(["http://localhost:5173".parse().unwrap()])
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([
            CONTENT_TYPE,
            AUTHORIZATION,
            HeaderName::from_static("x-user-id"),
        ])
        .allow_credentials(true);

    let request_id_header = HeaderName::from_static("x-request-id");

    Router::new()
        .merge(routes::health::router())
        .nest("/api/v1", routes::api_routes())
        .layer(CatchPanicLayer::new())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(30),
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors)
        .with_state(state)
}

/// A router over a freshly seeded store, plus the store itself.
pub fn seeded_app() -> (Router, Arc<Store>) {
    let store = Arc::new(Store::seeded(LatencyProfile::NONE).expect("fixtures must parse"));
    (build_test_app(Arc::clone(&store)), store)
}

/// Fixture users, by role.
pub mod users {
    pub const SUPER_ADMIN: i64 = 1;
    pub const KENYA_MANAGER: i64 = 2;
    pub const UGANDA_MANAGER: i64 = 3;
    pub const KENYA_OFFICER: i64 = 4;
    pub const TANZANIA_OFFICER: i64 = 5;
    pub const EXECUTIVE: i64 = 6;
    pub const INACTIVE_EXTERNAL: i64 = 7;
}

async fn send(
    app: Router,
    method: Method,
    uri: &str,
    user_id: Option<i64>,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(user_id) = user_id {
        builder = builder.header("x-user-id", user_id.to_string());
    }
    let request = match body {
        Some(json) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn get(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    send(app, Method::GET, uri, Some(user_id), None).await
}

pub async fn get_anonymous(app: Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None, None).await
}

pub async fn post_json(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::POST, uri, Some(user_id), Some(body)).await
}

pub async fn put_json(
    app: Router,
    uri: &str,
    user_id: i64,
    body: serde_json::Value,
) -> Response<Body> {
    send(app, Method::PUT, uri, Some(user_id), Some(body)).await
}

pub async fn delete(app: Router, uri: &str, user_id: i64) -> Response<Body> {
    send(app, Method::DELETE, uri, Some(user_id), None).await
}

/// Read a response body as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    use http_body_util::BodyExt;
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
