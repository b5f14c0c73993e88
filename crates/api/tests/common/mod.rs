#![allow(dead_code)]

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use sqlx::PgPool;
use tower::ServiceExt;

use callplan_api::config::ServerConfig;
use callplan_api::router::build_app_router;
use callplan_api::state::AppState;

/// Test `ServerConfig` with the dev CORS origin and a 30-second timeout.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build the production router over the given pool.
pub fn build_test_app(pool: PgPool) -> Router {
    let config = test_config();
    let state = AppState { pool };
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response<Body> {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    app.oneshot(
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
    )
    .await
    .unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

pub async fn seed_caller(pool: &PgPool, username: &str, daily_target: i32) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO callers (username, daily_target) VALUES ($1, $2) RETURNING id",
    )
    .bind(username)
    .bind(daily_target)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}

pub async fn seed_target(pool: &PgPool, region: &str, preferred: Option<i64>) -> i64 {
    let row: (i64,) = sqlx::query_as(
        "INSERT INTO call_targets (name, region, preferred_caller_id)
         VALUES ($1, $2, $3) RETURNING id",
    )
    .bind(format!("Clinic in {region}"))
    .bind(region)
    .bind(preferred)
    .fetch_one(pool)
    .await
    .unwrap();
    row.0
}
