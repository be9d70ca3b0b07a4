use axum::{
    body::{Body, to_bytes},
    http::{Request, StatusCode},
};
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;
use tower::ServiceExt;

use expenses_api::config::DatabaseConfig;
use expenses_api::db::postgres::connect_options;
use expenses_api::server::{AppState, app_router};

/// A pool that never connects: the backend address is a TEST-NET-1
/// blackhole, and `connect_lazy_with` defers the first dial to the first
/// acquire.
fn lazy_state() -> AppState {
    let cfg = DatabaseConfig {
        host: "192.0.2.1".into(),
        port: 5432,
        username: "u".into(),
        password: "p".into(),
        database_name: "d".into(),
    };
    let pool = PgPoolOptions::new()
        .max_connections(1)
        .acquire_timeout(Duration::from_millis(200))
        .connect_lazy_with(connect_options(&cfg));
    AppState::new(pool)
}

#[tokio::test]
async fn health_route_reports_ok_without_touching_the_database() {
    let app = app_router(lazy_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = to_bytes(resp.into_body(), usize::MAX)
        .await
        .expect("failed to read response body");
    let body_str = std::str::from_utf8(&body).expect("response body was not utf-8");
    assert!(body_str.contains(r#""status":"ok""#));
}

#[tokio::test]
async fn ready_route_returns_503_when_the_database_is_unreachable() {
    let app = app_router(lazy_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/health/ready")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn unknown_routes_are_not_registered() {
    let app = app_router(lazy_state());

    let resp = app
        .oneshot(
            Request::builder()
                .uri("/expenses")
                .body(Body::empty())
                .expect("failed to build request"),
        )
        .await
        .expect("request failed");

    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}
