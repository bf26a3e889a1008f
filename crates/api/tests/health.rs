//! Integration tests for the health endpoint and cross-cutting middleware.

mod common;

use axum::http::StatusCode;
use common::{body_json, build_test_app, get, test_state};

const DEAD_WP: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn health_reports_service_status() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["status"], "healthy");
    assert_eq!(json["service"], "wpadmin");
    assert_eq!(json["environment"], "development");
    assert_eq!(json["version"], env!("CARGO_PKG_VERSION"));
    assert!(json["uptime_secs"].is_u64());
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/health").await;
    let request_id = response
        .headers()
        .get("x-request-id")
        .expect("request id header present");
    assert!(!request_id.to_str().unwrap().is_empty());
}

#[tokio::test]
async fn unknown_routes_return_404() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/does-not-exist").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
