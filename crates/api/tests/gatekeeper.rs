//! Integration tests for the edge gatekeeper: auth redirects, cache
//! headers, stale-cookie cleanup, and production HTTPS enforcement.

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{build_test_app, get, get_with_cookies, login, test_state, test_state_in};
use tower::ServiceExt;
use wpadmin_api::config::Environment;

const DEAD_WP: &str = "http://127.0.0.1:9";

#[tokio::test]
async fn unauthenticated_pages_redirect_to_login() {
    let app = build_test_app(test_state(DEAD_WP, None));

    for path in ["/posts", "/posts/new", "/posts/42", "/media", "/send-email/42"] {
        let response = get(&app, path).await;
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{path}");
        assert_eq!(response.headers()["location"], "/login", "{path}");
    }
}

#[tokio::test]
async fn login_page_is_reachable_without_a_session() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/login").await;
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn authenticated_login_page_redirects_to_posts() {
    let app = build_test_app(test_state(DEAD_WP, None));
    let session = login(&app).await;

    let response = get_with_cookies(&app, "/login", &session.cookie_header).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/posts");
}

#[tokio::test]
async fn authenticated_responses_are_never_cached() {
    let app = build_test_app(test_state(DEAD_WP, None));
    let session = login(&app).await;

    // /posts/new hits the dead WP address and fails upstream, but the
    // gatekeeper stamps the header on whatever comes back.
    let response = get_with_cookies(&app, "/posts/new", &session.cookie_header).await;
    let cache = response.headers()[header::CACHE_CONTROL].to_str().unwrap();
    assert!(cache.contains("no-store"), "got: {cache}");
    assert!(cache.contains("private"), "got: {cache}");
}

#[tokio::test]
async fn login_page_responses_carry_no_cache_header() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/login").await;
    assert!(response.headers().get(header::CACHE_CONTROL).is_none());
}

#[tokio::test]
async fn stale_session_cookie_is_cleared_on_redirect() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let bogus = "a".repeat(64);
    let response =
        get_with_cookies(&app, "/posts", &format!("wp-admin-session={bogus}")).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
    let cleared = common::set_cookie_value(&response, "wp-admin-session");
    assert_eq!(cleared.as_deref(), Some(""));
}

#[tokio::test]
async fn cookie_presence_alone_does_not_authenticate() {
    let app = build_test_app(test_state(DEAD_WP, None));

    // A well-formed but never-issued token must not pass the gate.
    let forged = "f".repeat(64);
    let response =
        get_with_cookies(&app, "/posts/new", &format!("wp-admin-session={forged}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()["location"], "/login");
}

#[tokio::test]
async fn production_redirects_plain_http_to_https() {
    let app = build_test_app(test_state_in(DEAD_WP, None, Environment::Production));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/posts?page=2")
        .header(header::HOST, "admin.example.com")
        .header("x-forwarded-proto", "http")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        response.headers()[header::LOCATION],
        "https://admin.example.com/posts?page=2"
    );
}

#[tokio::test]
async fn production_passes_forwarded_https_through() {
    let app = build_test_app(test_state_in(DEAD_WP, None, Environment::Production));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/login")
        .header(header::HOST, "admin.example.com")
        .header("x-forwarded-proto", "https")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn development_never_forces_https() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let request = Request::builder()
        .method(Method::GET)
        .uri("/login")
        .header(header::HOST, "localhost:3001")
        .header("x-forwarded-proto", "http")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn health_endpoint_bypasses_the_gatekeeper() {
    let app = build_test_app(test_state(DEAD_WP, None));

    let response = get(&app, "/health").await;
    assert_eq!(response.status(), StatusCode::OK);
}
