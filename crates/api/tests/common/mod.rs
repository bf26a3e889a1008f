//! Shared helpers for HTTP-level integration tests.
//!
//! Builds the full production router (same middleware stack as `main.rs`)
//! around an in-memory auth state, with wiremock standing in for the
//! WordPress REST API and the email HTTP API.

#![allow(dead_code)]

use std::sync::Arc;
use std::time::Instant;

use axum::body::Body;
use axum::http::header::{CONTENT_TYPE, COOKIE, SET_COOKIE};
use axum::http::{Method, Request, Response, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use wpadmin_api::auth::password::hash_password;
use wpadmin_api::auth::session::SessionStore;
use wpadmin_api::auth::throttle::LoginThrottle;
use wpadmin_api::config::{AdminConfig, EmailConfig, Environment, ServerConfig};
use wpadmin_api::mailer::Mailer;
use wpadmin_api::router::build_app_router;
use wpadmin_api::state::AppState;
use wpadmin_wp::{WpClient, WpConfig};

pub const TEST_ADMIN: &str = "admin";
pub const TEST_PASSWORD: &str = "correct-horse-battery";

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config(environment: Environment) -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        environment,
        request_timeout_secs: 30,
        shutdown_timeout_secs: 30,
    }
}

/// Build an `AppState` whose WordPress gateway points at `wp_base` (a
/// wiremock server URI, or a dead address for tests that never reach it).
pub fn test_state(wp_base: &str, email: Option<EmailConfig>) -> AppState {
    test_state_in(wp_base, email, Environment::Development)
}

pub fn test_state_in(
    wp_base: &str,
    email: Option<EmailConfig>,
    environment: Environment,
) -> AppState {
    let admin = AdminConfig {
        admin_id: TEST_ADMIN.into(),
        password_hash: hash_password(TEST_PASSWORD).expect("hashing succeeds"),
    };

    let wp_config = WpConfig {
        base_url: wp_base.trim_end_matches('/').to_string(),
        username: "editor".into(),
        app_password: "abcdefghijkl".into(),
    };
    let wp = WpClient::new(wp_config).expect("client builds");

    let mailer = email.map(|config| Arc::new(Mailer::new(config).expect("mailer builds")));

    AppState {
        config: Arc::new(test_config(environment)),
        admin: Arc::new(admin),
        sessions: SessionStore::in_memory(),
        throttle: Arc::new(LoginThrottle::new()),
        wp: Arc::new(wp),
        mailer,
        started_at: Instant::now(),
    }
}

/// Build the full application router, mirroring production.
pub fn build_test_app(state: AppState) -> Router {
    build_app_router(state)
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get_with_cookies(app: &Router, uri: &str, cookies: &str) -> Response<Body> {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(COOKIE, cookies)
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap()
}

/// POST a form-urlencoded body with the given `Cookie` header.
pub async fn post_form(app: &Router, uri: &str, body: &str, cookies: &str) -> Response<Body> {
    let mut builder = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(CONTENT_TYPE, "application/x-www-form-urlencoded");
    if !cookies.is_empty() {
        builder = builder.header(COOKIE, cookies);
    }
    let request = builder.body(Body::from(body.to_string())).unwrap();
    app.clone().oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response
        .into_body()
        .collect()
        .await
        .expect("body reads")
        .to_bytes();
    serde_json::from_slice(&bytes).expect("body is JSON")
}

/// Extract the value of a `Set-Cookie` header for `name`, if present.
pub fn set_cookie_value(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .find(|v| v.starts_with(&prefix))
        .map(|v| {
            v[prefix.len()..]
                .split(';')
                .next()
                .unwrap_or("")
                .to_string()
        })
}

/// Cookies and tokens for a logged-in browser.
pub struct AuthSession {
    /// Ready-to-send `Cookie` header value (csrf + session cookies).
    pub cookie_header: String,
    /// CSRF token to echo in form fields.
    pub csrf_token: String,
    /// Raw session token.
    pub session_token: String,
}

/// Drive the full login flow: fetch the CSRF token, then post credentials.
pub async fn login(app: &Router) -> AuthSession {
    let response = get(app, "/login").await;
    assert_eq!(response.status(), StatusCode::OK);
    let csrf_cookie =
        set_cookie_value(&response, "csrf-token").expect("login page sets the CSRF cookie");
    let json = body_json(response).await;
    let csrf_token = json["data"]["csrf_token"]
        .as_str()
        .expect("login context carries a CSRF token")
        .to_string();
    assert_eq!(csrf_token, csrf_cookie, "double-submit: cookie mirrors the token");

    let body = format!(
        "username={TEST_ADMIN}&password={TEST_PASSWORD}&csrf_token={csrf_token}"
    );
    let response = post_form(app, "/login", &body, &format!("csrf-token={csrf_cookie}")).await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER, "login should redirect");

    let session_token =
        set_cookie_value(&response, "wp-admin-session").expect("login sets the session cookie");

    AuthSession {
        cookie_header: format!(
            "csrf-token={csrf_cookie}; wp-admin-session={session_token}"
        ),
        csrf_token,
        session_token,
    }
}
