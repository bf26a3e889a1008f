//! Edge gatekeeper for page routes.
//!
//! Applied via `middleware::from_fn_with_state` in front of every page route
//! (the health endpoint is mounted outside it):
//!
//! 1. In production, plain-HTTP requests are redirected to HTTPS (301).
//! 2. Unauthenticated requests to anything but `/login` redirect there (303).
//! 3. Authenticated requests to `/login` redirect to `/posts` (303).
//! 4. Authenticated responses get `Cache-Control: no-store ...`.
//!
//! Authentication means a session-store hit, not mere cookie presence; a
//! cookie whose session is missing or expired is cleared on the way out.

use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::CookieJar;

use crate::auth::session::{clear_session_cookie, SESSION_COOKIE};
use crate::state::AppState;

const NO_CACHE: &str = "no-store, no-cache, must-revalidate, private";

pub async fn gatekeeper(
    State(state): State<AppState>,
    jar: CookieJar,
    request: Request,
    next: Next,
) -> Response {
    if state.config.environment.is_production() {
        if let Some(response) = https_redirect(&request) {
            return response;
        }
    }

    let session_cookie = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let authenticated = match &session_cookie {
        Some(token) => state.sessions.authenticate(token).await.is_some(),
        None => false,
    };
    // Cookie present but session gone: clear the browser's stale copy.
    let stale_cookie = session_cookie.is_some() && !authenticated;

    let path = request.uri().path();

    if path == "/login" {
        if authenticated && request.method() == axum::http::Method::GET {
            return Redirect::to("/posts").into_response();
        }
        return next.run(request).await;
    }

    if !authenticated {
        tracing::debug!(path, "Unauthenticated request redirected to login");
        let redirect = Redirect::to("/login");
        if stale_cookie {
            return (CookieJar::new().add(clear_session_cookie()), redirect)
                .into_response();
        }
        return redirect.into_response();
    }

    let mut response = next.run(request).await;
    response.headers_mut().insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static(NO_CACHE),
    );
    response
}

/// Permanent redirect to the HTTPS origin when the edge proxy reports a
/// plain-HTTP request. Skipped when no Host header is available to rebuild
/// the URL from.
fn https_redirect(request: &Request) -> Option<Response> {
    let proto = request
        .headers()
        .get("x-forwarded-proto")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    if proto == "https" {
        return None;
    }

    let host = request
        .headers()
        .get(header::HOST)
        .and_then(|v| v.to_str().ok())?;
    let path_and_query = request
        .uri()
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or("/");

    let location = format!("https://{host}{path_and_query}");
    Some(
        (
            StatusCode::MOVED_PERMANENTLY,
            [(header::LOCATION, location)],
        )
            .into_response(),
    )
}
