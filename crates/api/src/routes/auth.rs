//! Login and logout.
//!
//! POST /login is the one state-changing operation that runs before a
//! session exists; it still requires a CSRF token (issued by GET /login),
//! and a CSRF failure happens before the throttle or the verifier see the
//! attempt, so it neither counts as a failure nor creates a session.

use axum::extract::State;
use axum::response::Redirect;
use axum::routing::{get, post};
use axum::{Form, Json, Router};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use crate::auth::credentials::verify_credentials;
use crate::auth::csrf;
use crate::auth::session::{clear_session_cookie, session_cookie, SESSION_COOKIE};
use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::routes::require_csrf;
use crate::state::AppState;

#[derive(Serialize)]
struct LoginContext {
    csrf_token: String,
}

#[derive(Deserialize)]
struct LoginForm {
    username: String,
    password: String,
    csrf_token: Option<String>,
}

#[derive(Deserialize)]
struct LogoutForm {
    csrf_token: Option<String>,
}

/// GET /login -- hand the browser a CSRF token for the login form.
async fn login_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<DataResponse<LoginContext>>) {
    let (csrf_token, jar) = csrf::current_token(jar, state.secure_cookies());
    (jar, Json(DataResponse { data: LoginContext { csrf_token } }))
}

/// POST /login -- throttle, verify, and establish a fresh session.
async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> AppResult<(CookieJar, Redirect)> {
    require_csrf(&jar, form.csrf_token.as_deref())?;

    state.throttle.check(&form.username)?;

    if !verify_credentials(&state.admin, &form.username, &form.password)? {
        state.throttle.record_failure(&form.username);
        tracing::warn!(username = %form.username, "Login failed");
        return Err(AppError::Unauthorized(
            "Invalid username or password".into(),
        ));
    }

    state.throttle.reset(&form.username);

    // Any token the browser already carries is superseded: a pre-set
    // session can never survive a login.
    let superseded = jar.get(SESSION_COOKIE).map(|c| c.value().to_string());
    let token = state
        .sessions
        .create_session(&state.admin.admin_id, superseded.as_deref())
        .await;

    let jar = jar.add(session_cookie(token, state.secure_cookies()));
    Ok((jar, Redirect::to("/posts")))
}

/// POST /logout -- revoke the session and clear both cookies.
async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<LogoutForm>,
) -> AppResult<(CookieJar, Redirect)> {
    require_csrf(&jar, form.csrf_token.as_deref())?;

    if let Some(cookie) = jar.get(SESSION_COOKIE) {
        state.sessions.revoke(cookie.value()).await;
    }

    let jar = csrf::clear_token(jar.add(clear_session_cookie()));
    tracing::info!("Session logged out");
    Ok((jar, Redirect::to("/login")))
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/login", get(login_page).post(login))
        .route("/logout", post(logout))
}
