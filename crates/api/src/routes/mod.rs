//! Page-flavoured routes for the operator flows.
//!
//! GETs return JSON data envelopes (rendering is out of scope); successful
//! state changes redirect (303) to the relevant list or detail page.

pub mod auth;
pub mod email;
pub mod health;
pub mod media;
pub mod posts;

use axum::Router;
use axum_extra::extract::CookieJar;

use crate::error::AppError;
use crate::state::AppState;

/// All routes that sit behind the edge gatekeeper.
pub fn page_routes() -> Router<AppState> {
    Router::new()
        .merge(auth::router())
        .merge(posts::router())
        .merge(media::router())
        .merge(email::router())
}

/// Reject a state-changing request whose CSRF token does not validate.
///
/// Missing, stale, and forged tokens are treated identically; the operator
/// is told to refresh and retry.
pub(crate) fn require_csrf(jar: &CookieJar, submitted: Option<&str>) -> Result<(), AppError> {
    if crate::auth::csrf::validate(jar, submitted) {
        Ok(())
    } else {
        tracing::warn!("CSRF validation failed");
        Err(AppError::CsrfInvalid)
    }
}
