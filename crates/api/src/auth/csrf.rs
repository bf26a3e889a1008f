//! Double-submit cookie CSRF guard.
//!
//! The server sets an HTTP-only `csrf-token` cookie and embeds the same
//! value in the page it renders; a state-changing request must echo the
//! value back as a form field. A cross-origin attacker can make the browser
//! send the cookie but cannot read its value to forge the field.
//!
//! A valid session never substitutes for CSRF validation, and a valid CSRF
//! token never substitutes for authentication.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use constant_time_eq::constant_time_eq;
use rand::RngCore;

/// CSRF cookie name.
pub const CSRF_COOKIE: &str = "csrf-token";

/// Cookie lifetime: one hour.
const CSRF_TTL_SECONDS: i64 = 3600;

/// Generate a fresh token and set it on the jar. Returns the plaintext value
/// for embedding in the rendered page.
pub fn issue_token(jar: CookieJar, secure: bool) -> (String, CookieJar) {
    let mut bytes = [0u8; 32];
    rand::rng().fill_bytes(&mut bytes);
    let token = hex::encode(bytes);

    let cookie = Cookie::build((CSRF_COOKIE, token.clone()))
        .http_only(true)
        .secure(secure)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(CSRF_TTL_SECONDS))
        .path("/")
        .build();

    (token, jar.add(cookie))
}

/// Return the current cookie token, issuing a new one if absent.
pub fn current_token(jar: CookieJar, secure: bool) -> (String, CookieJar) {
    if let Some(cookie) = jar.get(CSRF_COOKIE) {
        let value = cookie.value().to_string();
        if !value.is_empty() {
            return (value, jar);
        }
    }
    issue_token(jar, secure)
}

/// Validate a submitted token against the cookie-stored one.
///
/// Fails for a missing/empty submission, a missing cookie, a length
/// mismatch, or any byte difference; the comparison is constant-time.
pub fn validate(jar: &CookieJar, submitted: Option<&str>) -> bool {
    let Some(submitted) = submitted else {
        return false;
    };
    if submitted.is_empty() {
        return false;
    }

    let Some(cookie) = jar.get(CSRF_COOKIE) else {
        return false;
    };
    let stored = cookie.value();

    if submitted.len() != stored.len() {
        return false;
    }

    constant_time_eq(submitted.as_bytes(), stored.as_bytes())
}

/// Remove the CSRF cookie (paired with logout).
pub fn clear_token(jar: CookieJar) -> CookieJar {
    let cookie = Cookie::build((CSRF_COOKIE, ""))
        .http_only(true)
        .same_site(SameSite::Strict)
        .max_age(time::Duration::seconds(0))
        .path("/")
        .build();
    jar.add(cookie)
}
