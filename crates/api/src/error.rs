use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use wpadmin_core::CoreError;
use wpadmin_wp::WpError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`WpError`] for gateway errors,
/// and adds the security-specific variants. Implements [`IntoResponse`] to
/// produce the `{"error": ..., "code": ...}` JSON shape.
///
/// Security-sensitive failures carry deliberately generic messages; the
/// detail goes to the server log only.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `wpadmin_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A WordPress gateway error.
    #[error(transparent)]
    Wp(#[from] WpError),

    /// Authentication failed (bad credentials or no valid session). The
    /// message never reveals which of username/password was wrong.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Login throttle lockout. Only the remaining wait is user-visible.
    #[error("Account locked for {minutes} more minutes")]
    AccountLocked { minutes: i64 },

    /// CSRF validation failed: missing, stale, and forged tokens are all
    /// reported identically.
    #[error("CSRF token validation failed")]
    CsrfInvalid,

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// An internal error with a detail message that is logged, not shown.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::UnsafeContent => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "UNSAFE_CONTENT",
                    "This content failed the safety check and cannot be displayed"
                        .to_string(),
                ),
                CoreError::Configuration(detail) => {
                    tracing::error!(error = %detail, "Configuration error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "NOT_CONFIGURED",
                        "The server is not configured for this operation".to_string(),
                    )
                }
            },

            AppError::Wp(err) => classify_wp_error(err),

            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::AccountLocked { minutes } => (
                StatusCode::FORBIDDEN,
                "ACCOUNT_LOCKED",
                format!("Too many failed login attempts. Try again in {minutes} minutes"),
            ),
            AppError::CsrfInvalid => (
                StatusCode::FORBIDDEN,
                "CSRF_INVALID",
                "This page is stale. Refresh and try again".to_string(),
            ),
            AppError::NotFound(what) => (
                StatusCode::NOT_FOUND,
                "NOT_FOUND",
                format!("{what} not found"),
            ),
            AppError::InternalError(detail) => {
                tracing::error!(error = %detail, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a gateway error to an HTTP status, error code, and sanitized message.
///
/// Upstream detail (message/code) is logged but never echoed to the browser.
fn classify_wp_error(err: &WpError) -> (StatusCode, &'static str, String) {
    if err.is_not_found() {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }
    tracing::error!(error = %err, "WordPress gateway error");
    (
        StatusCode::BAD_GATEWAY,
        "UPSTREAM_ERROR",
        "The blog backend could not be reached. Try again later".to_string(),
    )
}

impl From<axum::extract::multipart::MultipartError> for AppError {
    fn from(err: axum::extract::multipart::MultipartError) -> Self {
        tracing::warn!(error = %err, "Malformed multipart request");
        AppError::Core(CoreError::Validation("Malformed upload request".into()))
    }
}
