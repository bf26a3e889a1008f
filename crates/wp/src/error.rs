/// Errors from the WordPress REST gateway.
///
/// `Api` preserves the upstream `{message, code}` payload for server-side
/// logging; callers must not echo it to browsers.
#[derive(Debug, thiserror::Error)]
pub enum WpError {
    /// WordPress answered with a non-2xx status.
    #[error("WordPress API error ({status}): {message}")]
    Api {
        status: u16,
        /// Upstream machine-readable code (e.g. `rest_post_invalid_id`).
        code: Option<String>,
        message: String,
    },

    /// Transport-level failure (connect, timeout, TLS, body read).
    #[error("WordPress request failed: {0}")]
    Transport(#[from] reqwest::Error),
}

impl WpError {
    /// Whether the upstream said the resource does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, WpError::Api { status: 404, .. })
    }
}
