/// Domain-level error type shared across the workspace.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// Input validation failed. The message is specific and user-facing
    /// ("title required" style), unlike security failures which stay generic.
    #[error("Validation failed: {0}")]
    Validation(String),

    /// Content failed the HTML safety check and must not be rendered at all.
    #[error("Content failed the safety check and cannot be displayed")]
    UnsafeContent,

    /// A required piece of configuration is missing or malformed.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
