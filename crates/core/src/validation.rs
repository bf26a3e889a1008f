//! Input and upload validation rules.
//!
//! These produce specific, user-facing messages (the one place the error
//! policy allows specificity); security failures elsewhere stay generic.

use crate::error::CoreError;

/// Maximum upload size: 10 MiB.
pub const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

const ALLOWED_MIME_TYPES: &[&str] =
    &["image/jpeg", "image/png", "image/gif", "image/webp"];

const ALLOWED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "gif", "webp"];

/// Magic-byte signatures for the allowed image formats. WebP files start with
/// the RIFF container header.
const MAGIC_SIGNATURES: &[&[u8]] = &[
    &[0xFF, 0xD8, 0xFF],       // JPEG
    &[0x89, 0x50, 0x4E, 0x47], // PNG
    &[0x47, 0x49, 0x46, 0x38], // GIF
    &[0x52, 0x49, 0x46, 0x46], // RIFF (WebP)
];

/// Title/content length bounds for posts.
pub const POST_TITLE_MAX: usize = 200;
pub const POST_CONTENT_MAX: usize = 100_000;

/// Title/content length bounds for notification emails.
pub const EMAIL_TITLE_MAX: usize = 200;
pub const EMAIL_CONTENT_MAX: usize = 10_000;

/// Validate an uploaded image file before it is forwarded to WordPress.
///
/// Checks size, MIME allowlist, extension allowlist, path traversal in the
/// filename, and the magic bytes of the actual content.
pub fn validate_upload(
    filename: &str,
    declared_mime: &str,
    bytes: &[u8],
) -> Result<(), CoreError> {
    if bytes.len() > MAX_UPLOAD_BYTES {
        return Err(CoreError::Validation(
            "File exceeds the 10 MiB size limit".into(),
        ));
    }

    if bytes.is_empty() {
        return Err(CoreError::Validation("File is empty".into()));
    }

    if !ALLOWED_MIME_TYPES.contains(&declared_mime) {
        return Err(CoreError::Validation(
            "Unsupported file type (only JPEG, PNG, GIF and WebP are allowed)".into(),
        ));
    }

    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();
    if !ALLOWED_EXTENSIONS.contains(&extension.as_str()) {
        return Err(CoreError::Validation("Invalid file extension".into()));
    }

    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(CoreError::Validation("Invalid file name".into()));
    }

    let signature_ok = MAGIC_SIGNATURES
        .iter()
        .any(|sig| bytes.len() >= sig.len() && &bytes[..sig.len()] == *sig);
    if !signature_ok {
        return Err(CoreError::Validation(
            "File content does not match an allowed image format".into(),
        ));
    }

    Ok(())
}

/// Validate post form input. Category and author arrive as form strings and
/// must be numeric ids.
pub fn validate_post_input(
    title: &str,
    content: &str,
    categories: &str,
    author: &str,
) -> Result<(), CoreError> {
    if title.is_empty() || content.is_empty() || categories.is_empty() || author.is_empty() {
        return Err(CoreError::Validation("All fields are required".into()));
    }

    if title.chars().count() > POST_TITLE_MAX {
        return Err(CoreError::Validation(format!(
            "Title must be 1-{POST_TITLE_MAX} characters"
        )));
    }

    if content.chars().count() > POST_CONTENT_MAX {
        return Err(CoreError::Validation(format!(
            "Content must be 1-{POST_CONTENT_MAX} characters"
        )));
    }

    if !categories.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation("Invalid category".into()));
    }

    if !author.chars().all(|c| c.is_ascii_digit()) {
        return Err(CoreError::Validation("Invalid author".into()));
    }

    Ok(())
}

/// Validate notification email input.
pub fn validate_email_input(title: &str, content: &str) -> Result<(), CoreError> {
    if title.is_empty() || content.is_empty() {
        return Err(CoreError::Validation("All fields are required".into()));
    }

    if title.chars().count() > EMAIL_TITLE_MAX {
        return Err(CoreError::Validation(format!(
            "Title must be 1-{EMAIL_TITLE_MAX} characters"
        )));
    }

    if content.chars().count() > EMAIL_CONTENT_MAX {
        return Err(CoreError::Validation(format!(
            "Content must be 1-{EMAIL_CONTENT_MAX} characters"
        )));
    }

    Ok(())
}
