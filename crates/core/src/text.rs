//! Plain-text helpers for building excerpts from rendered HTML.

use std::sync::LazyLock;

use regex::Regex;

static HTML_TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<[^>]*>").expect("static regex"));

/// Remove all HTML tags, returning trimmed plain text.
pub fn strip_html_tags(html: &str) -> String {
    HTML_TAG.replace_all(html, "").trim().to_string()
}

/// Truncate text to at most `max_chars` characters, appending `...` when
/// anything was cut. Operates on character boundaries, not bytes.
pub fn truncate_text(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let truncated: String = text.chars().take(max_chars).collect();
    format!("{}...", truncated.trim_end())
}
