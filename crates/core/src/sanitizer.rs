//! Denylist-based sanitizer for WordPress-authored HTML.
//!
//! Two independent passes guard the rendering path:
//!
//! 1. [`sanitize_html`] strips dangerous tags (with their content), inline
//!    event-handler attributes, and dangerous URL protocols in `href`/`src`.
//! 2. [`is_html_safe`] is a separate heuristic gate over whatever is about to
//!    be rendered. Content must pass BOTH before it is shown; failing the gate
//!    refuses the content entirely rather than rendering a partial result.
//!
//! This is pattern-based denylisting, not a parser-based allowlist. It is
//! best-effort against adversarial HTML; see DESIGN.md for the flagged
//! follow-up to move to a tree-based allowlist sanitizer.

use std::sync::LazyLock;

use regex::Regex;

/// Tags removed entirely, including their content.
const DANGEROUS_TAGS: &[&str] = &[
    "script", "iframe", "object", "embed", "applet", "meta", "link", "style",
    "base", "form", "input", "button", "textarea", "select", "option",
];

/// Protocols neutralized when they appear in `href` or `src` values.
const DANGEROUS_PROTOCOLS: &[&str] =
    &["javascript:", "data:", "vbscript:", "file:", "about:"];

struct TagPattern {
    /// `<tag ...>...</tag>` including content.
    paired: Regex,
    /// `<tag ...>` or `<tag ... />` left over once pairs are gone.
    unpaired: Regex,
}

static TAG_PATTERNS: LazyLock<Vec<TagPattern>> = LazyLock::new(|| {
    DANGEROUS_TAGS
        .iter()
        .map(|tag| TagPattern {
            paired: Regex::new(&format!(r"(?is)<{tag}\b[^>]*>.*?</{tag}\s*>"))
                .expect("static tag regex"),
            unpaired: Regex::new(&format!(r"(?i)<{tag}\b[^>]*/?>"))
                .expect("static tag regex"),
        })
        .collect()
});

// Catch-all `on*` attribute sweep, covering double-quoted, single-quoted, and
// bare values. This subsumes the classic named handlers (onerror, onclick,
// onload, onmouseover, ...).
static EVENT_ATTR_DQUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?i)\son\w+\s*=\s*"[^"]*""#).expect("static regex"));
static EVENT_ATTR_SQUOTED: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\son\w+\s*=\s*'[^']*'").expect("static regex"));
static EVENT_ATTR_BARE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\son\w+\s*=\s*[^\s>]+").expect("static regex"));

struct ProtocolPattern {
    href: Regex,
    src: Regex,
}

static PROTOCOL_PATTERNS: LazyLock<Vec<ProtocolPattern>> = LazyLock::new(|| {
    DANGEROUS_PROTOCOLS
        .iter()
        .map(|protocol| {
            let escaped = regex::escape(protocol);
            ProtocolPattern {
                href: Regex::new(&format!(r#"(?i)href\s*=\s*["']{escaped}[^"']*["']"#))
                    .expect("static protocol regex"),
                src: Regex::new(&format!(r#"(?i)src\s*=\s*["']{escaped}[^"']*["']"#))
                    .expect("static protocol regex"),
            }
        })
        .collect()
});

static RISKY_PATTERNS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)<iframe",
        r"(?i)<object",
        r"(?i)<embed",
        r"(?i)onerror\s*=",
        r"(?i)onclick\s*=",
        r"(?i)onload\s*=",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("static risky regex"))
    .collect()
});

/// Strip dangerous markup from an HTML fragment.
///
/// Removes the denylisted tags including their content, removes inline
/// event-handler attributes (catch-all `on*`), and replaces dangerous
/// protocols in `href` (`href="#"`) and `src` (`src=""`) values. Safe
/// formatting markup is preserved as-is.
pub fn sanitize_html(html: &str) -> String {
    if html.is_empty() {
        return String::new();
    }

    let mut sanitized = html.to_string();

    for pattern in TAG_PATTERNS.iter() {
        sanitized = pattern.paired.replace_all(&sanitized, "").into_owned();
        sanitized = pattern.unpaired.replace_all(&sanitized, "").into_owned();
    }

    sanitized = EVENT_ATTR_DQUOTED.replace_all(&sanitized, "").into_owned();
    sanitized = EVENT_ATTR_SQUOTED.replace_all(&sanitized, "").into_owned();
    sanitized = EVENT_ATTR_BARE.replace_all(&sanitized, "").into_owned();

    for pattern in PROTOCOL_PATTERNS.iter() {
        sanitized = pattern.href.replace_all(&sanitized, r##"href="#""##).into_owned();
        sanitized = pattern.src.replace_all(&sanitized, r#"src="""#).into_owned();
    }

    sanitized
}

/// Heuristic safety gate, independent of [`sanitize_html`].
///
/// Returns `false` when the content still contains script tags, a
/// `javascript:` occurrence anywhere, dangerous `data:` sub-types, or one of
/// the risky tag/attribute patterns. Empty content is trivially safe.
///
/// This is defense in depth, not a substitute for sanitization: callers must
/// sanitize first and then refuse to render anything this gate rejects.
pub fn is_html_safe(html: &str) -> bool {
    if html.is_empty() {
        return true;
    }

    let lower = html.to_lowercase();

    if lower.contains("<script") || lower.contains("</script>") {
        return false;
    }

    if lower.contains("javascript:") {
        return false;
    }

    if lower.contains("data:text/html") || lower.contains("data:application/") {
        return false;
    }

    !RISKY_PATTERNS.iter().any(|pattern| pattern.is_match(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn removes_script_tag_with_content() {
        let out = sanitize_html("<script>alert(1)</script><p>ok</p>");
        assert!(!out.to_lowercase().contains("<script"));
        assert!(out.contains("<p>ok</p>"));
        assert!(is_html_safe(&out));
    }

    #[test]
    fn removes_each_denylisted_tag() {
        for tag in super::DANGEROUS_TAGS {
            let input = format!("<{tag} a=b>payload</{tag}><em>keep</em>");
            let out = sanitize_html(&input);
            assert!(
                !out.to_lowercase().contains(&format!("<{tag}")),
                "tag {tag} survived: {out}"
            );
            assert!(out.contains("<em>keep</em>"));
        }
    }

    #[test]
    fn removes_self_closing_dangerous_tags() {
        let out = sanitize_html(r#"<input type="text"/><p>form-free</p>"#);
        assert!(!out.contains("<input"));
        assert!(out.contains("<p>form-free</p>"));
    }

    #[test]
    fn strips_quoted_event_handlers() {
        let out = sanitize_html(r#"<img src="x.png" onerror="alert(1)">"#);
        assert!(!out.contains("onerror"));
        assert!(out.contains(r#"src="x.png""#));
    }

    #[test]
    fn strips_unquoted_event_handlers() {
        let out = sanitize_html("<img src=x.png onerror=alert(1)>");
        assert!(!out.contains("onerror"));
    }

    #[test]
    fn catch_all_sweep_covers_unlisted_handlers() {
        let out = sanitize_html(r#"<div onpointerdown="evil()">text</div>"#);
        assert!(!out.contains("onpointerdown"));
        assert!(out.contains("text"));
    }

    #[test]
    fn neutralizes_dangerous_protocols_in_href() {
        for protocol in super::DANGEROUS_PROTOCOLS {
            let input = format!(r#"<a href="{protocol}evil">x</a>"#);
            let out = sanitize_html(&input);
            assert!(out.contains(r##"href="#""##), "protocol {protocol}: {out}");
            assert!(!out.contains(protocol));
        }
    }

    #[test]
    fn neutralizes_javascript_src() {
        let out = sanitize_html(r#"<img src="javascript:alert(1)">"#);
        assert!(out.contains(r#"src="""#));
        assert!(!out.contains("javascript:"));
    }

    #[test]
    fn preserves_safe_markup() {
        let input = r#"<h2>Title</h2><p>Body with <strong>bold</strong> and <a href="https://example.com">a link</a>.</p>"#;
        assert_eq!(sanitize_html(input), input);
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert_eq!(sanitize_html(""), "");
        assert!(is_html_safe(""));
    }

    #[test]
    fn safety_gate_rejects_raw_xss() {
        assert!(!is_html_safe("<img onerror=alert(1)>"));
        assert!(!is_html_safe("<script>alert(1)</script>"));
        assert!(!is_html_safe(r#"<a href="javascript:alert(1)">x</a>"#));
        assert!(!is_html_safe(r#"<iframe src="https://evil.example"></iframe>"#));
        assert!(!is_html_safe(r#"<a href="data:text/html;base64,AAAA">x</a>"#));
    }

    #[test]
    fn safety_gate_rejects_plain_text_javascript_protocol() {
        // Not inside an attribute, so the sanitizer leaves it alone; the gate
        // still refuses it.
        assert!(!is_html_safe("<p>click javascript:alert(1)</p>"));
    }

    #[test]
    fn safety_gate_accepts_clean_content() {
        assert!(is_html_safe("<p>hello <b>world</b></p>"));
    }
}
