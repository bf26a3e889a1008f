//! Typed models for the WordPress REST API surface the console uses.
//!
//! Date fields are kept as the raw strings WordPress returns (site-local
//! `YYYY-MM-DDTHH:MM:SS`); this layer passes them through rather than
//! reinterpreting timezones.

use chrono::{DateTime, Days, Months, Utc};
use serde::{Deserialize, Serialize};

/// WordPress `{ "rendered": ... }` wrapper used for titles, content, excerpts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WpRendered {
    pub rendered: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WpPost {
    pub id: u64,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub modified: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub link: Option<String>,
    pub title: WpRendered,
    pub content: WpRendered,
    #[serde(default)]
    pub excerpt: Option<WpRendered>,
    #[serde(default)]
    pub author: u64,
    #[serde(default)]
    pub categories: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WpCategory {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub count: Option<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WpUser {
    pub id: u64,
    pub name: String,
    #[serde(default)]
    pub slug: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WpMedia {
    pub id: u64,
    #[serde(default)]
    pub date: String,
    pub title: WpRendered,
    pub source_url: String,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// One page of a list response, paired with the `X-WP-Total` /
/// `X-WP-TotalPages` pagination headers.
#[derive(Debug, Clone, Serialize)]
pub struct WpPage<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub total_pages: u64,
}

/// Fields for creating or updating a post.
#[derive(Debug, Clone, Serialize)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub categories: Vec<u64>,
    pub author: u64,
    /// `publish` or `draft`. New posts default to `draft`.
    pub status: String,
}

/// Date-range filter offered by the post list: everything, or the last N
/// months.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Period {
    #[default]
    All,
    OneMonth,
    ThreeMonths,
    SixMonths,
}

impl Period {
    /// Parse the query-string form (`all | 1m | 3m | 6m`). Unknown values
    /// fall back to `All` so a stale link never errors.
    pub fn parse(value: &str) -> Self {
        match value {
            "1m" => Period::OneMonth,
            "3m" => Period::ThreeMonths,
            "6m" => Period::SixMonths,
            _ => Period::All,
        }
    }

    /// Lower bound of the range, or `None` for `All`.
    pub fn after(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        let months = match self {
            Period::All => return None,
            Period::OneMonth => 1,
            Period::ThreeMonths => 3,
            Period::SixMonths => 6,
        };
        now.checked_sub_months(Months::new(months))
    }

    /// Upper bound: tomorrow, so that posts published today are included.
    pub fn before(&self, now: DateTime<Utc>) -> Option<DateTime<Utc>> {
        if *self == Period::All {
            return None;
        }
        now.checked_add_days(Days::new(1))
    }
}

/// Filters for the post list.
#[derive(Debug, Clone)]
pub struct PostFilters {
    pub page: u32,
    pub per_page: u32,
    pub period: Period,
    pub categories: Vec<u64>,
    pub author: Option<u64>,
}

impl Default for PostFilters {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: 10,
            period: Period::All,
            categories: Vec::new(),
            author: None,
        }
    }
}

/// Filters for the media list.
#[derive(Debug, Clone)]
pub struct MediaFilters {
    pub page: u32,
    pub per_page: u32,
}

impl Default for MediaFilters {
    fn default() -> Self {
        Self { page: 1, per_page: 20 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn period_parses_query_values() {
        assert_eq!(Period::parse("all"), Period::All);
        assert_eq!(Period::parse("1m"), Period::OneMonth);
        assert_eq!(Period::parse("3m"), Period::ThreeMonths);
        assert_eq!(Period::parse("6m"), Period::SixMonths);
        assert_eq!(Period::parse("garbage"), Period::All);
    }

    #[test]
    fn period_all_has_no_bounds() {
        let now = Utc::now();
        assert!(Period::All.after(now).is_none());
        assert!(Period::All.before(now).is_none());
    }

    #[test]
    fn period_bounds_cover_the_window() {
        let now = Utc.with_ymd_and_hms(2025, 6, 15, 12, 0, 0).unwrap();
        let after = Period::ThreeMonths.after(now).unwrap();
        assert_eq!(after, Utc.with_ymd_and_hms(2025, 3, 15, 12, 0, 0).unwrap());

        let before = Period::ThreeMonths.before(now).unwrap();
        assert_eq!(before, Utc.with_ymd_and_hms(2025, 6, 16, 12, 0, 0).unwrap());
    }

    #[test]
    fn post_deserializes_from_rest_payload() {
        let json = serde_json::json!({
            "id": 42,
            "date": "2025-01-02T03:04:05",
            "title": { "rendered": "Hello" },
            "content": { "rendered": "<p>Body</p>" },
            "author": 1,
            "categories": [3, 7],
            "status": "draft"
        });
        let post: WpPost = serde_json::from_value(json).unwrap();
        assert_eq!(post.id, 42);
        assert_eq!(post.title.rendered, "Hello");
        assert_eq!(post.categories, vec![3, 7]);
        assert!(post.excerpt.is_none());
    }
}
