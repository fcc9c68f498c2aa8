//! Page-based pagination for list endpoints (`?page=&limit=`).
//!
//! Pages are 1-based. Out-of-range client values are clamped rather than
//! rejected.

use serde::{Deserialize, Serialize};

/// Default number of results per page.
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Maximum number of results per page.
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Clamp a user-provided page number to 1 or greater.
#[must_use]
pub fn clamp_page(page: Option<i64>) -> i64 {
    page.unwrap_or(1).max(1)
}

/// Clamp a user-provided page size to valid bounds.
#[must_use]
pub fn clamp_limit(limit: Option<i64>) -> i64 {
    limit.unwrap_or(DEFAULT_PAGE_LIMIT).max(1).min(MAX_PAGE_LIMIT)
}

/// Row offset for a 1-based page.
#[must_use]
pub fn offset_for_page(page: i64, limit: i64) -> i64 {
    (page - 1) * limit
}

/// Number of pages needed for `total` rows (ceiling division).
#[must_use]
pub fn total_pages(total: i64, limit: i64) -> i64 {
    if total <= 0 {
        0
    } else {
        (total + limit - 1) / limit
    }
}

/// Pagination metadata returned alongside a page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
    pub page: i64,
    pub limit: i64,
    pub total: i64,
    pub total_pages: i64,
}

impl PageMeta {
    #[must_use]
    pub fn new(page: i64, limit: i64, total: i64) -> Self {
        PageMeta {
            page,
            limit,
            total,
            total_pages: total_pages(total, limit),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -- clamps ---------------------------------------------------------------

    #[test]
    fn page_defaults_to_one() {
        assert_eq!(clamp_page(None), 1);
    }

    #[test]
    fn zero_and_negative_pages_clamp_to_one() {
        assert_eq!(clamp_page(Some(0)), 1);
        assert_eq!(clamp_page(Some(-3)), 1);
    }

    #[test]
    fn limit_defaults_and_clamps_to_bounds() {
        assert_eq!(clamp_limit(None), DEFAULT_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(0)), 1);
        assert_eq!(clamp_limit(Some(MAX_PAGE_LIMIT + 50)), MAX_PAGE_LIMIT);
        assert_eq!(clamp_limit(Some(25)), 25);
    }

    // -- offsets and page counts ----------------------------------------------

    #[test]
    fn first_page_has_zero_offset() {
        assert_eq!(offset_for_page(1, 10), 0);
    }

    #[test]
    fn later_pages_skip_whole_pages() {
        assert_eq!(offset_for_page(3, 10), 20);
    }

    #[test]
    fn total_pages_rounds_up() {
        assert_eq!(total_pages(0, 10), 0);
        assert_eq!(total_pages(1, 10), 1);
        assert_eq!(total_pages(10, 10), 1);
        assert_eq!(total_pages(11, 10), 2);
    }

    // -- PageMeta -------------------------------------------------------------

    #[test]
    fn meta_computes_total_pages() {
        let meta = PageMeta::new(2, 10, 35);
        assert_eq!(meta.total_pages, 4);
    }

    #[test]
    fn meta_serializes_camel_case() {
        let json = serde_json::to_value(PageMeta::new(1, 10, 0)).unwrap();
        assert_eq!(json["totalPages"], 0);
        assert_eq!(json["page"], 1);
    }
}
