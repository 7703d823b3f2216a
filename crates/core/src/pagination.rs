//! 1-based page arithmetic shared by listing endpoints.

use serde::Serialize;

/// Default number of items per page.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// Maximum number of items per page.
pub const MAX_PAGE_SIZE: i64 = 100;

/// A normalized page request. `page` is 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: i64,
    pub page_size: i64,
}

impl PageRequest {
    /// Build a page request from optional user input.
    ///
    /// Pages below 1 become 1; the page size is clamped to
    /// `1..=MAX_PAGE_SIZE` and defaults to [`DEFAULT_PAGE_SIZE`].
    pub fn new(page: Option<i64>, page_size: Option<i64>) -> Self {
        Self {
            page: page.unwrap_or(1).max(1),
            page_size: page_size.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE),
        }
    }

    /// SQL `LIMIT` for this page.
    pub fn limit(&self) -> i64 {
        self.page_size
    }

    /// SQL `OFFSET` for this page. Saturates instead of overflowing on
    /// absurd page numbers, which simply yields an empty page.
    pub fn offset(&self) -> i64 {
        (self.page - 1).saturating_mul(self.page_size)
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self::new(None, None)
    }
}

/// One page of results plus totals.
///
/// Serializes as `{ "data": [...], "total", "page", "page_size", "total_pages" }`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    #[serde(rename = "data")]
    pub items: Vec<T>,
    pub total: i64,
    pub page: i64,
    pub page_size: i64,
    pub total_pages: i64,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, total: i64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            page_size: request.page_size,
            total_pages: total_pages(total, request.page_size),
        }
    }
}

/// Number of pages needed for `total` items. Zero items means zero pages.
pub fn total_pages(total: i64, page_size: i64) -> i64 {
    if total <= 0 || page_size <= 0 {
        return 0;
    }
    (total + page_size - 1) / page_size
}
