//! Shared query parameter types for API handlers.

use folio_core::pagination::{PageRequest, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use serde::Deserialize;

/// Offset pagination parameters (`?limit=&offset=`).
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

impl PaginationParams {
    /// Requested limit, defaulting to [`DEFAULT_PAGE_SIZE`] and clamped to
    /// `1..=MAX_PAGE_SIZE`.
    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE)
    }

    /// Requested offset; negative values become zero.
    pub fn offset(&self) -> i64 {
        self.offset.unwrap_or(0).max(0)
    }
}

/// 1-based page parameters (`?page=&page_size=`).
#[derive(Debug, Deserialize)]
pub struct PageParams {
    pub page: Option<i64>,
    pub page_size: Option<i64>,
}

impl From<PageParams> for PageRequest {
    fn from(params: PageParams) -> Self {
        PageRequest::new(params.page, params.page_size)
    }
}
