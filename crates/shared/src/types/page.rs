//! Pagination types for list endpoints.
//!
//! Listing queries fetch one row beyond the requested limit; the extra row
//! only signals whether a next page exists and is never returned.

use serde::{Deserialize, Serialize};

/// Request parameters for paginated queries.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct PageRequest {
    /// Page number (1-indexed).
    #[serde(default = "default_page")]
    page: u32,
    /// Number of items per page.
    #[serde(default = "default_limit")]
    limit: u32,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> u32 {
    20
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: default_page(),
            limit: default_limit(),
        }
    }
}

impl PageRequest {
    /// Largest accepted per-page limit.
    pub const MAX_LIMIT: u32 = 100;

    /// Creates a request, clamping out-of-range values instead of failing.
    #[must_use]
    pub fn new(page: u32, limit: u32) -> Self {
        Self { page, limit }
    }

    /// Returns the page number, never below 1.
    #[must_use]
    pub fn page(&self) -> u32 {
        self.page.max(1)
    }

    /// Returns the per-page limit, clamped to `1..=MAX_LIMIT`.
    #[must_use]
    pub fn limit(&self) -> u32 {
        self.limit.clamp(1, Self::MAX_LIMIT)
    }

    /// Calculates the offset for database queries.
    #[must_use]
    pub fn offset(&self) -> u64 {
        u64::from(self.page() - 1) * u64::from(self.limit())
    }

    /// Returns the row count to fetch: the limit plus one look-ahead row.
    #[must_use]
    pub fn fetch_limit(&self) -> u64 {
        u64::from(self.limit()) + 1
    }
}

/// Response wrapper for paginated data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Page<T> {
    /// Current page number.
    pub page: u32,
    /// Items per page.
    pub limit: u32,
    /// Whether a previous page exists.
    pub has_prev: bool,
    /// Whether a next page exists.
    pub has_next: bool,
    /// The items in the current page.
    pub data: Vec<T>,
}

impl<T> Page<T> {
    /// Builds a page from rows fetched with [`PageRequest::fetch_limit`].
    ///
    /// The look-ahead row, when present, is dropped from the returned data.
    #[must_use]
    pub fn from_rows(mut rows: Vec<T>, request: &PageRequest) -> Self {
        let limit = request.limit();
        let has_next = rows.len() > limit as usize;
        rows.truncate(limit as usize);

        Self {
            page: request.page(),
            limit,
            has_prev: request.page() > 1,
            has_next,
            data: rows,
        }
    }

    /// Maps the page data, keeping the pagination metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            page: self.page,
            limit: self.limit,
            has_prev: self.has_prev,
            has_next: self.has_next,
            data: self.data.into_iter().map(f).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_page_and_limit() {
        let request = PageRequest::new(0, 0);
        assert_eq!(request.page(), 1);
        assert_eq!(request.limit(), 1);

        let request = PageRequest::new(3, 500);
        assert_eq!(request.limit(), PageRequest::MAX_LIMIT);
        assert_eq!(request.offset(), 200);
    }

    #[test]
    fn look_ahead_row_marks_next_page() {
        let request = PageRequest::new(1, 2);
        let page = Page::from_rows(vec![1, 2, 3], &request);

        assert_eq!(page.data, vec![1, 2]);
        assert!(page.has_next);
        assert!(!page.has_prev);
    }

    #[test]
    fn short_page_has_no_next() {
        let request = PageRequest::new(2, 5);
        let page = Page::from_rows(vec![1, 2], &request);

        assert_eq!(page.data, vec![1, 2]);
        assert!(!page.has_next);
        assert!(page.has_prev);
    }

    #[test]
    fn map_keeps_metadata() {
        let request = PageRequest::new(2, 2);
        let page = Page::from_rows(vec![1, 2, 3], &request).map(|n| n * 10);

        assert_eq!(page.data, vec![10, 20]);
        assert_eq!(page.page, 2);
        assert!(page.has_next);
        assert!(page.has_prev);
    }
}

#[cfg(test)]
mod property_tests {
    use super::*;
    use proptest::prelude::*;

    // For any fetched row set, the returned data never exceeds the limit and
    // has_next is set exactly when the look-ahead row was present.
    proptest! {
        #[test]
        fn prop_page_respects_limit(
            page in 1u32..1000,
            limit in 1u32..=PageRequest::MAX_LIMIT,
            rows in prop::collection::vec(any::<u8>(), 0..220),
        ) {
            let request = PageRequest::new(page, limit);
            let fetched = rows.len();
            let result = Page::from_rows(rows, &request);

            prop_assert!(result.data.len() <= limit as usize);
            prop_assert_eq!(result.has_next, fetched > limit as usize);
            prop_assert_eq!(result.has_prev, page > 1);
        }
    }

    // Offset/limit arithmetic never wraps.
    proptest! {
        #[test]
        fn prop_offset_is_consistent(page in 1u32.., limit in any::<u32>()) {
            let request = PageRequest::new(page, limit);
            prop_assert_eq!(
                request.offset(),
                u64::from(request.page() - 1) * u64::from(request.limit())
            );
            prop_assert_eq!(request.fetch_limit(), u64::from(request.limit()) + 1);
        }
    }
}
