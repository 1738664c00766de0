use std::ops::Range;

use serde::{Deserialize, Serialize};

use super::errors::{CatalogError, CatalogResult};

/// A 1-indexed page of `max` items
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageRequest {
    page: u32,
    max: u32,
}

impl PageRequest {
    /// Creates a page request
    ///
    /// # Returns
    /// * `Err(CatalogError::InvalidPage)` - If `page` or `max` is zero, or
    ///   the page starts beyond `i64::MAX` rows
    ///
    /// # Example
    /// ```
    /// use media_catalog::domain::pagination::PageRequest;
    ///
    /// let page = PageRequest::new(3, 10).expect("valid page");
    /// assert_eq!(page.offset(), 20);
    /// assert_eq!(page.window(25), 20..25);
    /// ```
    pub fn new(page: u32, max: u32) -> CatalogResult<Self> {
        if page == 0 || max == 0 {
            return Err(CatalogError::InvalidPage { page, max });
        }
        (i64::from(page) - 1)
            .checked_mul(i64::from(max))
            .ok_or(CatalogError::InvalidPage { page, max })?;
        Ok(Self { page, max })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Number of rows skipped before this page
    ///
    /// Cannot overflow: `new` rejects pages whose offset exceeds `i64::MAX`.
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.max)
    }

    pub fn limit(&self) -> i64 {
        i64::from(self.max)
    }

    /// Half-open index range of this page within `total` items
    ///
    /// Clamped to `total`; pages past the end give an empty range.
    pub fn window(&self, total: usize) -> Range<usize> {
        let start = usize::try_from(self.offset()).unwrap_or(usize::MAX);
        let end = start.saturating_add(self.max as usize);
        start.min(total)..end.min(total)
    }
}

/// One page of results plus the untruncated match count
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    pub total: i64,
    pub results: Vec<T>,
}

impl<T> Page<T> {
    pub fn new(total: i64, results: Vec<T>) -> Self {
        Self { total, results }
    }

    /// Slices an already materialized, ordered result set
    pub fn from_all(mut all: Vec<T>, request: &PageRequest) -> Self {
        let total = all.len();
        let window = request.window(total);
        let results = all.drain(window).collect();
        Self {
            total: total as i64,
            results,
        }
    }
}
