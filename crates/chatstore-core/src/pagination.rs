//! Page-number pagination.
//!
//! Callers ask for `(page, limit)` with 1-based pages; storage wants
//! `(skip, take)`. [`paginate`] does the arithmetic and [`PageRequest`]
//! normalises raw query input.

/// Page used when the caller does not ask for one.
pub const DEFAULT_PAGE: u32 = 1;

/// Page size used when the caller does not ask for one.
pub const DEFAULT_PAGE_LIMIT: u32 = 20;

/// Largest page size served. Bigger requests are clamped to this.
pub const MAX_PAGE_LIMIT: u32 = 100;

/// Storage window for one page plus the page count for the whole set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub skip: u64,
    pub take: u64,
    pub total_pages: u64,
}

/// Compute the storage window for `page` of size `limit` over `total` rows.
///
/// `total_pages` is at least 1 so an empty set still has a first page.
/// `page` 0 is treated as page 1 and `limit` 0 as 1.
pub fn paginate(page: u32, limit: u32, total: u64) -> PageWindow {
    let page = u64::from(page.max(1));
    let limit = u64::from(limit.max(1));

    PageWindow {
        skip: (page - 1) * limit,
        take: limit,
        total_pages: total.div_ceil(limit).max(1),
    }
}

/// A validated `(page, limit)` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_PAGE_LIMIT,
        }
    }
}

impl PageRequest {
    /// Build a page request from optional raw input.
    ///
    /// Missing values take the defaults. Values below 1 are rejected;
    /// `limit` above [`MAX_PAGE_LIMIT`] is clamped.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, String> {
        let page = page.unwrap_or(i64::from(DEFAULT_PAGE));
        let limit = limit.unwrap_or(i64::from(DEFAULT_PAGE_LIMIT));

        if page < 1 {
            return Err(format!("page must be a positive integer, got {page}"));
        }
        if limit < 1 {
            return Err(format!("limit must be a positive integer, got {limit}"));
        }

        let page = u32::try_from(page).map_err(|_| format!("page {page} is out of range"))?;
        let limit = limit.min(i64::from(MAX_PAGE_LIMIT)) as u32;

        Ok(Self { page, limit })
    }

    /// Storage window for this request over `total` rows.
    pub fn window(&self, total: u64) -> PageWindow {
        paginate(self.page, self.limit, total)
    }
}
