// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Page/limit pagination over insertion-ordered record lists.

use crate::error::DomainError;
use serde::Serialize;

/// Page number used when the caller omits `page`.
pub const DEFAULT_PAGE: u32 = 1;
/// Page size used when the caller omits `limit`.
pub const DEFAULT_LIMIT: u32 = 10;
/// Largest page size a caller may request.
pub const MAX_LIMIT: u32 = 100;

/// A validated page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u32,
    limit: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            page: DEFAULT_PAGE,
            limit: DEFAULT_LIMIT,
        }
    }
}

impl Pagination {
    /// Builds a page request from raw query values.
    ///
    /// Missing values fall back to `DEFAULT_PAGE` / `DEFAULT_LIMIT`.
    /// A `limit` above `MAX_LIMIT` is clamped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPagination` if either value is below 1,
    /// or if `page` does not fit in a `u32`.
    pub fn new(page: Option<i64>, limit: Option<i64>) -> Result<Self, DomainError> {
        let raw_page: i64 = page.unwrap_or(i64::from(DEFAULT_PAGE));
        let page: u32 = u32::try_from(raw_page)
            .ok()
            .filter(|p| *p >= 1)
            .ok_or(DomainError::InvalidPagination {
                field: "page",
                value: raw_page,
            })?;

        let limit: i64 = limit.unwrap_or(i64::from(DEFAULT_LIMIT));
        if limit < 1 {
            return Err(DomainError::InvalidPagination {
                field: "limit",
                value: limit,
            });
        }

        Ok(Self {
            page,
            limit: u32::try_from(limit.min(i64::from(MAX_LIMIT))).unwrap_or(MAX_LIMIT),
        })
    }

    /// Returns the 1-based page number.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn limit(&self) -> u32 {
        self.limit
    }

    /// Number of records to skip before this page starts.
    #[must_use]
    pub fn offset(&self) -> i64 {
        (i64::from(self.page) - 1) * i64::from(self.limit)
    }
}

/// One page of records plus the total needed to compute the page count.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    /// The records on this page, in store order.
    pub items: Vec<T>,
    /// The page that was requested.
    pub page: u32,
    /// The page size that was applied.
    pub limit: u32,
    /// Total number of records across all pages.
    pub total: i64,
}

impl<T> Page<T> {
    /// Assembles a page from the records fetched for `pagination`.
    #[must_use]
    pub const fn new(items: Vec<T>, pagination: Pagination, total: i64) -> Self {
        Self {
            items,
            page: pagination.page,
            limit: pagination.limit,
            total,
        }
    }

    /// Number of pages needed to hold `total` records at this page size.
    #[must_use]
    pub fn total_pages(&self) -> i64 {
        let limit: i64 = i64::from(self.limit.max(1));
        (self.total + limit - 1) / limit
    }

    /// Converts every record on the page, keeping the page metadata.
    #[must_use]
    pub fn map<U, F: FnMut(T) -> U>(self, f: F) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            page: self.page,
            limit: self.limit,
            total: self.total,
        }
    }
}
