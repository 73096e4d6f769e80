//! # Pagination
//!
//! Page/offset arithmetic for browsing the catalog.
//!
//! ```text
//! page:    1        2        3        4
//!        ┌────────┬────────┬────────┬────┐
//! items: │ 0..10  │ 10..20 │ 20..30 │30..│   limit = 10, total = 34
//!        └────────┴────────┴────────┴────┘
//! offset = (page - 1) × limit          total_pages = ceil(34 / 10) = 4
//! ```
//!
//! When a listing is narrowed client-side (a subcategory filter applied
//! after fetching), the page count comes from the filtered count instead
//! and never drops below one page.

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::validation::{validate_limit, validate_page};
use crate::DEFAULT_PAGE_SIZE;

// =============================================================================
// Pagination Math
// =============================================================================

/// Inputs for [`calculate_pagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationParams {
    /// 1-based page number.
    pub current_page: u32,
    pub total_items: u64,
    pub limit: u32,
    #[serde(default)]
    pub has_subcategory_filter: bool,
    #[serde(default)]
    pub filtered_items_count: u64,
}

impl PaginationParams {
    /// Params for an unfiltered listing.
    pub fn new(current_page: u32, total_items: u64, limit: u32) -> Self {
        PaginationParams {
            current_page,
            total_items,
            limit,
            has_subcategory_filter: false,
            filtered_items_count: 0,
        }
    }

    /// Switches the page count over to a client-side filtered count.
    pub fn with_subcategory_filter(mut self, filtered_items_count: u64) -> Self {
        self.has_subcategory_filter = true;
        self.filtered_items_count = filtered_items_count;
        self
    }
}

/// Result of [`calculate_pagination`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaginationResult {
    pub current_page: u32,
    pub total_pages: u32,
    pub offset: u64,
    pub limit: u32,
}

impl PaginationResult {
    /// Whether a page follows the current one.
    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Whether a page precedes the current one.
    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    /// Fails if the current page lies past the last page.
    ///
    /// An empty listing (zero pages) accepts page 1 so that "no results"
    /// renders as an empty first page rather than an error.
    pub fn ensure_in_range(&self) -> CoreResult<()> {
        if self.current_page > self.total_pages.max(1) {
            return Err(CoreError::PageOutOfRange {
                page: self.current_page,
                total_pages: self.total_pages,
            });
        }
        Ok(())
    }
}

/// Computes the offset and page count for one page of a listing.
///
/// ## Formulas
/// - `offset = (current_page - 1) × limit`
/// - unfiltered: `total_pages = ceil(total_items / limit)`
/// - subcategory filter: `total_pages = max(1, ceil(filtered_items_count / limit))`
///
/// ## Errors
/// `current_page` of 0 or a `limit` outside `1..=MAX_PAGE_SIZE`.
///
/// ## Example
/// ```rust
/// use storefront_core::pagination::{calculate_pagination, PaginationParams};
///
/// let page = calculate_pagination(PaginationParams::new(3, 34, 10)).unwrap();
/// assert_eq!(page.offset, 20);
/// assert_eq!(page.total_pages, 4);
/// ```
pub fn calculate_pagination(params: PaginationParams) -> CoreResult<PaginationResult> {
    validate_page(params.current_page)?;
    validate_limit(params.limit)?;

    let limit = u64::from(params.limit);
    let offset = u64::from(params.current_page - 1) * limit;

    let total_pages = if params.has_subcategory_filter {
        params.filtered_items_count.div_ceil(limit).max(1)
    } else {
        params.total_items.div_ceil(limit)
    };

    Ok(PaginationResult {
        current_page: params.current_page,
        total_pages: u32::try_from(total_pages).unwrap_or(u32::MAX),
        offset,
        limit: params.limit,
    })
}

// =============================================================================
// Paginator
// =============================================================================

/// Tracks the current page of a listing as the shopper moves through it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    current_page: u32,
    page_size: u32,
}

impl Default for Paginator {
    fn default() -> Self {
        Paginator {
            current_page: 1,
            page_size: DEFAULT_PAGE_SIZE,
        }
    }
}

impl Paginator {
    /// Starts at `initial_page` with `page_size` items per page.
    pub fn new(initial_page: u32, page_size: u32) -> CoreResult<Self> {
        validate_page(initial_page)?;
        validate_limit(page_size)?;
        Ok(Paginator {
            current_page: initial_page,
            page_size,
        })
    }

    pub fn current_page(&self) -> u32 {
        self.current_page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    /// Offset of the first item on the current page.
    pub fn offset(&self) -> u32 {
        (self.current_page - 1).saturating_mul(self.page_size)
    }

    /// Moves forward one page.
    pub fn next_page(&mut self) {
        self.current_page = self.current_page.saturating_add(1);
    }

    /// Moves back one page; stays on page 1.
    pub fn previous_page(&mut self) {
        if self.current_page > 1 {
            self.current_page -= 1;
        }
    }

    /// Jumps to `page` (1-based).
    pub fn go_to_page(&mut self, page: u32) -> CoreResult<()> {
        validate_page(page)?;
        self.current_page = page;
        Ok(())
    }

    /// Pagination figures for the current page of a listing of
    /// `total_items`.
    pub fn paginate(&self, total_items: u64) -> CoreResult<PaginationResult> {
        calculate_pagination(PaginationParams::new(
            self.current_page,
            total_items,
            self.page_size,
        ))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
