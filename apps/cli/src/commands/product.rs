//! # Product Commands
//!
//! Commands for browsing, searching and showing catalog products.
//!
//! ## Listing Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Product Listing Flow                                 │
//! │                                                                         │
//! │  storefront products list --page 2 --category 1 --subcategory caps    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Paginator::new(2, 10) ──► offset 10                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌───────────────────────────────────────────┐                         │
//! │  │  concurrently (tokio::try_join!)          │                         │
//! │  │  GET /categories/1/products?offset&limit  │  the page               │
//! │  │  GET /categories/1/products               │  the total count        │
//! │  └───────────────────────────────────────────┘                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Subcategory::Caps.filter(page) ──► keyword match on title/description │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  calculate_pagination(..) ──► "Page 2 of 4"                            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::time::Instant;

use serde::Serialize;
use tracing::{debug, info};

use storefront_catalog::CatalogClient;
use storefront_core::validation::{validate_id, validate_search_query};
use storefront_core::{
    calculate_pagination, Category, CategoryId, PaginationParams, PaginationResult, Paginator,
    Product, ProductFilters, ProductId, Subcategory,
};

use crate::error::ApiError;

/// Which page of which listing to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductListQuery {
    pub page: u32,
    pub limit: u32,
    pub category: Option<CategoryId>,
    pub subcategory: Option<String>,
}

impl ProductListQuery {
    /// First page of the whole catalog.
    pub fn new(limit: u32) -> Self {
        ProductListQuery {
            page: 1,
            limit,
            category: None,
            subcategory: None,
        }
    }
}

/// One page of products with its pager.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub pagination: PaginationResult,
    /// Items the page count is based on (the filtered count when a
    /// subcategory is active).
    pub total_items: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

/// Lists one page of products, optionally within a category and narrowed
/// to a subcategory.
///
/// ## Page Counts
/// - No subcategory: pages of the catalog (or category) total
/// - Subcategory: the filtered page alone, at least one page
///
/// ## Errors
/// Validation errors for page/limit/ids/subcategory names, `PageOutOfRange`
/// for an unfiltered page past the end, and catalog errors.
pub async fn list_products(
    catalog: &CatalogClient,
    query: &ProductListQuery,
) -> Result<ProductListResponse, ApiError> {
    let start = Instant::now();
    debug!(
        page = query.page,
        limit = query.limit,
        category = ?query.category,
        subcategory = ?query.subcategory,
        "list_products command"
    );

    let subcategory = query
        .subcategory
        .as_deref()
        .map(str::parse::<Subcategory>)
        .transpose()?;
    if let Some(category_id) = query.category {
        validate_id("category id", category_id)?;
    }

    let paginator = Paginator::new(query.page, query.limit)?;
    let offset = paginator.offset();

    let (products, total) = match query.category {
        Some(category_id) => tokio::try_join!(
            catalog.get_category_products(category_id, offset, query.limit),
            catalog.get_category_products_count(category_id),
        )?,
        None => tokio::try_join!(
            catalog.get_products_page(offset, query.limit),
            catalog.get_products_count(),
        )?,
    };

    let params = PaginationParams::new(query.page, total as u64, query.limit);
    let (products, params) = match subcategory {
        Some(sub) => {
            let filtered = sub.filter(products);
            let count = filtered.len() as u64;
            (filtered, params.with_subcategory_filter(count))
        }
        None => (products, params),
    };

    let pagination = calculate_pagination(params)?;
    if subcategory.is_none() {
        pagination.ensure_in_range()?;
    }

    let total_items = if params.has_subcategory_filter {
        params.filtered_items_count
    } else {
        params.total_items
    };

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        total_pages = pagination.total_pages,
        "list_products complete"
    );

    Ok(ProductListResponse {
        products,
        pagination,
        total_items,
        query: None,
    })
}

/// Searches products by title.
///
/// ## Arguments
/// * `query` - Search term (trimmed, 1-100 characters)
/// * `page`, `limit` - Which page of the results to show
pub async fn search_products(
    catalog: &CatalogClient,
    query: &str,
    page: u32,
    limit: u32,
) -> Result<ProductListResponse, ApiError> {
    let start = Instant::now();
    debug!(query = %query, page, limit, "search_products command");

    let query = validate_search_query(query)?;
    let paginator = Paginator::new(page, limit)?;

    let page_filters = ProductFilters::page(paginator.offset(), limit);
    let all_filters = ProductFilters::default();
    let (products, all_matches) = tokio::try_join!(
        catalog.search_products(&query, &page_filters),
        catalog.search_products(&query, &all_filters),
    )?;

    let total_items = all_matches.len() as u64;
    let pagination = paginator.paginate(total_items)?;
    pagination.ensure_in_range()?;

    info!(
        elapsed_ms = start.elapsed().as_secs_f64() * 1000.0,
        count = products.len(),
        total_items,
        query = %query,
        "search_products complete"
    );

    Ok(ProductListResponse {
        products,
        pagination,
        total_items,
        query: Some(query),
    })
}

/// Gets a single product by id.
pub async fn show_product(catalog: &CatalogClient, id: ProductId) -> Result<Product, ApiError> {
    debug!(id, "show_product command");
    validate_id("product id", id)?;

    Ok(catalog.get_product(id).await?)
}

/// Lists all categories.
pub async fn list_categories(catalog: &CatalogClient) -> Result<Vec<Category>, ApiError> {
    debug!("list_categories command");
    Ok(catalog.get_categories().await?)
}

// =============================================================================
// Unit Tests
// =============================================================================
