//! # Catalog Types
//!
//! The records supplied by the upstream Product Catalog Service.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Catalog Types                                   │
//! │                                                                         │
//! │  ┌─────────────────┐        ┌─────────────────┐                        │
//! │  │    Product      │        │    Category     │                        │
//! │  │  ─────────────  │   ┌───►│  ─────────────  │                        │
//! │  │  id             │   │    │  id             │                        │
//! │  │  title          │   │    │  name           │                        │
//! │  │  price (number) │   │    │  image          │                        │
//! │  │  description    │   │    └─────────────────┘                        │
//! │  │  category ──────┼───┘                                               │
//! │  │  images[]       │        ┌─────────────────┐                        │
//! │  └─────────────────┘        │ ProductFilters  │  query parameters      │
//! │                             │  title, price…  │  for GET /products     │
//! │                             └─────────────────┘                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! These types are read-only to the storefront: it never creates or edits
//! catalog records, it only snapshots them into the cart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;

/// Catalog identifier of a product.
pub type ProductId = i64;

/// Catalog identifier of a category.
pub type CategoryId = i64;

// =============================================================================
// Category
// =============================================================================

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Category {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub creation_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

// =============================================================================
// Product
// =============================================================================

/// A product as listed by the catalog.
///
/// `price` keeps the wire representation (a JSON number in major units) so
/// that a product written back to storage is byte-for-byte what the catalog
/// sent. Arithmetic goes through [`Product::unit_price`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier; the cart's uniqueness key.
    pub id: ProductId,

    /// Display title.
    pub title: String,

    /// Price in major currency units (≥ 0).
    pub price: f64,

    #[serde(default)]
    pub description: String,

    pub category: Category,

    /// Image URLs, first one is the thumbnail.
    #[serde(default)]
    pub images: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub creation_at: Option<DateTime<Utc>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[ts(as = "Option<String>")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Returns the price as a Money type.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_decimal(self.price)
    }

    /// Returns the first image URL, if any.
    pub fn thumbnail(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

// =============================================================================
// Product Filters
// =============================================================================

/// Query parameters for `GET /products`.
///
/// Only fields that are set are sent; an empty filter lists the whole
/// catalog.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductFilters {
    pub title: Option<String>,
    pub price: Option<f64>,
    pub price_min: Option<f64>,
    pub price_max: Option<f64>,
    #[serde(rename = "categoryId")]
    pub category_id: Option<CategoryId>,
    pub offset: Option<u32>,
    pub limit: Option<u32>,
}

impl ProductFilters {
    /// Filters for one page of results.
    pub fn page(offset: u32, limit: u32) -> Self {
        ProductFilters {
            offset: Some(offset),
            limit: Some(limit),
            ..Default::default()
        }
    }

    /// Sets the title search term.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Restricts results to one category.
    pub fn with_category(mut self, category_id: CategoryId) -> Self {
        self.category_id = Some(category_id);
        self
    }

    /// Returns the set filters as `(name, value)` query pairs, in a stable
    /// order.
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();

        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            pairs.push(("title", title.to_string()));
        }
        if let Some(price) = self.price {
            pairs.push(("price", price.to_string()));
        }
        if let Some(price_min) = self.price_min {
            pairs.push(("price_min", price_min.to_string()));
        }
        if let Some(price_max) = self.price_max {
            pairs.push(("price_max", price_max.to_string()));
        }
        if let Some(category_id) = self.category_id {
            pairs.push(("categoryId", category_id.to_string()));
        }
        if let Some(offset) = self.offset {
            pairs.push(("offset", offset.to_string()));
        }
        if let Some(limit) = self.limit {
            pairs.push(("limit", limit.to_string()));
        }

        pairs
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
