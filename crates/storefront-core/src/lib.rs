//! # storefront-core: Pure Cart Logic for the Storefront
//!
//! This crate is the **heart** of the storefront. It holds the catalog
//! types, the cart state machine and the pagination math as pure functions
//! with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Architecture                          │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (storefront CLI)                  │   │
//! │  │    products list ──► cart add ──► cart update ──► cart show     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │      CartStore (storefront-store) + CatalogClient (catalog)     │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │            ★ storefront-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │pagination │  │   │
//! │  │   │  Product  │  │   Money   │  │ CartState │  │ Paginator │  │   │
//! │  │   │ Category  │  │           │  │ CartItem  │  │           │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO STORAGE • NO NETWORK • PURE FUNCTIONS             │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog types (Product, Category, ProductFilters)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - Cart items and the cart state transitions
//! - [`pagination`] - Page/offset arithmetic for catalog browsing
//! - [`subcategory`] - Keyword-matched refinements of a category
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation
//!
//! ## Example Usage
//!
//! ```rust
//! use storefront_core::{CartState, Category, Product};
//!
//! let product = Product {
//!     id: 1,
//!     title: "Classic Tee".to_string(),
//!     price: 10.0,
//!     description: String::new(),
//!     category: Category { id: 1, name: "Clothes".to_string(), image: String::new(), creation_at: None, updated_at: None },
//!     images: vec![],
//!     creation_at: None,
//!     updated_at: None,
//! };
//!
//! let mut cart = CartState::new();
//! cart.add_to_cart(&product);
//! cart.add_to_cart(&product);
//!
//! assert_eq!(cart.total_items(), 2);
//! assert_eq!(cart.total_price().cents(), 2000);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod pagination;
pub mod subcategory;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{CartItem, CartState};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use pagination::{calculate_pagination, PaginationParams, PaginationResult, Paginator};
pub use subcategory::Subcategory;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Default number of products shown per catalog page.
pub const DEFAULT_PAGE_SIZE: u32 = 10;

/// Largest page size accepted from user input.
///
/// The upstream API accepts larger limits, but a page this size is already
/// more than a terminal or a product grid can usefully show.
pub const MAX_PAGE_SIZE: u32 = 100;

/// Largest quantity a single cart line can hold.
///
/// Larger requests are rejected by the CLI and capped by the cart itself, so
/// cent totals stay far from `i64` overflow.
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Maximum length of a product search query.
pub const MAX_SEARCH_QUERY_LEN: usize = 100;
