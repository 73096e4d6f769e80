//! # Commands Module
//!
//! Every operation the CLI exposes.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs      ◄─── You are here (exports)
//! ├── product.rs  ◄─── Product listing, search, details, categories
//! └── cart.rs     ◄─── Cart manipulation
//! ```
//!
//! ## State Injection
//! Each command takes only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! async fn list_products(catalog: &CatalogClient, query: &ProductListQuery)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartHandle)
//!
//! // Needs both
//! async fn add_to_cart(catalog: &CatalogClient, cart: &CartHandle, product_id: ProductId)
//! ```
//!
//! Commands return plain response types; printing them (text or JSON) is
//! the job of [`crate::render`].

pub mod cart;
pub mod product;

pub use cart::{
    add_to_cart, clear_cart, get_cart, remove_from_cart, update_cart_item, CartResponse,
    CartTotals,
};
pub use product::{
    list_categories, list_products, search_products, show_product, ProductListQuery,
    ProductListResponse,
};
