//! # storefront-catalog: Product Catalog Client
//!
//! Read-only async access to the upstream Product Catalog Service.
//!
//! ## Request Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  client.get_product(4)                                                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  https://api.escuelajs.co/api/v1/products/4                            │
//! │       │                                                                 │
//! │       ├── cache hit (moka, TTL 1h) ──────────────► decode ──► Product   │
//! │       │                                                                 │
//! │       └── miss ──► reqwest GET ──► 2xx? ──► decode ──► cache + return  │
//! │                                      │                                  │
//! │                                      └── no ──► CatalogError            │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use storefront_catalog::{CatalogClient, CatalogConfig};
//!
//! let client = CatalogClient::new(&CatalogConfig::default())?;
//! let page = client.get_products_page(0, 10).await?;
//! let total = client.get_products_count().await?;
//! ```

pub mod client;
pub mod config;
pub mod error;

pub use client::CatalogClient;
pub use config::{CatalogConfig, DEFAULT_API_URL};
pub use error::{CatalogError, CatalogResult};
