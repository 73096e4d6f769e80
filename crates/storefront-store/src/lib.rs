//! # storefront-store: Durable Cart Storage
//!
//! This crate keeps the shopper's cart across restarts. It pairs the pure
//! cart transitions from `storefront-core` with a key-value storage backend.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Storefront Data Flow                             │
//! │                                                                         │
//! │  CLI command (cart add 4)                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                 storefront-store (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   CartStore   │    │CartRepository │    │   Storage    │  │   │
//! │  │   │  (store.rs)   │───►│(repository.rs)│───►│ (storage.rs) │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ transition +  │    │ load / save   │    │ FileStorage  │  │   │
//! │  │   │ save          │    │ "cart-storage"│    │ MemoryStorage│  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │   ~/.local/share/storefront/cart-storage.json                   │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`storage`] - `KeyValueStorage` trait and its backends
//! - [`repository`] - The persisted cart record
//! - [`store`] - `CartStore`, the stateful wrapper used by the app
//! - [`error`] - Storage error types
//!
//! ## Usage
//!
//! ```rust
//! use storefront_store::{CartStore, MemoryStorage};
//!
//! let mut store = CartStore::new(MemoryStorage::new());
//! store.initialize_cart()?;
//! assert_eq!(store.total_items(), 0);
//! # Ok::<(), storefront_store::StoreError>(())
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod storage;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use repository::{CartRepository, CART_STORAGE_KEY};
pub use storage::{FileStorage, KeyValueStorage, MemoryStorage};
pub use store::CartStore;
