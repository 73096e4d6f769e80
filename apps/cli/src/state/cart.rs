//! # Cart State
//!
//! The session's cart store, shared by every command.
//!
//! ## Thread Safety
//! The store is wrapped in `Arc<Mutex<T>>` because the catalog calls are
//! async and a command may hold a clone of the handle across an `.await`.
//! The lock itself is only ever held for one synchronous transition and its
//! save, never across an `.await`.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Operations                                │
//! │                                                                         │
//! │  CLI Command              Command Function        Store Change          │
//! │  ───────────              ────────────────        ────────────          │
//! │                                                                         │
//! │  cart add 42 ────────────► add_to_cart() ───────► add + save           │
//! │                                                                         │
//! │  cart update 42 3 ───────► update_cart_item() ──► update + save        │
//! │                                                                         │
//! │  cart remove 42 ─────────► remove_from_cart() ──► remove + save        │
//! │                                                                         │
//! │  cart clear ─────────────► clear_cart() ────────► clear + save         │
//! │                                                                         │
//! │  cart show ──────────────► get_cart() ──────────► (read only)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex};

use storefront_store::{CartStore, KeyValueStorage, MemoryStorage, StoreError};

use crate::error::ApiError;

/// Storage backend picked at startup (file or memory).
pub type DynStorage = Box<dyn KeyValueStorage>;

/// Shared handle to the session's cart store.
#[derive(Clone)]
pub struct CartHandle {
    store: Arc<Mutex<CartStore<DynStorage>>>,
}

impl CartHandle {
    /// Wraps a store built on `storage`. The cart is not read from storage
    /// until [`CartHandle::initialize`] runs.
    pub fn with_storage<S>(storage: S) -> Self
    where
        S: KeyValueStorage + 'static,
    {
        let storage: DynStorage = Box::new(storage);
        CartHandle {
            store: Arc::new(Mutex::new(CartStore::new(storage))),
        }
    }

    /// A handle whose cart lives only in memory.
    pub fn in_memory() -> Self {
        Self::with_storage(MemoryStorage::new())
    }

    /// Loads the stored cart. Call once per session.
    pub fn initialize(&self) -> Result<(), ApiError> {
        self.with_cart_mut(|store| store.initialize_cart())?
            .map_err(ApiError::from)
    }

    /// Executes a function with read access to the store.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let count = cart.with_cart(|store| store.total_items())?;
    /// ```
    pub fn with_cart<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&CartStore<DynStorage>) -> R,
    {
        let store = self.store.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&store))
    }

    /// Executes a function with write access to the store.
    ///
    /// ## Example
    /// ```rust,ignore
    /// cart.with_cart_mut(|store| store.add_to_cart(&product))??;
    /// ```
    pub fn with_cart_mut<F, R>(&self, f: F) -> Result<R, ApiError>
    where
        F: FnOnce(&mut CartStore<DynStorage>) -> R,
    {
        let mut store = self.store.lock().map_err(|_| StoreError::LockPoisoned)?;
        Ok(f(&mut store))
    }
}

impl Default for CartHandle {
    fn default() -> Self {
        Self::in_memory()
    }
}
