//! # Cart Store
//!
//! The process-local cart: pure transitions from storefront-core, saved to
//! local storage after each one.
//!
//! ## Mutation Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  store.add_to_cart(&product)                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartState::add_to_cart   ← pure, cannot fail, totals recomputed       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CartRepository::save     ← { "items": [...] } under "cart-storage"    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  StoreResult<()>          ← Err only if the write failed; the          │
//! │                             in-memory cart is already updated          │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Session Lifecycle
//! The host creates one store per session and calls
//! [`CartStore::initialize_cart`] once before showing totals. Mutating before
//! that is allowed; the mutation is saved over whatever was stored.

use tracing::{debug, info, warn};

use storefront_core::{CartItem, CartState, Money, Product, ProductId};

use crate::error::{StoreError, StoreResult};
use crate::repository::CartRepository;
use crate::storage::KeyValueStorage;

/// Cart state plus the repository it is persisted through.
#[derive(Debug)]
pub struct CartStore<S> {
    state: CartState,
    repository: CartRepository<S>,
    initialized: bool,
}

impl<S: KeyValueStorage> CartStore<S> {
    /// Creates a store with an empty cart. Nothing is read from storage
    /// until [`CartStore::initialize_cart`] runs.
    pub fn new(storage: S) -> Self {
        CartStore {
            state: CartState::new(),
            repository: CartRepository::new(storage),
            initialized: false,
        }
    }

    /// Rehydrates the cart from storage and recomputes its totals.
    ///
    /// Idempotent: calling it again re-derives the same cart from the same
    /// stored items.
    ///
    /// ## Unreadable Records
    /// A record that exists but can't be parsed is logged and ignored; the
    /// cart starts empty and the next mutation overwrites the record.
    /// Storage I/O failures are returned.
    pub fn initialize_cart(&mut self) -> StoreResult<()> {
        self.state = match self.repository.load() {
            Ok(Some(items)) => CartState::from_items(items),
            Ok(None) => CartState::new(),
            Err(StoreError::Corrupt { key, reason }) => {
                warn!(key = %key, reason = %reason, "Stored cart is unreadable, starting empty");
                CartState::new()
            }
            Err(e) => return Err(e),
        };
        self.initialized = true;

        info!(
            lines = self.state.line_count(),
            total_items = self.state.total_items(),
            total_price = %self.state.total_price(),
            "Cart initialized"
        );
        Ok(())
    }

    /// Adds one of `product`, then saves.
    pub fn add_to_cart(&mut self, product: &Product) -> StoreResult<()> {
        debug!(product_id = product.id, "add_to_cart");
        self.state.add_to_cart(product);
        self.persist()
    }

    /// Removes the line for `product_id` (no-op if absent), then saves.
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> StoreResult<()> {
        let removed = self.state.remove_from_cart(product_id);
        debug!(product_id, removed, "remove_from_cart");
        self.persist()
    }

    /// Sets a line's quantity (`<= 0` removes it), then saves.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> StoreResult<()> {
        let changed = self.state.update_quantity(product_id, quantity);
        debug!(product_id, quantity, changed, "update_quantity");
        self.persist()
    }

    /// Empties the cart, then saves.
    pub fn clear_cart(&mut self) -> StoreResult<()> {
        debug!("clear_cart");
        self.state.clear_cart();
        self.persist()
    }

    /// Current cart snapshot.
    pub fn state(&self) -> &CartState {
        &self.state
    }

    pub fn items(&self) -> &[CartItem] {
        self.state.items()
    }

    pub fn total_items(&self) -> i64 {
        self.state.total_items()
    }

    pub fn total_price(&self) -> Money {
        self.state.total_price()
    }

    /// Whether [`CartStore::initialize_cart`] has run in this session.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    fn persist(&self) -> StoreResult<()> {
        self.repository.save(&self.state)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::CART_STORAGE_KEY;
    use crate::storage::{FileStorage, MemoryStorage};
    use storefront_core::Category;

    fn product(id: i64, price: f64) -> Product {
        Product {
            id,
            title: format!("Product {id}"),
            price,
            description: String::new(),
            category: Category {
                id: 1,
                name: "Clothes".to_string(),
                image: String::new(),
                creation_at: None,
                updated_at: None,
            },
            images: vec![],
            creation_at: None,
            updated_at: None,
        }
    }

    /// Storage whose writes always fail, like a full disk.
    struct ReadOnlyStorage;

    impl KeyValueStorage for ReadOnlyStorage {
        fn get_item(&self, _key: &str) -> StoreResult<Option<String>> {
            Ok(None)
        }

        fn set_item(&self, key: &str, _value: &str) -> StoreResult<()> {
            Err(StoreError::io(
                key,
                std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            ))
        }

        fn remove_item(&self, _key: &str) -> StoreResult<()> {
            Ok(())
        }
    }

    #[test]
    fn test_initialize_without_stored_cart() {
        let mut store = CartStore::new(MemoryStorage::new());
        assert!(!store.is_initialized());

        store.initialize_cart().unwrap();

        assert!(store.is_initialized());
        assert!(store.items().is_empty());
        assert_eq!(store.total_items(), 0);
        assert!(store.total_price().is_zero());
    }

    #[test]
    fn test_every_mutation_is_persisted() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.initialize_cart().unwrap();

        store.add_to_cart(&product(1, 10.0)).unwrap();
        let mut reloaded = CartStore::new(storage.clone());
        reloaded.initialize_cart().unwrap();
        assert_eq!(reloaded.total_items(), 1);

        store.update_quantity(1, 4).unwrap();
        reloaded.initialize_cart().unwrap();
        assert_eq!(reloaded.total_items(), 4);

        store.remove_from_cart(1).unwrap();
        reloaded.initialize_cart().unwrap();
        assert!(reloaded.items().is_empty());
    }

    #[test]
    fn test_roundtrip_reproduces_items_and_totals() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.initialize_cart().unwrap();

        store.add_to_cart(&product(1, 10.0)).unwrap();
        store.add_to_cart(&product(1, 10.0)).unwrap();
        store.add_to_cart(&product(2, 5.0)).unwrap();

        assert_eq!(store.total_items(), 3);
        assert_eq!(store.total_price(), Money::from_cents(2500));

        let mut reloaded = CartStore::new(storage);
        reloaded.initialize_cart().unwrap();

        assert_eq!(reloaded.state(), store.state());
        assert_eq!(reloaded.total_items(), 3);
        assert_eq!(reloaded.total_price(), Money::from_cents(2500));
    }

    #[test]
    fn test_clear_then_initialize_is_empty() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.initialize_cart().unwrap();
        store.add_to_cart(&product(1, 10.0)).unwrap();

        store.clear_cart().unwrap();
        store.initialize_cart().unwrap();

        assert!(store.items().is_empty());
        assert_eq!(store.total_items(), 0);
        assert!(store.total_price().is_zero());
    }

    #[test]
    fn test_initialize_is_idempotent() {
        let storage = MemoryStorage::new();
        let mut store = CartStore::new(storage.clone());
        store.add_to_cart(&product(3, 2.5)).unwrap();
        store.add_to_cart(&product(3, 2.5)).unwrap();

        store.initialize_cart().unwrap();
        let first = store.state().clone();
        store.initialize_cart().unwrap();

        assert_eq!(store.state(), &first);
        assert_eq!(store.total_price(), Money::from_cents(500));
    }

    #[test]
    fn test_corrupt_record_starts_empty_and_is_overwritten() {
        let storage = MemoryStorage::new();
        storage.set_item(CART_STORAGE_KEY, "{\"items\": 12").unwrap();

        let mut store = CartStore::new(storage.clone());
        store.initialize_cart().unwrap();
        assert!(store.items().is_empty());

        store.add_to_cart(&product(1, 1.0)).unwrap();
        let raw = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        assert!(serde_json::from_str::<serde_json::Value>(&raw).is_ok());
    }

    #[test]
    fn test_failed_write_is_reported_after_applying() {
        let mut store = CartStore::new(ReadOnlyStorage);
        store.initialize_cart().unwrap();

        let result = store.add_to_cart(&product(1, 10.0));

        assert!(matches!(result, Err(StoreError::Io { .. })));
        assert_eq!(store.total_items(), 1);
    }

    #[test]
    fn test_file_backed_store_survives_restart() {
        let dir = tempfile::tempdir().unwrap();

        {
            let mut store = CartStore::new(FileStorage::new(dir.path()));
            store.initialize_cart().unwrap();
            store.add_to_cart(&product(9, 19.99)).unwrap();
            store.update_quantity(9, 3).unwrap();
        }

        let mut store = CartStore::new(FileStorage::new(dir.path()));
        store.initialize_cart().unwrap();

        assert_eq!(store.items().len(), 1);
        assert_eq!(store.items()[0].quantity, 3);
        assert_eq!(store.total_price(), Money::from_cents(5997));
    }
}
