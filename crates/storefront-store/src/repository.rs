//! # Cart Repository
//!
//! Reads and writes the persisted cart record.
//!
//! ## Stored Layout
//! ```text
//! key:   "cart-storage"
//! value: { "items": [ { ...product fields, "quantity": 2 }, ... ] }
//! ```
//!
//! Only the items are stored. `totalItems` and `totalPrice` are derived, so
//! they are recomputed from the items on every load instead of being trusted
//! from disk.

use serde::{Deserialize, Serialize};
use tracing::debug;

use storefront_core::{CartItem, CartState};

use crate::error::{StoreError, StoreResult};
use crate::storage::KeyValueStorage;

/// Storage key of the persisted cart.
pub const CART_STORAGE_KEY: &str = "cart-storage";

#[derive(Serialize)]
struct PersistedCartRef<'a> {
    items: &'a [CartItem],
}

#[derive(Deserialize)]
struct PersistedCart {
    items: Vec<CartItem>,
}

/// Repository for the persisted cart.
#[derive(Debug, Clone)]
pub struct CartRepository<S> {
    storage: S,
}

impl<S: KeyValueStorage> CartRepository<S> {
    /// Creates a new CartRepository over `storage`.
    pub fn new(storage: S) -> Self {
        CartRepository { storage }
    }

    /// Writes the cart's items, replacing whatever was stored.
    pub fn save(&self, cart: &CartState) -> StoreResult<()> {
        let record = PersistedCartRef {
            items: cart.items(),
        };
        let json = serde_json::to_string(&record).map_err(|source| StoreError::Serialization {
            key: CART_STORAGE_KEY.to_string(),
            source,
        })?;

        self.storage.set_item(CART_STORAGE_KEY, &json)?;

        debug!(
            lines = cart.line_count(),
            total_items = cart.total_items(),
            "Persisted cart"
        );
        Ok(())
    }

    /// Reads the stored items.
    ///
    /// ## Returns
    /// * `Ok(None)` - nothing has been stored yet
    /// * `Ok(Some(items))` - the stored items, as written
    /// * `Err(StoreError::Corrupt)` - a record exists but is not a cart
    pub fn load(&self) -> StoreResult<Option<Vec<CartItem>>> {
        let Some(json) = self.storage.get_item(CART_STORAGE_KEY)? else {
            return Ok(None);
        };

        let record: PersistedCart =
            serde_json::from_str(&json).map_err(|e| StoreError::corrupt(CART_STORAGE_KEY, e))?;

        debug!(lines = record.items.len(), "Loaded stored cart");
        Ok(Some(record.items))
    }

    /// Deletes the stored record entirely.
    pub fn delete(&self) -> StoreResult<()> {
        self.storage.remove_item(CART_STORAGE_KEY)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;
    use storefront_core::{Category, Product};

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
            images: vec![format!("https://placehold.co/{id}")],
            creation_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_load_without_record() {
        let repo = CartRepository::new(MemoryStorage::new());
        assert!(repo.load().unwrap().is_none());
    }

    #[test]
    fn test_saved_record_has_only_items_key() {
        let storage = MemoryStorage::new();
        let repo = CartRepository::new(storage.clone());

        let mut cart = CartState::new();
        cart.add_to_cart(&product(1, 10.0));
        repo.save(&cart).unwrap();

        let raw = storage.get_item(CART_STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let object = value.as_object().unwrap();

        assert_eq!(object.len(), 1);
        assert!(object.contains_key("items"));

        let line = &value["items"][0];
        assert_eq!(line["id"], 1);
        assert_eq!(line["quantity"], 1);
        assert_eq!(line["price"], 10.0);
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let repo = CartRepository::new(MemoryStorage::new());

        let mut cart = CartState::new();
        cart.add_to_cart(&product(1, 10.0));
        cart.add_to_cart(&product(1, 10.0));
        cart.add_to_cart(&product(2, 5.0));
        repo.save(&cart).unwrap();

        let items = repo.load().unwrap().unwrap();
        assert_eq!(items, cart.items());
    }

    #[test]
    fn test_load_accepts_hand_written_record() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                CART_STORAGE_KEY,
                r#"{"items":[{"id":7,"title":"Mug","price":4.5,"category":{"id":2,"name":"Kitchen"},"quantity":3}]}"#,
            )
            .unwrap();

        let items = CartRepository::new(storage).load().unwrap().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].id(), 7);
        assert_eq!(items[0].quantity, 3);
    }

    #[test]
    fn test_load_rejects_corrupt_record() {
        let storage = MemoryStorage::new();
        let repo = CartRepository::new(storage.clone());

        storage.set_item(CART_STORAGE_KEY, "not json").unwrap();
        assert!(matches!(repo.load(), Err(StoreError::Corrupt { .. })));

        storage.set_item(CART_STORAGE_KEY, r#"{"lines":[]}"#).unwrap();
        assert!(matches!(repo.load(), Err(StoreError::Corrupt { .. })));
    }

    #[test]
    fn test_delete() {
        let repo = CartRepository::new(MemoryStorage::new());
        repo.save(&CartState::new()).unwrap();
        repo.delete().unwrap();
        assert!(repo.load().unwrap().is_none());
    }
}
