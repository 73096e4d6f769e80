//! # Cart Commands
//!
//! Commands for cart manipulation.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐                                          │
//! │  │  Empty   │────►│ In Cart  │◄───┐                                     │
//! │  │  Cart    │     │          │    │ add_to_cart                         │
//! │  └──────────┘     └──────────┘────┘ update_cart_item                    │
//! │       ▲                │            remove_from_cart                    │
//! │       │                │                                                │
//! │       └── clear_cart ──┘    (or the last line removed)                  │
//! │                                                                         │
//! │  Every transition is written to storage before the command returns.    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use tracing::debug;

use storefront_catalog::CatalogClient;
use storefront_core::validation::{validate_id, validate_quantity};
use storefront_core::{CartItem, CartState, Money, ProductId};
use storefront_store::StoreError;

use crate::error::ApiError;
use crate::state::CartHandle;

/// Cart totals shown under the item list.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Number of distinct products.
    pub line_count: usize,
    /// Sum of all quantities.
    pub total_items: i64,
    /// Sum of price × quantity, serialized in dollars like `price`.
    #[serde(serialize_with = "storefront_core::money::serialize_as_decimal")]
    pub total_price: Money,
}

impl From<&CartState> for CartTotals {
    fn from(cart: &CartState) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            total_items: cart.total_items(),
            total_price: cart.total_price(),
        }
    }
}

/// Cart response including items and totals.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub items: Vec<CartItem>,
    pub totals: CartTotals,
}

impl From<&CartState> for CartResponse {
    fn from(cart: &CartState) -> Self {
        CartResponse {
            items: cart.items().to_vec(),
            totals: CartTotals::from(cart),
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartHandle) -> Result<CartResponse, ApiError> {
    debug!("get_cart command");
    cart.with_cart(|store| CartResponse::from(store.state()))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases by one
/// - If product not in cart: added as a new line at the end
/// - The product is fetched first; the cart keeps the snapshot from the
///   first add (a later price change does not reach existing lines)
///
/// ## Flow
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  storefront cart add 42                                                │
/// │                    │                                                    │
/// │                    ▼                                                    │
/// │  ┌────────────────────────────────────────────────────────────────┐    │
/// │  │  1. GET /products/42 (no lock held)                            │    │
/// │  │  2. Lock the store                                             │    │
/// │  │  3. CartState::add_to_cart + save                              │    │
/// │  │  4. Return updated cart                                        │    │
/// │  └────────────────────────────────────────────────────────────────┘    │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub async fn add_to_cart(
    catalog: &CatalogClient,
    cart: &CartHandle,
    product_id: ProductId,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, "add_to_cart command");
    validate_id("product id", product_id)?;

    let product = catalog.get_product(product_id).await?;

    cart.with_cart_mut(|store| {
        store.add_to_cart(&product)?;
        Ok::<CartResponse, StoreError>(CartResponse::from(store.state()))
    })?
    .map_err(ApiError::from)
}

/// Updates the quantity of an item in the cart.
///
/// ## Behavior
/// - Quantity <= 0: removes the item
/// - Quantity above 999: rejected before the cart is touched
/// - Product not in cart: no change
pub fn update_cart_item(
    cart: &CartHandle,
    product_id: ProductId,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id, quantity, "update_cart_item command");
    validate_id("product id", product_id)?;
    validate_quantity(quantity)?;

    cart.with_cart_mut(|store| {
        store.update_quantity(product_id, quantity)?;
        Ok::<CartResponse, StoreError>(CartResponse::from(store.state()))
    })?
    .map_err(ApiError::from)
}

/// Removes an item from the cart. Removing an absent product is a no-op.
pub fn remove_from_cart(cart: &CartHandle, product_id: ProductId) -> Result<CartResponse, ApiError> {
    debug!(product_id, "remove_from_cart command");
    validate_id("product id", product_id)?;

    cart.with_cart_mut(|store| {
        store.remove_from_cart(product_id)?;
        Ok::<CartResponse, StoreError>(CartResponse::from(store.state()))
    })?
    .map_err(ApiError::from)
}

/// Clears all items from the cart.
pub fn clear_cart(cart: &CartHandle) -> Result<CartResponse, ApiError> {
    debug!("clear_cart command");

    cart.with_cart_mut(|store| {
        store.clear_cart()?;
        Ok::<CartResponse, StoreError>(CartResponse::from(store.state()))
    })?
    .map_err(ApiError::from)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::Ordering;

    use storefront_store::{FileStorage, KeyValueStorage, MemoryStorage};

    use crate::error::ErrorCode;
    use crate::test_support::spawn_catalog;

    fn fresh_cart() -> (CartHandle, MemoryStorage) {
        let storage = MemoryStorage::new();
        let handle = CartHandle::with_storage(storage.clone());
        handle.initialize().unwrap();
        (handle, storage)
    }

    #[tokio::test]
    async fn test_add_fetches_and_merges() {
        let (catalog, mock) = spawn_catalog().await;
        let (cart, _) = fresh_cart();

        add_to_cart(&catalog, &cart, 1).await.unwrap();
        add_to_cart(&catalog, &cart, 2).await.unwrap();
        let response = add_to_cart(&catalog, &cart, 1).await.unwrap();

        assert_eq!(response.items.len(), 2);
        assert_eq!(response.items[0].id(), 1);
        assert_eq!(response.items[0].quantity, 2);
        assert_eq!(response.totals.total_items, 3);
        assert_eq!(response.totals.total_price, Money::from_cents(2500));

        // Repeat fetches of product 1 come from the client cache.
        assert_eq!(mock.product_hits.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_add_unknown_product_leaves_cart_alone() {
        let (catalog, _) = spawn_catalog().await;
        let (cart, storage) = fresh_cart();

        let err = add_to_cart(&catalog, &cart, 999).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);

        assert!(get_cart(&cart).unwrap().items.is_empty());
        assert_eq!(storage.get_item("cart-storage").unwrap(), None);
    }

    #[tokio::test]
    async fn test_add_rejects_non_positive_id() {
        let (catalog, mock) = spawn_catalog().await;
        let (cart, _) = fresh_cart();

        let err = add_to_cart(&catalog, &cart, 0).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(mock.product_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_and_remove() {
        let (catalog, _) = spawn_catalog().await;
        let (cart, _) = fresh_cart();

        add_to_cart(&catalog, &cart, 1).await.unwrap();
        add_to_cart(&catalog, &cart, 2).await.unwrap();

        let response = update_cart_item(&cart, 1, 4).unwrap();
        assert_eq!(response.totals.total_items, 5);

        // Unknown id: no-op.
        let response = update_cart_item(&cart, 77, 3).unwrap();
        assert_eq!(response.totals.total_items, 5);

        let response = update_cart_item(&cart, 2, -5).unwrap();
        assert_eq!(response.items.len(), 1);

        let response = remove_from_cart(&cart, 1).unwrap();
        assert!(response.items.is_empty());
        assert_eq!(response.totals.total_price, Money::zero());
    }

    #[tokio::test]
    async fn test_update_rejects_huge_quantity() {
        let (catalog, _) = spawn_catalog().await;
        let (cart, storage) = fresh_cart();

        add_to_cart(&catalog, &cart, 1).await.unwrap();
        let stored = storage.get_item("cart-storage").unwrap();

        let err = update_cart_item(&cart, 1, i64::MAX / 10).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(storage.get_item("cart-storage").unwrap(), stored);

        let response = update_cart_item(&cart, 1, 999).unwrap();
        assert_eq!(response.totals.total_items, 999);
        assert_eq!(response.totals.total_price, Money::from_cents(999_000));
    }

    #[tokio::test]
    async fn test_cart_survives_restart() {
        let (catalog, _) = spawn_catalog().await;
        let dir = tempfile::tempdir().unwrap();

        let cart = CartHandle::with_storage(FileStorage::new(dir.path()));
        cart.initialize().unwrap();
        add_to_cart(&catalog, &cart, 3).await.unwrap();
        add_to_cart(&catalog, &cart, 3).await.unwrap();

        let restarted = CartHandle::with_storage(FileStorage::new(dir.path()));
        restarted.initialize().unwrap();
        let response = get_cart(&restarted).unwrap();

        assert_eq!(response.items.len(), 1);
        assert_eq!(response.totals.total_items, 2);
        assert_eq!(response.totals.total_price, Money::from_cents(4998));
    }

    #[tokio::test]
    async fn test_clear_persists() {
        let (catalog, _) = spawn_catalog().await;
        let (cart, storage) = fresh_cart();

        add_to_cart(&catalog, &cart, 1).await.unwrap();
        clear_cart(&cart).unwrap();

        let restarted = CartHandle::with_storage(storage);
        restarted.initialize().unwrap();
        assert_eq!(get_cart(&restarted).unwrap().totals.total_items, 0);
    }
}
