//! # Cart
//!
//! The shopping cart and its state transitions.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart State Transitions                               │
//! │                                                                         │
//! │  Operation                 Items change                 Totals          │
//! │  ─────────                 ────────────                 ──────          │
//! │                                                                         │
//! │  add_to_cart(p) ─────────► qty += 1, or push(p, qty 1)  recomputed      │
//! │                                                                         │
//! │  update_quantity(id, n) ─► n <= 0: remove               recomputed      │
//! │                            else items[id].qty = n                       │
//! │                                                                         │
//! │  remove_from_cart(id) ───► retain(item.id != id)        recomputed      │
//! │                                                                         │
//! │  clear_cart() ───────────► items.clear()                zeroed          │
//! │                                                                         │
//! │  from_items(stored) ─────► rehydrate                    recomputed      │
//! │                                                                         │
//! │  NOTE: These are pure. Persisting the result is the caller's job        │
//! │        (see storefront-store's CartStore).                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//! - Items are unique by product `id` (adding the same product increases quantity)
//! - Every item's quantity is between 1 and `MAX_ITEM_QUANTITY` (999)
//! - Items keep insertion order
//! - `total_items == Σ quantity` and `total_price == Σ price × quantity`
//!   after every operation

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::{serialize_as_decimal, Money};
use crate::types::{Product, ProductId};
use crate::MAX_ITEM_QUANTITY;

// =============================================================================
// Cart Item
// =============================================================================

/// An item in the shopping cart.
///
/// ## Snapshot Semantics
/// The product is copied into the cart the first time it is added. Adding
/// it again only bumps `quantity`; price, title and the rest of the snapshot
/// stay as they were at first add, even if the catalog has changed since.
///
/// On the wire the product fields and `quantity` sit side by side in one
/// JSON object, which is also the layout written to local storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct CartItem {
    #[serde(flatten)]
    pub product: Product,

    /// Quantity in cart (1..=MAX_ITEM_QUANTITY).
    pub quantity: i64,
}

impl CartItem {
    /// Creates a new cart line for a product with quantity 1.
    pub fn from_product(product: &Product) -> Self {
        CartItem {
            product: product.clone(),
            quantity: 1,
        }
    }

    /// The product id this line is keyed by.
    #[inline]
    pub fn id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price frozen at first add.
    #[inline]
    pub fn unit_price(&self) -> Money {
        self.product.unit_price()
    }

    /// Calculates the line total (unit price × quantity).
    pub fn line_total(&self) -> Money {
        self.unit_price().multiply_quantity(self.quantity)
    }
}

// =============================================================================
// Cart State
// =============================================================================

/// The shopping cart: items plus totals derived from them.
///
/// Fields are private so the totals can never drift from `items`; every
/// mutation goes through a method that ends in `recompute_totals`.
///
/// Serializes as `{ items, totalItems, totalPrice }` with `totalPrice` in
/// major units, like each item's `price`. It deliberately does not implement `Deserialize`: a cart is only
/// ever rebuilt from a list of items via [`CartState::from_items`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartState {
    items: Vec<CartItem>,
    total_items: i64,
    #[serde(serialize_with = "serialize_as_decimal")]
    #[ts(type = "number")]
    total_price: Money,
}

impl CartState {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a cart from stored items and recomputes its totals.
    ///
    /// Stored data is normalised so the invariants hold even if the record
    /// was edited by hand: lines with a quantity below 1 are dropped,
    /// repeated ids are folded into the first occurrence and quantities are
    /// capped at `MAX_ITEM_QUANTITY`.
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut merged: Vec<CartItem> = Vec::with_capacity(items.len());

        for mut item in items.into_iter().filter(|i| i.quantity >= 1) {
            match merged.iter_mut().find(|m| m.id() == item.id()) {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(item.quantity)
                        .min(MAX_ITEM_QUANTITY);
                }
                None => {
                    item.quantity = item.quantity.min(MAX_ITEM_QUANTITY);
                    merged.push(item);
                }
            }
        }

        let mut cart = CartState {
            items: merged,
            ..Default::default()
        };
        cart.recompute_totals();
        cart
    }

    /// Adds a product to the cart or increases its quantity by one.
    ///
    /// ## Behavior
    /// - Product already in cart: quantity + 1 (up to `MAX_ITEM_QUANTITY`),
    ///   snapshot untouched
    /// - Product not in cart: appended with quantity 1
    ///
    /// Always succeeds.
    pub fn add_to_cart(&mut self, product: &Product) {
        match self.items.iter_mut().find(|i| i.id() == product.id) {
            Some(item) => item.quantity = (item.quantity + 1).min(MAX_ITEM_QUANTITY),
            None => self.items.push(CartItem::from_product(product)),
        }
        self.recompute_totals();
    }

    /// Removes the line for `product_id`.
    ///
    /// Returns `true` if a line was removed, `false` if the product was not
    /// in the cart (no-op).
    pub fn remove_from_cart(&mut self, product_id: ProductId) -> bool {
        let initial_len = self.items.len();
        self.items.retain(|i| i.id() != product_id);
        self.recompute_totals();
        self.items.len() != initial_len
    }

    /// Sets the quantity of a line.
    ///
    /// ## Behavior
    /// - `quantity <= 0`: same as [`CartState::remove_from_cart`]
    /// - `quantity > MAX_ITEM_QUANTITY`: capped
    /// - Product not in cart: no-op
    ///
    /// Returns `true` if the cart changed.
    pub fn update_quantity(&mut self, product_id: ProductId, quantity: i64) -> bool {
        if quantity <= 0 {
            return self.remove_from_cart(product_id);
        }

        let quantity = quantity.min(MAX_ITEM_QUANTITY);
        let changed = match self.items.iter_mut().find(|i| i.id() == product_id) {
            Some(item) if item.quantity != quantity => {
                item.quantity = quantity;
                true
            }
            _ => false,
        };
        self.recompute_totals();
        changed
    }

    /// Clears all items and zeroes the totals.
    pub fn clear_cart(&mut self) {
        self.items.clear();
        self.recompute_totals();
    }

    /// Items in insertion order.
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Looks up the line for a product.
    pub fn get(&self, product_id: ProductId) -> Option<&CartItem> {
        self.items.iter().find(|i| i.id() == product_id)
    }

    /// Sum of all quantities.
    pub fn total_items(&self) -> i64 {
        self.total_items
    }

    /// Sum of price × quantity over all lines.
    pub fn total_price(&self) -> Money {
        self.total_price
    }

    /// Number of distinct products in the cart.
    pub fn line_count(&self) -> usize {
        self.items.len()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    fn recompute_totals(&mut self) {
        self.total_items = self.items.iter().map(|i| i.quantity).sum();
        self.total_price = self.items.iter().map(CartItem::line_total).sum();
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
