//! Shopping cart state.
//!
//! [`Cart`] is the in-memory collection of line items. [`CartStore`] wraps it
//! with persistence: the cart is restored from the key-value store at
//! startup and written back after every mutation. Persisting is best-effort;
//! a failed write is logged and the in-memory cart stays authoritative.

use std::fmt;

use istore_core::{Color, ContactDetails, Price, ProductId, StorageTier};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument, warn};

use crate::catalog::Product;
use crate::checkout::{self, CheckoutError, OrderConfirmation};
use crate::storage::{SharedStore, keys};

/// Identity of a configured product in the cart.
///
/// Two additions with the same product, storage tier and color merge into
/// one line item. The key is structured, so ids or colors containing any
/// separator character can never collide.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineKey {
    pub product_id: ProductId,
    pub storage: StorageTier,
    pub color: Color,
}

impl LineKey {
    #[must_use]
    pub const fn new(product_id: ProductId, storage: StorageTier, color: Color) -> Self {
        Self {
            product_id,
            storage,
            color,
        }
    }
}

impl fmt::Display for LineKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}, {})", self.product_id, self.storage, self.color)
    }
}

/// The configuration chosen on a product card when adding to the cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub storage: StorageTier,
    pub color: Color,
    /// Unit price shown at the moment of adding.
    pub price: Price,
}

/// One configured product in the cart.
///
/// Name and price are snapshots taken on first addition; later catalog
/// changes are not propagated to existing items.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub key: LineKey,
    pub product_id: ProductId,
    pub name: String,
    pub storage: StorageTier,
    pub color: Color,
    /// Unit price frozen at first addition.
    pub price: Price,
    /// Always at least 1.
    pub qty: u32,
}

impl LineItem {
    /// `price * qty`.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.price.times(self.qty)
    }
}

/// Clamp a requested quantity to `1..=u32::MAX`.
#[must_use]
pub fn clamp_qty(requested: i64) -> u32 {
    u32::try_from(requested.max(1)).unwrap_or(u32::MAX)
}

/// Line items in insertion order, with unique keys and `qty >= 1`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<LineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// Rebuild a cart from untrusted items: each key is rederived from the
    /// item's product, storage and color, quantities below 1 become 1 and
    /// items sharing a key are merged into the first occurrence.
    #[must_use]
    pub fn from_items(items: Vec<LineItem>) -> Self {
        let mut cart = Self::new();
        for mut item in items {
            item.key = LineKey::new(item.product_id.clone(), item.storage, item.color);
            item.qty = item.qty.max(1);
            if let Some(existing) = cart.items.iter_mut().find(|e| e.key == item.key) {
                existing.qty = existing.qty.saturating_add(item.qty);
            } else {
                cart.items.push(item);
            }
        }
        cart
    }

    /// Add one unit of `product` configured as `selection`, returning the
    /// line's new quantity.
    ///
    /// Merging into an existing line keeps its frozen price.
    pub fn add(&mut self, product: &Product, selection: Selection) -> u32 {
        let key = LineKey::new(product.id.clone(), selection.storage, selection.color);
        if let Some(item) = self.items.iter_mut().find(|item| item.key == key) {
            item.qty = item.qty.saturating_add(1);
            return item.qty;
        }

        self.items.push(LineItem {
            key,
            product_id: product.id.clone(),
            name: product.name.clone(),
            storage: selection.storage,
            color: selection.color,
            price: selection.price,
            qty: 1,
        });
        1
    }

    /// Set the quantity of an existing item, clamped to at least 1.
    ///
    /// Returns `false` if no item has `key`.
    pub fn update_qty(&mut self, key: &LineKey, requested: i64) -> bool {
        let qty = clamp_qty(requested);
        match self.items.iter_mut().find(|item| item.key == *key) {
            Some(item) => {
                item.qty = qty;
                true
            }
            None => false,
        }
    }

    /// Remove the item with `key`. Returns `false` if there was none.
    pub fn remove(&mut self, key: &LineKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| item.key != *key);
        self.items.len() != before
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Sum of `price * qty` over all items.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Sum of quantities, as shown on the cart badge.
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.items.iter().map(|item| u64::from(item.qty)).sum()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        &self.items
    }

    #[must_use]
    pub fn get(&self, key: &LineKey) -> Option<&LineItem> {
        self.items.iter().find(|item| item.key == *key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Number of distinct line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// A cart bound to durable storage.
pub struct CartStore {
    cart: Cart,
    store: SharedStore,
}

impl fmt::Debug for CartStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CartStore")
            .field("cart", &self.cart)
            .finish_non_exhaustive()
    }
}

impl CartStore {
    /// Load the persisted cart, or start empty if it is absent or unreadable.
    #[instrument(skip(store))]
    pub fn restore(store: SharedStore) -> Self {
        let cart = match store.get(keys::CART) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<LineItem>>(&raw) {
                Ok(items) => Cart::from_items(items),
                Err(e) => {
                    warn!(error = %e, "Discarding malformed cart snapshot");
                    Cart::new()
                }
            },
            Ok(None) => Cart::new(),
            Err(e) => {
                warn!(error = %e, "Failed to read cart snapshot");
                Cart::new()
            }
        };

        debug!(lines = cart.len(), "Cart restored");
        Self { cart, store }
    }

    /// Add one unit of `product` as configured by `selection`, then persist.
    /// Returns the line's new quantity.
    pub fn add(&mut self, product: &Product, selection: Selection) -> u32 {
        let qty = self.cart.add(product, selection);
        debug!(
            product = %product.id,
            storage = %selection.storage,
            color = %selection.color,
            qty,
            "Added to cart"
        );
        self.persist();
        qty
    }

    /// Set an item's quantity (clamped to at least 1), then persist.
    /// Unknown keys are ignored.
    pub fn update_qty(&mut self, key: &LineKey, requested: i64) {
        if self.cart.update_qty(key, requested) {
            debug!(%key, qty = clamp_qty(requested), "Updated cart quantity");
            self.persist();
        }
    }

    /// Remove an item, then persist. Unknown keys are ignored.
    pub fn remove(&mut self, key: &LineKey) {
        if self.cart.remove(key) {
            debug!(%key, "Removed from cart");
            self.persist();
        }
    }

    /// Empty the cart, then persist.
    pub fn clear(&mut self) {
        self.cart.clear();
        debug!("Cart cleared");
        self.persist();
    }

    /// Confirm the order and empty the cart.
    ///
    /// # Errors
    ///
    /// Returns `CheckoutError::EmptyCart` if there is nothing to order.
    pub fn checkout(&mut self, contact: &ContactDetails) -> Result<OrderConfirmation, CheckoutError> {
        let confirmation = checkout::confirm(&self.cart, contact)?;
        self.clear();
        Ok(confirmation)
    }

    #[must_use]
    pub fn total(&self) -> Price {
        self.cart.total()
    }

    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.cart.item_count()
    }

    #[must_use]
    pub fn items(&self) -> &[LineItem] {
        self.cart.items()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    fn persist(&self) {
        let snapshot = match serde_json::to_string(&self.cart) {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!(error = %e, "Failed to serialize cart");
                return;
            }
        };
        if let Err(e) = self.store.set(keys::CART, &snapshot) {
            warn!(error = %e, "Failed to persist cart");
        }
    }
}
