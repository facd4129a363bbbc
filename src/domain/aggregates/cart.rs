//! Cart Aggregate
//!
//! The cart lives with the shopper's session, not on the server. Every mutation
//! writes the full line list back through the injected [`CartStorage`] port;
//! storage failures are logged and never surface to the caller.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::aggregates::product::ProductSnapshot;
use crate::domain::value_objects::{Money, STORE_CURRENCY};
use crate::ports::CartStorage;

/// Namespace the cart is saved under.
pub const CART_STORAGE_KEY: &str = "vintageStyle-cart";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub id: Uuid,
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub selected_size: String,
    pub selected_color: String,
}

impl CartItem {
    pub fn line_total(&self) -> Money { self.product.unit_price().multiply(self.quantity) }

    fn is_variant(&self, product_id: i32, size: &str, color: &str) -> bool {
        self.product.id == product_id && self.selected_size == size && self.selected_color == color
    }
}

pub struct CartStore<S: CartStorage> {
    storage: S,
    items: Vec<CartItem>,
}

impl<S: CartStorage> CartStore<S> {
    /// Rehydrate the cart from storage, starting empty if nothing usable was saved.
    pub fn open(storage: S) -> Self {
        let items = match storage.load() {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<CartItem>>(&raw) {
                Ok(mut items) => {
                    let stored = items.len();
                    items.retain(|i| i.quantity > 0);
                    if items.len() < stored {
                        tracing::warn!(dropped = stored - items.len(), "Dropped empty lines from stored cart");
                    }
                    items
                }
                Err(e) => {
                    tracing::warn!(error = %e, "Error loading cart from storage, starting empty");
                    vec![]
                }
            },
            Ok(None) => vec![],
            Err(e) => {
                tracing::warn!(error = %e, "Cart storage unreadable, starting empty");
                vec![]
            }
        };
        Self { storage, items }
    }

    pub fn items(&self) -> &[CartItem] { &self.items }
    pub fn is_empty(&self) -> bool { self.items.is_empty() }
    pub fn storage(&self) -> &S { &self.storage }

    /// Add one unit of `product` in the given size and color, merging with an
    /// existing line for the same variant. Returns the line id.
    pub fn add(&mut self, product: ProductSnapshot, size: &str, color: &str) -> Uuid {
        let id = if let Some(existing) = self.items.iter_mut().find(|i| i.is_variant(product.id, size, color)) {
            existing.quantity = existing.quantity.saturating_add(1);
            existing.id
        } else {
            let id = Uuid::now_v7();
            self.items.push(CartItem {
                id, product, quantity: 1,
                selected_size: size.to_string(), selected_color: color.to_string(),
            });
            id
        };
        self.persist();
        id
    }

    pub fn remove(&mut self, item_id: Uuid) {
        self.items.retain(|i| i.id != item_id);
        self.persist();
    }

    pub fn set_quantity(&mut self, item_id: Uuid, quantity: i64) {
        if quantity <= 0 { return self.remove(item_id); }
        let quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|i| i.id == item_id) {
            item.quantity = quantity;
        }
        self.persist();
    }

    pub fn total_items(&self) -> u64 { self.items.iter().map(|i| u64::from(i.quantity)).sum() }

    pub fn total_price(&self) -> Money {
        self.items.iter().fold(Money::zero(STORE_CURRENCY), |acc, i| acc.add(&i.line_total()).unwrap_or(acc))
    }

    pub fn clear(&mut self) { self.items.clear(); self.persist(); }

    fn persist(&self) {
        let payload = match serde_json::to_string(&self.items) {
            Ok(p) => p,
            Err(e) => { tracing::warn!(error = %e, "Failed to serialize cart"); return; }
        };
        if let Err(e) = self.storage.save(&payload) {
            tracing::warn!(error = %e, items = self.items.len(), "Failed to persist cart");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::MemoryCartStorage;
    use rust_decimal::Decimal;

    fn product(id: i32, price: i64) -> ProductSnapshot {
        ProductSnapshot { id, name: format!("Product {id}"), price: Decimal::new(price, 0), category: None, description: None }
    }

    #[test]
    fn test_same_variant_merges() {
        let mut cart = CartStore::open(MemoryCartStorage::default());
        let a = cart.add(product(1, 100), "M", "Red");
        let b = cart.add(product(1, 100), "M", "Red");
        assert_eq!(a, b);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.items()[0].quantity, 2);
    }

    #[test]
    fn test_different_color_is_new_line() {
        let mut cart = CartStore::open(MemoryCartStorage::default());
        cart.add(product(1, 100), "M", "Red");
        cart.add(product(1, 100), "M", "Blue");
        assert_eq!(cart.items().len(), 2);
        assert_ne!(cart.items()[0].id, cart.items()[1].id);
    }

    #[test]
    fn test_totals() {
        let mut cart = CartStore::open(MemoryCartStorage::default());
        let a = cart.add(product(1, 100), "M", "Red");
        cart.add(product(2, 50), "L", "Black");
        cart.set_quantity(a, 2);
        assert_eq!(cart.total_items(), 3);
        assert_eq!(cart.total_price().amount(), Decimal::new(250, 0));
    }

    #[test]
    fn test_set_quantity_zero_removes() {
        let mut cart = CartStore::open(MemoryCartStorage::default());
        let a = cart.add(product(1, 100), "M", "Red");
        cart.add(product(2, 50), "L", "Black");
        cart.set_quantity(a, 0);
        assert_eq!(cart.items().len(), 1);
        assert_eq!(cart.total_items(), 1);
        assert_eq!(cart.total_price().amount(), Decimal::new(50, 0));
        cart.set_quantity(cart.items()[0].id, -3);
        assert!(cart.is_empty());
    }

    #[test]
    fn test_remove_unknown_is_noop() {
        let mut cart = CartStore::open(MemoryCartStorage::default());
        cart.add(product(1, 100), "M", "Red");
        cart.remove(Uuid::now_v7());
        assert_eq!(cart.items().len(), 1);
    }

    #[test]
    fn test_mutations_persist_and_rehydrate() {
        let storage = MemoryCartStorage::default();
        let mut cart = CartStore::open(storage.clone());
        cart.add(product(1, 100), "M", "Red");
        cart.add(product(1, 100), "M", "Red");
        let reopened = CartStore::open(storage.clone());
        assert_eq!(reopened.items(), cart.items());
        cart.clear();
        assert_eq!(cart.total_items(), 0);
        assert_eq!(storage.contents().as_deref(), Some("[]"));
    }

    #[test]
    fn test_zero_quantity_lines_dropped_on_open() {
        let storage = MemoryCartStorage::default();
        let mut cart = CartStore::open(storage.clone());
        cart.add(product(1, 100), "M", "Red");
        cart.add(product(2, 50), "L", "Black");
        let raw = storage.contents().unwrap().replacen("\"quantity\":1", "\"quantity\":0", 1);

        let reopened = CartStore::open(MemoryCartStorage::with_contents(&raw));
        assert_eq!(reopened.items().len(), 1);
        assert_eq!(reopened.items()[0].product.id, 2);
        assert_eq!(reopened.total_items(), 1);
    }

    #[test]
    fn test_corrupt_storage_starts_empty() {
        let storage = MemoryCartStorage::with_contents("{not json");
        let cart = CartStore::open(storage);
        assert!(cart.is_empty());
    }
}
