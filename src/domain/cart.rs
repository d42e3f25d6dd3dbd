//! Cart value and its state transitions.
//!
//! Every transition takes the cart by value and returns the next cart, so
//! the storage and rendering layers never mutate line items directly.

use super::models::CartItem;
use serde::{Deserialize, Serialize};

/// Ordered list of line items, at most one per product id.
///
/// Insertion order is display order.
///
/// # Examples
///
/// ```
/// use launchshop::domain::Cart;
///
/// let cart = Cart::default()
///     .with_added("shirt", "Shirt", 250.0)
///     .with_added("shirt", "Shirt", 250.0);
/// assert_eq!(cart.items().len(), 1);
/// assert_eq!(cart.items()[0].qty, 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Vec<CartItem>", into = "Vec<CartItem>")]
pub struct Cart {
    items: Vec<CartItem>,
}

impl From<Vec<CartItem>> for Cart {
    fn from(items: Vec<CartItem>) -> Self {
        Cart::from_items(items)
    }
}

impl From<Cart> for Vec<CartItem> {
    fn from(cart: Cart) -> Self {
        cart.items
    }
}

impl Cart {
    pub fn from_items(items: Vec<CartItem>) -> Self {
        let mut cart = Cart::default();
        for item in items {
            if item.qty == 0 {
                continue;
            }
            match cart.items.iter_mut().find(|existing| existing.id == item.id) {
                Some(existing) => existing.qty = existing.qty.saturating_add(item.qty),
                None => cart.items.push(item),
            }
        }
        cart
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, id: &str) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Total number of units across all lines.
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.qty).sum()
    }

    /// Sum of every line total.
    pub fn total(&self) -> f64 {
        self.items.iter().map(CartItem::line_total).sum()
    }

    /// Adds one unit of `id`, appending a new line if it is not in the cart yet.
    pub fn with_added(mut self, id: &str, name: &str, price: f64) -> Self {
        match self.items.iter_mut().find(|item| item.id == id) {
            Some(existing) => existing.qty = existing.qty.saturating_add(1),
            None => self.items.push(CartItem::new(id, name, price)),
        }
        self
    }

    /// Drops the line for `id`. Unknown ids leave the cart unchanged.
    pub fn without(mut self, id: &str) -> Self {
        self.items.retain(|item| item.id != id);
        self
    }

    /// Sets the quantity of `id`; a quantity of zero or below removes the line.
    pub fn with_quantity(mut self, id: &str, qty: i64) -> Self {
        if self.get(id).is_none() {
            return self;
        }
        if qty <= 0 {
            return self.without(id);
        }
        let qty = u32::try_from(qty).unwrap_or(u32::MAX);
        if let Some(item) = self.items.iter_mut().find(|item| item.id == id) {
            item.qty = qty;
        }
        self
    }
}
