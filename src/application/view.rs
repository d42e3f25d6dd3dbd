//! Projection of the cart into what the cart drawer displays.

use crate::domain::{format_money, Cart};

pub const EMPTY_CART_MESSAGE: &str = "Your cart is empty.";

/// One rendered line of the cart drawer.
#[derive(Debug, Clone, PartialEq)]
pub struct CartRow {
    pub id: String,
    pub name: String,
    pub unit_price: String,
    pub qty: u32,
    pub line_total: String,
}

/// Everything the drawer needs, rebuilt from scratch on every change.
#[derive(Debug, Clone, PartialEq)]
pub struct CartView {
    pub rows: Vec<CartRow>,
    pub total: f64,
    pub total_label: String,
    pub item_count: u32,
    pub checkout_enabled: bool,
    pub placeholder: Option<&'static str>,
}

impl CartView {
    pub fn project(cart: &Cart, currency_symbol: &str) -> Self {
        if cart.is_empty() {
            return Self {
                rows: Vec::new(),
                total: 0.0,
                total_label: format_money(currency_symbol, 0.0),
                item_count: 0,
                checkout_enabled: false,
                placeholder: Some(EMPTY_CART_MESSAGE),
            };
        }

        let rows = cart
            .items()
            .iter()
            .map(|item| CartRow {
                id: item.id.clone(),
                name: item.name.clone(),
                unit_price: format_money(currency_symbol, item.price),
                qty: item.qty,
                line_total: format_money(currency_symbol, item.line_total()),
            })
            .collect();
        let total = cart.total();

        Self {
            rows,
            total,
            total_label: format_money(currency_symbol, total),
            item_count: cart.item_count(),
            checkout_enabled: true,
            placeholder: None,
        }
    }
}

impl Default for CartView {
    fn default() -> Self {
        Self::project(&Cart::default(), "")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::OrderComposer;

    #[test]
    fn test_empty_cart_projection() {
        let view = CartView::project(&Cart::default(), "₹");

        assert!(view.rows.is_empty());
        assert_eq!(view.total, 0.0);
        assert_eq!(view.total_label, "₹0");
        assert!(!view.checkout_enabled);
        assert_eq!(view.placeholder, Some(EMPTY_CART_MESSAGE));
    }

    #[test]
    fn test_rows_follow_cart_order() {
        let cart = Cart::default()
            .with_added("shirt", "shirt", 250.0)
            .with_added("shirt", "shirt", 250.0)
            .with_added("mug", "mug", 150.0);

        let view = CartView::project(&cart, "₹");

        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].name, "shirt");
        assert_eq!(view.rows[0].unit_price, "₹250");
        assert_eq!(view.rows[0].line_total, "₹500");
        assert_eq!(view.rows[1].qty, 1);
        assert_eq!(view.total_label, "₹650");
        assert_eq!(view.item_count, 3);
        assert!(view.checkout_enabled);
        assert!(view.placeholder.is_none());
    }

    #[test]
    fn test_total_matches_order_message() {
        let cart = Cart::default()
            .with_added("tee", "tee", 799.0)
            .with_quantity("tee", 3)
            .with_added("cap", "cap", 349.5);

        let view = CartView::project(&cart, "₹");
        let message = OrderComposer::new("Shop", "1", "₹").compose_order(&cart);

        assert_eq!(view.total, 2746.5);
        assert!(message.contains(&format!("Total: {}", view.total_label)));
    }
}
