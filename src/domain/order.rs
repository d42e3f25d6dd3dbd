//! Order and notify-me messages handed off to the messaging deep link.

use super::cart::Cart;
use super::errors::ShopResult;
use super::money::format_money;
use url::{form_urlencoded, Url};

const MESSAGING_BASE: &str = "https://wa.me";

/// Builds prefilled chat messages and the `wa.me` links that carry them.
///
/// # Examples
///
/// ```
/// use launchshop::domain::{Cart, OrderComposer};
///
/// let composer = OrderComposer::new("WildNest", "917295857885", "₹");
/// let cart = Cart::default().with_added("mug", "mug", 150.0);
/// assert!(composer.compose_order(&cart).contains("mug x 1 = ₹150"));
/// ```
#[derive(Debug, Clone)]
pub struct OrderComposer {
    shop_name: String,
    recipient: String,
    currency_symbol: String,
}

impl OrderComposer {
    pub fn new(
        shop_name: impl Into<String>,
        recipient: impl Into<String>,
        currency_symbol: impl Into<String>,
    ) -> Self {
        Self {
            shop_name: shop_name.into(),
            recipient: recipient.into(),
            currency_symbol: currency_symbol.into(),
        }
    }

    pub fn currency_symbol(&self) -> &str {
        &self.currency_symbol
    }

    /// Multi-line order summary, or the generic greeting for an empty cart.
    pub fn compose_order(&self, cart: &Cart) -> String {
        if cart.is_empty() {
            return self.generic_order_message();
        }

        let mut lines = vec![
            format!("Hello {}!", self.shop_name),
            "I'd like to place an order:".to_string(),
        ];
        for item in cart.items() {
            lines.push(format!(
                "{} x {} = {}",
                item.name,
                item.qty,
                format_money(&self.currency_symbol, item.line_total())
            ));
        }
        lines.push(String::new());
        lines.push(format!("Total: {}", format_money(&self.currency_symbol, cart.total())));
        lines.push("Name:".to_string());
        lines.push("Address:".to_string());
        lines.push("Phone:".to_string());
        lines.push("(Please reply to confirm)".to_string());
        lines.join("\n")
    }

    pub fn generic_order_message(&self) -> String {
        format!("Hello {}! I would like to place an order.", self.shop_name)
    }

    pub fn notify_product_message(&self, product_name: &str) -> String {
        format!(
            "Hello {}, please notify me when \"{}\" is available. Thanks!",
            self.shop_name, product_name
        )
    }

    pub fn notify_launch_message(&self) -> String {
        format!(
            "Hello {}, please notify me when the product is launched. Thank you!",
            self.shop_name
        )
    }

    /// Link that opens a chat with the shop prefilled with `message`.
    pub fn deep_link(&self, message: &str) -> ShopResult<Url> {
        let mut url = self.chat_link()?;
        url.set_query(Some(&format!("text={}", encode_component(message))));
        Ok(url)
    }

    /// Link with no prefilled text.
    pub fn chat_link(&self) -> ShopResult<Url> {
        Ok(Url::parse(&format!("{}/{}", MESSAGING_BASE, self.recipient))?)
    }
}

/// Percent-encodes `text` for a query value, spaces as `%20`.
///
/// Form encoding writes spaces as `+` and escapes a literal `+` as `%2B`,
/// so every remaining `+` is a space.
fn encode_component(text: &str) -> String {
    form_urlencoded::byte_serialize(text.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}
