use crate::domain::{OrderComposer, Product, ShopError, ShopResult};
use serde::Deserialize;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

/// Storefront settings read from a TOML file.
///
/// Every field has a default, so an empty or missing file gives a working
/// shop.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct ShopConfig {
    pub shop_name: String,
    /// Messaging recipient in international format without the plus sign.
    pub whatsapp_number: String,
    pub instagram_url: String,
    pub currency_symbol: String,
    pub storage_key: String,
    pub products: Vec<Product>,
}

impl Default for ShopConfig {
    fn default() -> Self {
        Self {
            shop_name: "WildNest".to_string(),
            whatsapp_number: "917295857885".to_string(),
            instagram_url: "https://www.instagram.com/wildnnest/".to_string(),
            currency_symbol: "₹".to_string(),
            storage_key: "wildnest_cart_v1".to_string(),
            products: vec![
                Product {
                    id: "wild-001".to_string(),
                    name: "Wild Tee".to_string(),
                    price: 799.0,
                    description: "Heavyweight cotton tee".to_string(),
                },
                Product {
                    id: "wild-002".to_string(),
                    name: "Nest Hoodie".to_string(),
                    price: 1499.0,
                    description: "Brushed fleece hoodie".to_string(),
                },
            ],
        }
    }
}

impl ShopConfig {
    pub fn from_toml(raw: &str) -> ShopResult<Self> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Catalog prices must be finite and non-negative, product ids unique.
    fn validate(&self) -> ShopResult<()> {
        for (index, product) in self.products.iter().enumerate() {
            if !product.price.is_finite() || product.price < 0.0 {
                return Err(ShopError::InvalidConfig(format!(
                    "product {:?} has invalid price {}",
                    product.id, product.price
                )));
            }
            if self.products[..index].iter().any(|p| p.id == product.id) {
                return Err(ShopError::InvalidConfig(format!(
                    "duplicate product id {:?}",
                    product.id
                )));
            }
        }
        Ok(())
    }

    /// Reads `path`, falling back to defaults when the file does not exist.
    pub fn load(path: &Path) -> ShopResult<Self> {
        match fs::read_to_string(path) {
            Ok(raw) => Self::from_toml(&raw),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    pub fn composer(&self) -> OrderComposer {
        OrderComposer::new(&self.shop_name, &self.whatsapp_number, &self.currency_symbol)
    }
}
