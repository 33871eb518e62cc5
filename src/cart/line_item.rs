//! Cart line items and the in-memory cart
//!
//! A line is identified by (product id, size, colour, custom configuration).
//! Adding something whose identity matches an existing line increases that
//! line's quantity; anything else becomes a new line. Quantity updates and
//! removals address a line by the same identity, so two sizes of one product
//! stay independently editable.

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::domain::{JerseyConfig, PricedProduct};

/// Identity of a cart line
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItemKey {
    pub product_id: String,
    pub size: Option<String>,
    pub color: Option<String>,
    /// Hex SHA-256 of the serialized custom configuration
    pub config_digest: Option<String>,
}

impl LineItemKey {
    pub fn new(product_id: &str, size: Option<&str>, color: Option<&str>, config: Option<&JerseyConfig>) -> Self {
        LineItemKey {
            product_id: product_id.to_string(),
            size: non_blank(size),
            color: non_blank(color),
            config_digest: config.map(config_digest),
        }
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value.map(str::trim).filter(|v| !v.is_empty()).map(str::to_string)
}

/// Digest of a configuration's JSON form. Equal configurations always
/// serialize identically because field order is fixed by the struct.
pub fn config_digest(config: &JerseyConfig) -> String {
    let serialized = match serde_json::to_vec(config) {
        Ok(bytes) => bytes,
        Err(e) => {
            warn!(error = %e, "Failed to serialize configuration for cart key, using debug form");
            format!("{:?}", config).into_bytes()
        }
    };
    hex::encode(Sha256::digest(&serialized))
}

/// One line in the cart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub key: LineItemKey,
    pub product: PricedProduct,
    pub quantity: u32,
    pub custom_config: Option<JerseyConfig>,
}

impl CartItem {
    pub fn unit_price_cents(&self) -> u32 {
        self.product.unit_price_cents()
    }

    pub fn line_total_cents(&self) -> u64 {
        u64::from(self.unit_price_cents()) * u64::from(self.quantity)
    }
}

/// In-memory cart for one shopper
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cart {
    items: Vec<CartItem>,
    /// Cart panel visibility; adding an item opens it
    is_open: bool,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `quantity` units, merging with an existing line of the same identity
    pub fn add_item(
        &mut self,
        product: &PricedProduct,
        quantity: u32,
        size: Option<&str>,
        color: Option<&str>,
        config: Option<&JerseyConfig>,
    ) -> LineItemKey {
        let key = LineItemKey::new(&product.product.id, size, color, config);
        self.is_open = true;

        if quantity == 0 {
            debug!(product_id = %key.product_id, "Ignoring add of zero units");
            return key;
        }

        match self.items.iter_mut().find(|item| item.key == key) {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(quantity);
                debug!(
                    product_id = %key.product_id,
                    quantity = existing.quantity,
                    "Merged into existing cart line"
                );
            }
            None => {
                debug!(product_id = %key.product_id, quantity = quantity, "Added cart line");
                self.items.push(CartItem {
                    key: key.clone(),
                    product: product.clone(),
                    quantity,
                    custom_config: config.cloned(),
                });
            }
        }

        key
    }

    /// Set a line's quantity; zero removes the line. Returns whether the line
    /// existed.
    pub fn update_quantity(&mut self, key: &LineItemKey, quantity: u32) -> bool {
        if quantity == 0 {
            return self.remove_item(key);
        }
        match self.items.iter_mut().find(|item| &item.key == key) {
            Some(item) => {
                item.quantity = quantity;
                true
            }
            None => false,
        }
    }

    /// Remove one line. Returns whether it existed.
    pub fn remove_item(&mut self, key: &LineItemKey) -> bool {
        let before = self.items.len();
        self.items.retain(|item| &item.key != key);
        self.items.len() != before
    }

    /// Remove every line for a product, whatever its size or configuration
    pub fn remove_product(&mut self, product_id: &str) -> usize {
        let before = self.items.len();
        self.items.retain(|item| item.key.product_id != product_id);
        before - self.items.len()
    }

    pub fn get(&self, key: &LineItemKey) -> Option<&CartItem> {
        self.items.iter().find(|item| &item.key == key)
    }

    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    pub fn toggle(&mut self) {
        self.is_open = !self.is_open;
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    /// Empty the cart and close the panel
    pub fn clear(&mut self) {
        self.items.clear();
        self.is_open = false;
    }

    /// Sum of unit price times quantity, in cents
    pub fn subtotal_cents(&self) -> u64 {
        self.items.iter().map(CartItem::line_total_cents).sum()
    }

    /// Total units across all lines, saturating at `u32::MAX`
    pub fn item_count(&self) -> u32 {
        self.items.iter().map(|item| item.quantity).fold(0u32, u32::saturating_add)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub(crate) fn into_items(self) -> Vec<CartItem> {
        self.items
    }
}
