//! Storefront products and categories

use serde::{Deserialize, Serialize};

/// Product id of the configurable jersey
pub const CUSTOM_JERSEY_ID: &str = "custom-jersey";

/// A product as supplied by the persistence collaborator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Base price in cents (USD)
    pub price_cents: u32,
    pub category: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub in_stock: bool,
    #[serde(default)]
    pub is_custom_jersey: bool,
}

impl Product {
    pub fn new(id: &str, name: &str, description: &str, price_cents: u32, category: &str) -> Self {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            description: description.to_string(),
            price_cents,
            category: category.to_string(),
            image: None,
            sizes: Vec::new(),
            colors: Vec::new(),
            in_stock: true,
            is_custom_jersey: false,
        }
    }

    pub fn with_sizes(mut self, sizes: &[&str]) -> Self {
        self.sizes = sizes.iter().map(|s| s.to_string()).collect();
        self
    }

    pub fn out_of_stock(mut self) -> Self {
        self.in_stock = false;
        self
    }
}

/// A product together with the price it is sold at in the current context
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PricedProduct {
    pub product: Product,
    /// Team-specific price when the product came from a team catalog
    pub team_price_cents: Option<u32>,
}

impl PricedProduct {
    pub fn base(product: Product) -> Self {
        PricedProduct { product, team_price_cents: None }
    }

    pub fn team(product: Product, price_cents: u32) -> Self {
        PricedProduct { product, team_price_cents: Some(price_cents) }
    }

    pub fn unit_price_cents(&self) -> u32 {
        self.team_price_cents.unwrap_or(self.product.price_cents)
    }
}

/// Product category
#[derive(Debug, Clone, Copy, Serialize)]
pub struct Category {
    pub id: &'static str,
    pub name: &'static str,
}

pub const CATEGORIES: [Category; 5] = [
    Category { id: "jerseys", name: "JERSEYS" },
    Category { id: "hoodies", name: "HOODIES" },
    Category { id: "jackets", name: "JACKETS" },
    Category { id: "pants", name: "PANTS" },
    Category { id: "accessories", name: "ACCESSORIES" },
];

/// Initial product list
pub fn seed_products() -> Vec<Product> {
    let mut custom = Product::new(
        CUSTOM_JERSEY_ID,
        "8TWO CUSTOM JERSEY",
        "Fully customized jersey with your choice of colors, logo, name, and number. Premium quality materials with professional stitching.",
        5499,
        "jerseys",
    )
    .with_sizes(&["XS", "S", "M", "L", "XL", "2XL", "3XL", "4XL"]);
    custom.is_custom_jersey = true;

    vec![
        custom,
        Product::new("1", "8TWO PREMIUM JERSEY", "Heavyweight cotton jersey with spray paint graphic.", 4999, "jerseys")
            .with_sizes(&["S", "M", "L", "XL", "2XL"]),
        Product::new("2", "URBAN HOODIE", "Premium fleece hoodie with oversized 8TWO logo.", 7999, "hoodies")
            .with_sizes(&["S", "M", "L", "XL", "2XL", "3XL"]),
        Product::new("3", "STREET BOMBER JACKET", "Lightweight bomber jacket with water-resistant coating.", 12999, "jackets")
            .with_sizes(&["S", "M", "L", "XL"]),
        Product::new("4", "CARGO PANTS", "Durable cargo pants with multiple pockets.", 6999, "pants")
            .with_sizes(&["28", "30", "32", "34", "36", "38"]),
        Product::new("5", "LOGO SNAPBACK", "Classic snapback cap with 8TWO embroidery.", 2999, "accessories"),
        Product::new("6", "TECH TEE", "Performance tech tee with moisture-wicking fabric.", 3499, "jerseys")
            .with_sizes(&["S", "M", "L", "XL"]),
        Product::new("7", "PUFFER JACKET", "Insulated puffer jacket for cold weather.", 15999, "jackets")
            .with_sizes(&["S", "M", "L", "XL"])
            .out_of_stock(),
        Product::new("8", "BUCKET HAT", "Functional bucket hat with embroidered logo.", 2499, "accessories"),
    ]
}
