//! Bulk shipping discounts
//!
//! Shipping is a flat base charge reduced by the single best tier the cart's
//! item count reaches. Tiers never stack.

use serde::{Deserialize, Serialize};

/// Flat shipping charge in cents before discounts
pub const BASE_SHIPPING_CENTS: u32 = 999;

/// One discount tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShippingTier {
    /// Minimum total units for this tier to apply
    pub min_items: u32,
    /// Discount on the base shipping charge, in percent
    pub discount_percent: u32,
    pub label: String,
}

impl ShippingTier {
    pub fn new(min_items: u32, discount_percent: u32) -> Self {
        ShippingTier {
            min_items,
            discount_percent: discount_percent.min(100),
            label: format!("{}% off shipping", discount_percent.min(100)),
        }
    }
}

/// Default tiers: 20+ items 25%, 10+ items 15%, 5+ items 10%
pub fn default_tiers() -> Vec<ShippingTier> {
    vec![
        ShippingTier::new(20, 25),
        ShippingTier::new(10, 15),
        ShippingTier::new(5, 10),
    ]
}

/// Hint towards the next better tier
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NextTier {
    pub tier: ShippingTier,
    pub items_needed: u32,
}

/// Shipping charge for a given item count
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShippingQuote {
    pub item_count: u32,
    pub base_cents: u32,
    pub shipping_cents: u32,
    pub savings_cents: u32,
    pub discount_percent: u32,
    pub applied_tier: Option<ShippingTier>,
    pub next_tier: Option<NextTier>,
}

/// Base charge plus descending tier table
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ShippingPolicy {
    base_cents: u32,
    tiers: Vec<ShippingTier>,
}

impl ShippingPolicy {
    /// Tiers may be given in any order. Discounts above 100% are capped.
    pub fn new(base_cents: u32, mut tiers: Vec<ShippingTier>) -> Self {
        for tier in &mut tiers {
            tier.discount_percent = tier.discount_percent.min(100);
        }
        tiers.sort_by(|a, b| b.min_items.cmp(&a.min_items));
        tiers.dedup_by_key(|tier| tier.min_items);
        ShippingPolicy { base_cents, tiers }
    }

    pub fn base_cents(&self) -> u32 {
        self.base_cents
    }

    pub fn tiers(&self) -> &[ShippingTier] {
        &self.tiers
    }

    /// Highest threshold met by `item_count`
    pub fn tier_for(&self, item_count: u32) -> Option<&ShippingTier> {
        self.tiers.iter().find(|tier| item_count >= tier.min_items)
    }

    pub fn quote(&self, item_count: u32) -> ShippingQuote {
        let applied = self.tier_for(item_count).cloned();
        let discount_percent = applied.as_ref().map_or(0, |tier| tier.discount_percent);

        // Round savings to the nearest cent
        let savings_cents = ((u64::from(self.base_cents) * u64::from(discount_percent) + 50) / 100) as u32;

        // Smallest threshold above the current count
        let next_tier = self
            .tiers
            .iter()
            .rev()
            .find(|tier| tier.min_items > item_count)
            .map(|tier| NextTier {
                tier: tier.clone(),
                items_needed: tier.min_items - item_count,
            });

        ShippingQuote {
            item_count,
            base_cents: self.base_cents,
            shipping_cents: self.base_cents.saturating_sub(savings_cents),
            savings_cents,
            discount_percent,
            applied_tier: applied,
            next_tier,
        }
    }
}

impl Default for ShippingPolicy {
    fn default() -> Self {
        ShippingPolicy::new(BASE_SHIPPING_CENTS, default_tiers())
    }
}
