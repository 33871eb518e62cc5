//! Cart aggregation, shipping tiers and checkout

mod checkout;
mod line_item;
mod sessions;
mod shipping;

pub use checkout::{submit_design, OrderKind, Submission};
pub use line_item::{config_digest, Cart, CartItem, LineItemKey};
pub use sessions::{CartSession, CartSessions, OrderSummary, SessionError};
pub use shipping::{default_tiers, NextTier, ShippingPolicy, ShippingQuote, ShippingTier, BASE_SHIPPING_CENTS};
