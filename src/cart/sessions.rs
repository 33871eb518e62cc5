//! Cart session registry
//!
//! Each shopper session owns exactly one cart. The registry only guards the
//! map of sessions; a cart is mutated through `with_cart` while the write
//! lock is held, so one session never observes a half-applied change.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};
use uuid::Uuid;

use super::line_item::{Cart, CartItem};
use super::shipping::{ShippingPolicy, ShippingQuote};

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("Cart session not found: {0}")]
    NotFound(Uuid),
    #[error("Cannot check out an empty cart")]
    EmptyCart,
}

/// One open cart
#[derive(Debug, Clone)]
pub struct CartSession {
    pub cart: Cart,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Final cart contents handed to payment processing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    pub session_id: Uuid,
    pub items: Vec<CartItem>,
    pub subtotal_cents: u64,
    pub shipping: ShippingQuote,
    pub total_cents: u64,
    pub placed_at: DateTime<Utc>,
}

/// Registry of open carts
#[derive(Debug, Default)]
pub struct CartSessions {
    sessions: RwLock<HashMap<Uuid, CartSession>>,
}

impl CartSessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open an empty cart and return its session id
    pub fn open(&self) -> Uuid {
        let id = Uuid::new_v4();
        let now = Utc::now();
        self.sessions.write().insert(
            id,
            CartSession {
                cart: Cart::new(),
                created_at: now,
                updated_at: now,
            },
        );
        debug!(session_id = %id, "Opened cart session");
        id
    }

    /// Run `f` against a session's cart
    pub fn with_cart<R>(&self, id: Uuid, f: impl FnOnce(&mut Cart) -> R) -> Result<R, SessionError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get_mut(&id).ok_or(SessionError::NotFound(id))?;
        let result = f(&mut session.cart);
        session.updated_at = Utc::now();
        Ok(result)
    }

    /// Copy of a session's cart
    pub fn snapshot(&self, id: Uuid) -> Option<Cart> {
        self.sessions.read().get(&id).map(|session| session.cart.clone())
    }

    pub fn updated_at(&self, id: Uuid) -> Option<DateTime<Utc>> {
        self.sessions.read().get(&id).map(|session| session.updated_at)
    }

    /// Close the session and summarise its cart. An empty cart stays open.
    pub fn checkout(&self, id: Uuid, policy: &ShippingPolicy) -> Result<OrderSummary, SessionError> {
        let mut sessions = self.sessions.write();
        let session = sessions.get(&id).ok_or(SessionError::NotFound(id))?;
        if session.cart.is_empty() {
            return Err(SessionError::EmptyCart);
        }
        let session = sessions.remove(&id).ok_or(SessionError::NotFound(id))?;
        drop(sessions);

        let subtotal_cents = session.cart.subtotal_cents();
        let shipping = policy.quote(session.cart.item_count());
        let total_cents = subtotal_cents + u64::from(shipping.shipping_cents);

        info!(
            session_id = %id,
            lines = session.cart.items().len(),
            units = shipping.item_count,
            subtotal_cents = subtotal_cents,
            total_cents = total_cents,
            "Cart checked out"
        );

        Ok(OrderSummary {
            session_id: id,
            items: session.cart.into_items(),
            subtotal_cents,
            shipping,
            total_cents,
            placed_at: Utc::now(),
        })
    }

    /// Discard a session. Returns whether it existed.
    pub fn close(&self, id: Uuid) -> bool {
        self.sessions.write().remove(&id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.read().is_empty()
    }
}
