//! # Cart State
//!
//! The session's cart, shared by every command that reads or changes it.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Shopper Action          Command                 Cart Transition        │
//! │  ──────────────          ───────                 ───────────────        │
//! │  Add to cart ──────────► add_to_cart() ────────► CartAction::Add        │
//! │  Change quantity ──────► update_cart_item() ───► CartAction::SetQuantity│
//! │  Remove ───────────────► remove_from_cart() ───► CartAction::Remove     │
//! │  Empty cart ───────────► clear_cart() ─────────► CartAction::Clear      │
//! │  Successful checkout ──► place_order() ────────► SetQuantity per line   │
//! │                          (remove_ordered)        of the ordered snapshot│
//! │                                                                         │
//! │  One writer at a time (Mutex); each transition applies atomically.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use verdant_core::{Cart, CartAction};

/// Cart totals summary for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Distinct products.
    pub line_count: usize,
    /// Units across all lines.
    pub item_count: i64,
    pub total_cents: i64,
}

impl From<&Cart> for CartTotals {
    fn from(cart: &Cart) -> Self {
        CartTotals {
            line_count: cart.line_count(),
            item_count: cart.item_count(),
            total_cents: cart.total().cents(),
        }
    }
}

/// Shared cart state.
///
/// Clones share the same cart.
#[derive(Debug, Clone, Default)]
pub struct CartState {
    cart: Arc<Mutex<Cart>>,
}

impl CartState {
    /// Creates a new empty cart state.
    pub fn new() -> Self {
        Self::default()
    }

    /// Executes a function with read access to the cart.
    ///
    /// Every cart transition is total, so a panic elsewhere cannot leave the
    /// cart half-updated; a poisoned lock is recovered rather than reported.
    pub fn with_cart<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&Cart) -> R,
    {
        let cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&cart)
    }

    /// Executes a function with write access to the cart.
    pub fn with_cart_mut<F, R>(&self, f: F) -> R
    where
        F: FnOnce(&mut Cart) -> R,
    {
        let mut cart = self.cart.lock().unwrap_or_else(PoisonError::into_inner);
        f(&mut cart)
    }

    /// Applies one transition and returns the resulting totals.
    pub fn dispatch(&self, action: CartAction) -> CartTotals {
        self.with_cart_mut(|cart| {
            cart.apply(action);
            CartTotals::from(&*cart)
        })
    }

    /// Takes an ordered snapshot out of the live cart.
    ///
    /// Each snapshot line lowers the live quantity by what was ordered, so
    /// lines added or topped up after the snapshot was taken survive.
    pub fn remove_ordered(&self, ordered: &Cart) -> CartTotals {
        self.with_cart_mut(|cart| {
            for line in ordered.lines() {
                let Some(live) = cart.line(&line.product.id) else {
                    continue;
                };
                let remaining = live.quantity.saturating_sub(line.quantity);
                cart.apply(CartAction::SetQuantity {
                    product_id: line.product.id.clone(),
                    quantity: remaining,
                });
            }
            CartTotals::from(&*cart)
        })
    }

    pub fn is_empty(&self) -> bool {
        self.with_cart(Cart::is_empty)
    }
}
