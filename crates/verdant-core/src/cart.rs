//! # Cart
//!
//! The shopper's cart: an ordered list of `(Product, quantity)` lines and the
//! aggregates every screen reads from it.
//!
//! ## Operations
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Transitions                                     │
//! │                                                                         │
//! │  Action                     Effect                                      │
//! │  ──────                     ──────                                      │
//! │  Add(product, n)       ──►  line exists? qty += n : push new line       │
//! │  Remove(id)            ──►  drop matching line (no-op if absent)        │
//! │  SetQuantity(id, n)    ──►  n <= 0 ? Remove(id) : qty = n               │
//! │                             (no-op if absent, never inserts)            │
//! │  Clear                 ──►  no lines                                    │
//! │                                                                         │
//! │  Derived (recomputed on every read, never stored):                      │
//! │    total()       = Σ price × quantity                                   │
//! │    item_count()  = Σ quantity                                           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every operation is total: there is no error type here. `add` does not
//! validate its quantity and does not consult stock; callers validate
//! with [`crate::validation::validate_quantity`] first.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::money::Money;
use crate::types::Product;

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart and how many of it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct CartLine {
    pub product: Product,
    pub quantity: i64,
}

impl CartLine {
    /// Unit price × quantity.
    #[inline]
    pub fn line_total(&self) -> Money {
        self.product.price().multiply_quantity(self.quantity)
    }

    /// Quantity requested beyond what the catalog reports in stock.
    pub fn exceeds_stock(&self) -> bool {
        self.quantity > i64::from(self.product.in_stock)
    }
}

// =============================================================================
// Cart Action
// =============================================================================

/// A cart transition, as dispatched by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartAction {
    Add { product: Product, quantity: i64 },
    Remove { product_id: String },
    SetQuantity { product_id: String, quantity: i64 },
    Clear,
}

impl CartAction {
    /// `Add` with the default quantity of one.
    pub fn add_one(product: Product) -> Self {
        CartAction::Add {
            product,
            quantity: 1,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - At most one line per product id
/// - Lines keep insertion order; removal never reorders survivors
/// - `set_quantity` never leaves a line at zero or below
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Lines in insertion order.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Looks up the line for a product.
    pub fn line(&self, product_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.product.id == product_id)
    }

    /// Adds `quantity` of `product`.
    ///
    /// An existing line has the quantity added to it; otherwise a new line
    /// goes to the end. The quantity is taken as given; the running
    /// quantity saturates at the `i64` bounds.
    pub fn add(&mut self, product: &Product, quantity: i64) {
        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }

        self.lines.push(CartLine {
            product: product.clone(),
            quantity,
        });
    }

    /// Removes the line for `product_id`, if any.
    pub fn remove(&mut self, product_id: &str) {
        self.lines.retain(|l| l.product.id != product_id);
    }

    /// Replaces the quantity of an existing line.
    ///
    /// `quantity <= 0` removes the line. Unknown ids are ignored.
    pub fn set_quantity(&mut self, product_id: &str, quantity: i64) {
        if quantity <= 0 {
            self.remove(product_id);
            return;
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product_id) {
            line.quantity = quantity;
        }
    }

    /// Empties the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Applies an action in place.
    pub fn apply(&mut self, action: CartAction) {
        match action {
            CartAction::Add { product, quantity } => self.add(&product, quantity),
            CartAction::Remove { product_id } => self.remove(&product_id),
            CartAction::SetQuantity {
                product_id,
                quantity,
            } => self.set_quantity(&product_id, quantity),
            CartAction::Clear => self.clear(),
        }
    }

    /// Σ price × quantity over all lines.
    pub fn total(&self) -> Money {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// Σ quantity over all lines (units, not lines).
    pub fn item_count(&self) -> i64 {
        self.lines
            .iter()
            .fold(0i64, |count, l| count.saturating_add(l.quantity))
    }

    /// Number of distinct products.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Lines asking for more than the catalog has.
    ///
    /// Informational only: nothing in the cart enforces stock.
    pub fn over_stock_lines(&self) -> impl Iterator<Item = &CartLine> {
        self.lines.iter().filter(|l| l.exceeds_stock())
    }
}

/// Pure reducer form: the next cart for `action` applied to `cart`.
pub fn reduce(mut cart: Cart, action: CartAction) -> Cart {
    cart.apply(action);
    cart
}

// =============================================================================
// Unit Tests
// =============================================================================
