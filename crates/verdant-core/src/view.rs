//! # View Router
//!
//! Which top-level screen the shopper is looking at, and the rules for
//! moving between screens.
//!
//! ## Transitions
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Navigation Guards                               │
//! │                                                                         │
//! │  Target                  Condition               Result                 │
//! │  ──────                  ─────────               ──────                 │
//! │  current view            -                       Unchanged              │
//! │  Checkout                cart is empty           Redirected ──► Cart    │
//! │  Admin { .. }            not an admin            Denied                 │
//! │  OrderConfirmation       always (direct)         Denied                 │
//! │  PaymentFailed           always (direct)         Denied                 │
//! │  anything else           -                       Moved                  │
//! │                                                                         │
//! │  OrderConfirmation is entered only through complete_checkout(),         │
//! │  PaymentFailed only through fail_checkout().                            │
//! │  back() pops a history of at most 32 views.                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The router knows nothing about carts or profiles; the caller hands it a
//! [`RouteContext`] snapshot with the two facts the guards inspect.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::fmt;
use ts_rs::TS;

/// Maximum number of views kept for `back()`.
pub const HISTORY_LIMIT: usize = 32;

// =============================================================================
// Views
// =============================================================================

/// Tabs of the admin dashboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum AdminTab {
    #[default]
    Dashboard,
    Products,
    Orders,
}

impl AdminTab {
    pub fn as_str(&self) -> &'static str {
        match self {
            AdminTab::Dashboard => "dashboard",
            AdminTab::Products => "products",
            AdminTab::Orders => "orders",
        }
    }
}

/// A top-level screen.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[serde(tag = "view", rename_all = "snake_case")]
#[ts(export)]
pub enum View {
    Home,
    Shop,
    ProductDetail { product_id: String },
    Cart,
    Checkout,
    OrderConfirmation { order_id: String },
    PaymentFailed,
    Tracking,
    Profile,
    Admin { tab: AdminTab },
}

impl Default for View {
    fn default() -> Self {
        View::Home
    }
}

impl View {
    /// Title for the header line.
    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Shop => "Shop",
            View::ProductDetail { .. } => "Product",
            View::Cart => "Your Cart",
            View::Checkout => "Checkout",
            View::OrderConfirmation { .. } => "Order Confirmed",
            View::PaymentFailed => "Payment Failed",
            View::Tracking => "Track Your Order",
            View::Profile => "Profile",
            View::Admin { .. } => "Admin",
        }
    }

    /// URL-style path for this view.
    ///
    /// ```rust
    /// use verdant_core::view::{AdminTab, View};
    ///
    /// assert_eq!(View::Shop.path(), "/shop");
    /// assert_eq!(View::Admin { tab: AdminTab::Orders }.path(), "/admin/orders");
    /// ```
    pub fn path(&self) -> String {
        match self {
            View::Home => "/".to_string(),
            View::Shop => "/shop".to_string(),
            View::ProductDetail { product_id } => format!("/product/{product_id}"),
            View::Cart => "/cart".to_string(),
            View::Checkout => "/checkout".to_string(),
            View::OrderConfirmation { order_id } => format!("/order/{order_id}"),
            View::PaymentFailed => "/payment-failed".to_string(),
            View::Tracking => "/track".to_string(),
            View::Profile => "/profile".to_string(),
            View::Admin { tab } => format!("/admin/{}", tab.as_str()),
        }
    }

    /// Parses a path produced by [`View::path`]. Trailing slashes and
    /// surrounding whitespace are ignored; `/admin` opens the dashboard tab.
    pub fn parse(path: &str) -> Option<View> {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .trim_start_matches('/')
            .split('/')
            .filter(|s| !s.is_empty())
            .collect();

        let view = match segments.as_slice() {
            [] => View::Home,
            ["shop"] => View::Shop,
            ["product", id] => View::ProductDetail {
                product_id: (*id).to_string(),
            },
            ["cart"] => View::Cart,
            ["checkout"] => View::Checkout,
            ["order", id] => View::OrderConfirmation {
                order_id: (*id).to_string(),
            },
            ["payment-failed"] => View::PaymentFailed,
            ["track"] => View::Tracking,
            ["profile"] => View::Profile,
            ["admin"] | ["admin", "dashboard"] => View::Admin {
                tab: AdminTab::Dashboard,
            },
            ["admin", "products"] => View::Admin {
                tab: AdminTab::Products,
            },
            ["admin", "orders"] => View::Admin {
                tab: AdminTab::Orders,
            },
            _ => return None,
        };
        Some(view)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path())
    }
}

// =============================================================================
// Navigation
// =============================================================================

/// Facts the guards need, snapshotted by the caller.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RouteContext {
    pub cart_is_empty: bool,
    pub is_admin: bool,
}

/// Outcome of a navigation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(tag = "outcome", rename_all = "snake_case")]
#[ts(export)]
pub enum Navigation {
    /// Now showing the requested view.
    Moved { to: View },
    /// A guard sent the shopper somewhere else.
    Redirected { requested: View, to: View },
    /// A guard refused; the current view is unchanged.
    Denied { requested: View, reason: String },
    /// Already there.
    Unchanged,
}

/// Finite-state router over [`View`].
#[derive(Debug, Clone, Default)]
pub struct Router {
    current: View,
    history: VecDeque<View>,
}

impl Router {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> &View {
        &self.current
    }

    /// Views available to `back()`, oldest first.
    pub fn history(&self) -> impl Iterator<Item = &View> {
        self.history.iter()
    }

    /// Requests a move to `target`, applying the guards.
    pub fn navigate(&mut self, target: View, ctx: &RouteContext) -> Navigation {
        if target == self.current {
            return Navigation::Unchanged;
        }

        match target {
            View::OrderConfirmation { .. } => Navigation::Denied {
                requested: target,
                reason: "Order confirmation is only shown after checkout".to_string(),
            },
            View::PaymentFailed => Navigation::Denied {
                requested: target,
                reason: "Payment failure is only shown after a declined checkout".to_string(),
            },
            View::Admin { .. } if !ctx.is_admin => Navigation::Denied {
                requested: target,
                reason: "Admin access required".to_string(),
            },
            View::Checkout if ctx.cart_is_empty => {
                if self.current == View::Cart {
                    return Navigation::Denied {
                        requested: target,
                        reason: "Your cart is empty".to_string(),
                    };
                }
                self.enter(View::Cart);
                Navigation::Redirected {
                    requested: target,
                    to: View::Cart,
                }
            }
            _ => {
                self.enter(target.clone());
                Navigation::Moved { to: target }
            }
        }
    }

    /// Moves to the confirmation screen for a just-placed order.
    ///
    /// Checkout is dropped from history so `back()` does not return to a
    /// form whose cart has already been cleared.
    pub fn complete_checkout(&mut self, order_id: impl Into<String>) -> Navigation {
        let to = View::OrderConfirmation {
            order_id: order_id.into(),
        };
        let previous = std::mem::replace(&mut self.current, to.clone());
        if previous != View::Checkout {
            self.remember(previous);
        }
        self.history.retain(|v| *v != View::Checkout);
        Navigation::Moved { to }
    }

    /// Moves to the failure screen after a declined payment.
    ///
    /// Checkout stays in history so `back()` returns to the form with the
    /// cart intact.
    pub fn fail_checkout(&mut self) -> Navigation {
        if self.current != View::PaymentFailed {
            self.enter(View::PaymentFailed);
        }
        Navigation::Moved {
            to: View::PaymentFailed,
        }
    }

    /// Returns to the previous view, if any.
    pub fn back(&mut self) -> Option<&View> {
        let previous = self.history.pop_back()?;
        self.current = previous;
        Some(&self.current)
    }

    fn enter(&mut self, next: View) {
        let previous = std::mem::replace(&mut self.current, next);
        self.remember(previous);
    }

    fn remember(&mut self, view: View) {
        if self.history.len() == HISTORY_LIMIT {
            self.history.pop_front();
        }
        self.history.push_back(view);
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const SHOPPER: RouteContext = RouteContext {
        cart_is_empty: false,
        is_admin: false,
    };

    fn product(id: &str) -> View {
        View::ProductDetail {
            product_id: id.to_string(),
        }
    }

    #[test]
    fn test_starts_at_home() {
        let router = Router::new();
        assert_eq!(router.current(), &View::Home);
        assert_eq!(router.history().count(), 0);
    }

    #[test]
    fn test_plain_moves() {
        let mut router = Router::new();
        assert_eq!(
            router.navigate(View::Shop, &SHOPPER),
            Navigation::Moved { to: View::Shop }
        );
        router.navigate(product("fern"), &SHOPPER);
        assert_eq!(router.current(), &product("fern"));
    }

    #[test]
    fn test_same_view_is_unchanged() {
        let mut router = Router::new();
        router.navigate(View::Shop, &SHOPPER);
        assert_eq!(router.navigate(View::Shop, &SHOPPER), Navigation::Unchanged);
        assert_eq!(router.history().count(), 1);
    }

    #[test]
    fn test_empty_cart_checkout_redirects_to_cart() {
        let mut router = Router::new();
        let ctx = RouteContext {
            cart_is_empty: true,
            ..SHOPPER
        };
        assert_eq!(
            router.navigate(View::Checkout, &ctx),
            Navigation::Redirected {
                requested: View::Checkout,
                to: View::Cart
            }
        );
        assert_eq!(router.current(), &View::Cart);

        // already on the cart, nowhere to redirect to
        assert!(matches!(
            router.navigate(View::Checkout, &ctx),
            Navigation::Denied { .. }
        ));
        assert_eq!(router.current(), &View::Cart);
    }

    #[test]
    fn test_checkout_with_items_moves() {
        let mut router = Router::new();
        assert_eq!(
            router.navigate(View::Checkout, &SHOPPER),
            Navigation::Moved { to: View::Checkout }
        );
    }

    #[test]
    fn test_admin_requires_admin() {
        let mut router = Router::new();
        let admin = View::Admin {
            tab: AdminTab::Dashboard,
        };

        let nav = router.navigate(admin.clone(), &SHOPPER);
        assert!(matches!(nav, Navigation::Denied { .. }));
        assert_eq!(router.current(), &View::Home);

        let ctx = RouteContext {
            is_admin: true,
            ..SHOPPER
        };
        assert_eq!(router.navigate(admin.clone(), &ctx), Navigation::Moved { to: admin });
    }

    #[test]
    fn test_confirmation_only_via_checkout() {
        let mut router = Router::new();
        let confirmation = View::OrderConfirmation {
            order_id: "o-1".into(),
        };
        assert!(matches!(
            router.navigate(confirmation.clone(), &SHOPPER),
            Navigation::Denied { .. }
        ));

        router.navigate(View::Cart, &SHOPPER);
        router.navigate(View::Checkout, &SHOPPER);
        router.complete_checkout("o-1");
        assert_eq!(router.current(), &confirmation);

        // back skips the spent checkout form
        assert_eq!(router.back(), Some(&View::Cart));
        assert_eq!(router.back(), Some(&View::Home));
    }

    #[test]
    fn test_payment_failed_only_via_declined_checkout() {
        let mut router = Router::new();
        assert!(matches!(
            router.navigate(View::PaymentFailed, &SHOPPER),
            Navigation::Denied { .. }
        ));
        assert_eq!(router.current(), &View::Home);

        router.navigate(View::Cart, &SHOPPER);
        router.navigate(View::Checkout, &SHOPPER);
        assert_eq!(
            router.fail_checkout(),
            Navigation::Moved {
                to: View::PaymentFailed
            }
        );
        assert_eq!(router.current(), &View::PaymentFailed);
        assert_eq!(View::PaymentFailed.title(), "Payment Failed");

        // a second decline does not stack another entry
        router.fail_checkout();
        assert_eq!(router.history().count(), 3);

        // back returns to the form for a retry
        assert_eq!(router.back(), Some(&View::Checkout));
    }

    #[test]
    fn test_back_walks_history() {
        let mut router = Router::new();
        router.navigate(View::Shop, &SHOPPER);
        router.navigate(product("pothos"), &SHOPPER);

        assert_eq!(router.back(), Some(&View::Shop));
        assert_eq!(router.back(), Some(&View::Home));
        assert_eq!(router.back(), None);
        assert_eq!(router.current(), &View::Home);
    }

    #[test]
    fn test_history_is_bounded() {
        let mut router = Router::new();
        for i in 0..50 {
            router.navigate(product(&i.to_string()), &SHOPPER);
        }
        assert_eq!(router.history().count(), HISTORY_LIMIT);
        assert_eq!(router.history().next(), Some(&product("17")));
    }

    #[test]
    fn test_path_round_trip() {
        let views = [
            View::Home,
            View::Shop,
            product("snake-plant"),
            View::Cart,
            View::Checkout,
            View::OrderConfirmation {
                order_id: "abc".into(),
            },
            View::PaymentFailed,
            View::Tracking,
            View::Profile,
            View::Admin {
                tab: AdminTab::Products,
            },
        ];
        for view in views {
            assert_eq!(View::parse(&view.path()), Some(view));
        }
    }

    #[test]
    fn test_parse_leniency() {
        assert_eq!(View::parse(" /shop/ "), Some(View::Shop));
        assert_eq!(
            View::parse("/admin"),
            Some(View::Admin {
                tab: AdminTab::Dashboard
            })
        );
        assert_eq!(View::parse("/garden"), None);
        assert_eq!(View::parse("/product"), None);
    }
}
