//! # Order Repository
//!
//! Placed orders: creation at checkout, history, tracking lookups, the
//! admin order search and the admin status workflow.
//!
//! ## Lookup Heuristic
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  "  vrd-261016-1005 "                                                  │
//! │        │ trim + lowercase                                               │
//! │        ▼                                                                │
//! │  equals order id?            ──► hit                                   │
//! │  equals order number?        ──► hit                                   │
//! │  equals tracking number?     ──► hit                                   │
//! │  all digits and the order    ──► hit   ("1005" finds VRD-...-1005)      │
//! │  number ends with -<digits>?                                           │
//! │        │                                                                │
//! │        ▼                                                                │
//! │  None                                                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;
use verdant_core::{Money, Order, OrderItem, OrderStatus, ShippingAddress};

use super::{read, write};
use crate::error::{CatalogError, CatalogResult};

const TABLE: &str = "orders";

/// First sequence number handed out by `next_order_number`.
const ORDER_SEQUENCE_START: usize = 1001;

/// Everything checkout knows about a new order. The repository assigns
/// the id, order number, status and timestamps.
#[derive(Debug, Clone)]
pub struct OrderDraft {
    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,
    /// Promo savings, subtracted from the total.
    pub discount: Money,
    pub shipping_address: ShippingAddress,
    pub tracking_number: Option<String>,
}

/// Admin order search. Both criteria must hold; the default matches
/// every order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderFilter {
    /// Case-insensitive substring of the order id, order number, customer
    /// name or customer email.
    pub query: Option<String>,
    pub status: Option<OrderStatus>,
}

impl OrderFilter {
    fn matches(&self, order: &Order, needle: Option<&str>) -> bool {
        self.status.map_or(true, |s| order.status == s)
            && needle.map_or(true, |n| {
                order.id.to_lowercase().contains(n)
                    || order.order_number.to_lowercase().contains(n)
                    || order.shipping_address.full_name.to_lowercase().contains(n)
                    || order.shipping_address.email.to_lowercase().contains(n)
            })
    }
}

/// Repository for the order table.
#[derive(Debug, Clone)]
pub struct OrderRepository {
    table: Arc<RwLock<Vec<Order>>>,
}

impl OrderRepository {
    pub fn new(table: Arc<RwLock<Vec<Order>>>) -> Self {
        OrderRepository { table }
    }

    /// All orders, newest first.
    pub fn list(&self) -> CatalogResult<Vec<Order>> {
        let mut orders = read(TABLE, &self.table)?.clone();
        orders.sort_by(|a, b| b.placed_at.cmp(&a.placed_at));
        Ok(orders)
    }

    pub fn get(&self, id: &str) -> CatalogResult<Option<Order>> {
        let orders = read(TABLE, &self.table)?;
        Ok(orders.iter().find(|o| o.id == id).cloned())
    }

    /// Orders matching an admin search, newest first.
    pub fn filter(&self, filter: &OrderFilter) -> CatalogResult<Vec<Order>> {
        let needle = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut orders = self.list()?;
        orders.retain(|o| filter.matches(o, needle.as_deref()));

        debug!(count = orders.len(), status = ?filter.status, "Order filter returned orders");
        Ok(orders)
    }

    /// One shopper's orders, newest first.
    pub fn for_user(&self, user_id: &str) -> CatalogResult<Vec<Order>> {
        let mut orders = self.list()?;
        orders.retain(|o| o.user_id == user_id);
        Ok(orders)
    }

    /// Stores an already-built order.
    pub fn insert(&self, order: Order) -> CatalogResult<()> {
        debug!(id = %order.id, order_number = %order.order_number, "Inserting order");
        write(TABLE, &self.table)?.push(order);
        Ok(())
    }

    /// Creates a `Pending` order from a checkout draft.
    ///
    /// ## Generated Fields
    /// - `id`: UUID v4
    /// - `order_number`: `VRD-{yymmdd}-{NNNN}`, NNNN counting up from 1001
    /// - `placed_at` / `updated_at`: now
    pub fn create(&self, draft: OrderDraft) -> CatalogResult<Order> {
        let now = Utc::now();
        let mut orders = write(TABLE, &self.table)?;

        let order = Order {
            id: Uuid::new_v4().to_string(),
            order_number: order_number(now, ORDER_SEQUENCE_START + orders.len()),
            user_id: draft.user_id,
            items: draft.items,
            subtotal: draft.subtotal,
            shipping: draft.shipping,
            tax: draft.tax,
            discount: draft.discount,
            total: draft.subtotal + draft.shipping + draft.tax - draft.discount,
            status: OrderStatus::Pending,
            shipping_address: draft.shipping_address,
            tracking_number: draft.tracking_number,
            placed_at: now,
            updated_at: now,
        };

        info!(
            id = %order.id,
            order_number = %order.order_number,
            total = %order.total,
            "Order created"
        );
        orders.push(order.clone());
        Ok(order)
    }

    /// Moves an order to `status` if the lifecycle allows it.
    pub fn update_status(&self, id: &str, status: OrderStatus) -> CatalogResult<Order> {
        let mut orders = write(TABLE, &self.table)?;
        let order = orders
            .iter_mut()
            .find(|o| o.id == id)
            .ok_or_else(|| CatalogError::not_found("Order", id))?;

        if !order.status.can_transition_to(status) {
            warn!(id = %id, from = %order.status, to = %status, "Rejected status change");
            return Err(CatalogError::InvalidTransition {
                order_id: order.order_number.clone(),
                from: order.status,
                to: status,
            });
        }

        info!(id = %id, from = %order.status, to = %status, "Order status changed");
        order.status = status;
        order.updated_at = Utc::now();
        Ok(order.clone())
    }

    /// Finds an order by id, order number or tracking number.
    pub fn lookup(&self, query: &str) -> CatalogResult<Option<Order>> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(None);
        }

        let orders = read(TABLE, &self.table)?;
        let exact = orders.iter().find(|o| {
            o.id.to_lowercase() == needle
                || o.order_number.to_lowercase() == needle
                || o.tracking_number
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase() == needle)
        });

        let found = exact.or_else(|| {
            if !needle.chars().all(|c| c.is_ascii_digit()) {
                return None;
            }
            let suffix = format!("-{needle}");
            orders.iter().find(|o| o.order_number.ends_with(&suffix))
        });

        debug!(query = %needle, found = found.is_some(), "Order lookup");
        Ok(found.cloned())
    }

    pub fn count(&self) -> CatalogResult<usize> {
        Ok(read(TABLE, &self.table)?.len())
    }
}

fn order_number(at: DateTime<Utc>, sequence: usize) -> String {
    format!("VRD-{}-{:04}", at.format("%y%m%d"), sequence)
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{seed, Catalog};
    use verdant_core::DEMO_USER_ID;

    fn draft() -> OrderDraft {
        OrderDraft {
            user_id: DEMO_USER_ID.to_string(),
            items: vec![OrderItem {
                product_id: "lavender".into(),
                name: "English Lavender".into(),
                unit_price: Money::from_cents(1499),
                quantity: 2,
            }],
            subtotal: Money::from_cents(2998),
            shipping: Money::from_cents(1299),
            tax: Money::from_cents(240),
            discount: Money::zero(),
            shipping_address: seed::demo_address(),
            tracking_number: Some("1ZVRDTEST".into()),
        }
    }

    #[test]
    fn test_list_newest_first() {
        let orders = Catalog::seeded().orders().list().unwrap();
        assert!(orders
            .windows(2)
            .all(|w| w[0].placed_at >= w[1].placed_at));
        assert_eq!(orders[0].id, "ord-1004");
    }

    #[test]
    fn test_create_assigns_identity() {
        let repo = Catalog::seeded().orders();
        let order = repo.create(draft()).unwrap();

        assert_eq!(order.status, OrderStatus::Pending);
        assert_eq!(order.total.cents(), 2998 + 1299 + 240);
        assert!(order.order_number.ends_with("-1005"));
        assert_eq!(repo.count().unwrap(), 5);
        assert_eq!(repo.list().unwrap()[0].id, order.id);
        assert_eq!(repo.get(&order.id).unwrap(), Some(order));
    }

    #[test]
    fn test_create_subtracts_discount() {
        let repo = Catalog::seeded().orders();
        let order = repo
            .create(OrderDraft {
                discount: Money::from_cents(300),
                ..draft()
            })
            .unwrap();

        assert_eq!(order.discount.cents(), 300);
        assert_eq!(order.total.cents(), 2998 + 1299 + 240 - 300);
    }

    #[test]
    fn test_filter_by_query_and_status() {
        let repo = Catalog::seeded().orders();

        assert_eq!(repo.filter(&OrderFilter::default()).unwrap().len(), 4);

        let shipped = repo
            .filter(&OrderFilter {
                status: Some(OrderStatus::Shipped),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(shipped.len(), 1);
        assert_eq!(shipped[0].id, "ord-1003");

        let by_name = repo
            .filter(&OrderFilter {
                query: Some("  RIVERA ".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_name.len(), 4);

        let by_email = repo
            .filter(&OrderFilter {
                query: Some("Alex.Rivera@".into()),
                status: Some(OrderStatus::Processing),
            })
            .unwrap();
        assert_eq!(by_email.len(), 1);
        assert_eq!(by_email[0].id, "ord-1004");

        let by_id = repo
            .filter(&OrderFilter {
                query: Some("ORD-1002".into()),
                ..Default::default()
            })
            .unwrap();
        assert_eq!(by_id.len(), 1);
        assert_eq!(by_id[0].id, "ord-1002");

        let none = repo
            .filter(&OrderFilter {
                query: Some("ord-1003".into()),
                status: Some(OrderStatus::Delivered),
            })
            .unwrap();
        assert!(none.is_empty());
    }

    #[test]
    fn test_for_user() {
        let repo = Catalog::seeded().orders();
        assert_eq!(repo.for_user(DEMO_USER_ID).unwrap().len(), 4);
        assert!(repo.for_user("someone-else").unwrap().is_empty());
    }

    #[test]
    fn test_update_status_follows_lifecycle() {
        let repo = Catalog::seeded().orders();

        let shipped = repo.update_status("ord-1004", OrderStatus::Shipped).unwrap();
        assert_eq!(shipped.status, OrderStatus::Shipped);

        let err = repo
            .update_status("ord-1004", OrderStatus::Cancelled)
            .unwrap_err();
        assert!(matches!(
            err,
            CatalogError::InvalidTransition {
                from: OrderStatus::Shipped,
                to: OrderStatus::Cancelled,
                ..
            }
        ));

        assert!(repo
            .update_status("ord-1001", OrderStatus::Shipped)
            .is_err());
        assert!(matches!(
            repo.update_status("missing", OrderStatus::Shipped),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_lookup_heuristic() {
        let repo = Catalog::seeded().orders();

        let by_id = repo.lookup(" ORD-1003 ").unwrap().unwrap();
        assert_eq!(by_id.id, "ord-1003");

        let by_tracking = repo.lookup("1zvrd0000001001").unwrap().unwrap();
        assert_eq!(by_tracking.id, "ord-1001");

        let number = by_id.order_number.to_lowercase();
        assert_eq!(repo.lookup(&number).unwrap().unwrap().id, "ord-1003");

        assert_eq!(repo.lookup("1002").unwrap().unwrap().id, "ord-1002");

        assert!(repo.lookup("").unwrap().is_none());
        assert!(repo.lookup("9999").unwrap().is_none());
        assert!(repo.lookup("banana").unwrap().is_none());
    }
}
