//! # Catalog
//!
//! Owner of the in-memory tables.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Catalog (Clone = shared handle)                                       │
//! │                                                                         │
//! │   products: Arc<RwLock<Vec<Product>>>  ──► catalog.products()          │
//! │   orders:   Arc<RwLock<Vec<Order>>>    ──► catalog.orders()            │
//! │   profile:  Arc<RwLock<UserProfile>>   ──► catalog.profile()           │
//! │                                                                         │
//! │  Repositories are created per call and share the same tables, the way  │
//! │  a connection pool hands out connections.                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use tracing::info;
use verdant_core::{Order, Product, UserProfile};

use crate::repository::order::OrderRepository;
use crate::repository::product::ProductRepository;
use crate::repository::profile::ProfileRepository;
use crate::seed;

/// The whole mock data store.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Arc<RwLock<Vec<Product>>>,
    orders: Arc<RwLock<Vec<Order>>>,
    profile: Arc<RwLock<UserProfile>>,
}

impl Catalog {
    /// Creates a catalog over the given records.
    pub fn new(products: Vec<Product>, orders: Vec<Order>, profile: UserProfile) -> Self {
        Catalog {
            products: Arc::new(RwLock::new(products)),
            orders: Arc::new(RwLock::new(orders)),
            profile: Arc::new(RwLock::new(profile)),
        }
    }

    /// Creates a catalog loaded with the seed data.
    pub fn seeded() -> Self {
        let products = seed::products();
        let orders = seed::orders();
        info!(
            products = products.len(),
            orders = orders.len(),
            "Catalog seeded"
        );
        Catalog::new(products, orders, seed::profile())
    }

    /// No products and no orders; the demo profile is still present.
    pub fn empty() -> Self {
        Catalog::new(Vec::new(), Vec::new(), seed::profile())
    }

    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(Arc::clone(&self.products))
    }

    pub fn orders(&self) -> OrderRepository {
        OrderRepository::new(Arc::clone(&self.orders))
    }

    pub fn profile(&self) -> ProfileRepository {
        ProfileRepository::new(Arc::clone(&self.profile))
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Catalog::seeded()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seeded_and_empty() {
        let catalog = Catalog::seeded();
        assert_eq!(catalog.products().list().unwrap().len(), 12);
        assert_eq!(catalog.orders().list().unwrap().len(), 4);

        let empty = Catalog::empty();
        assert!(empty.products().list().unwrap().is_empty());
        assert!(empty.orders().list().unwrap().is_empty());
        assert!(empty.profile().get().unwrap().is_admin);
    }

    #[test]
    fn test_clones_share_tables() {
        let catalog = Catalog::seeded();
        let other = catalog.clone();

        other
            .products()
            .update(
                "snake-plant",
                crate::ProductUpdate {
                    stock: Some(1),
                    ..Default::default()
                },
            )
            .unwrap();

        let product = catalog.products().get_by_id("snake-plant").unwrap().unwrap();
        assert_eq!(product.in_stock, 1);
    }
}
