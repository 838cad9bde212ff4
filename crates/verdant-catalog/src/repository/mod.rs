//! # Repository Module
//!
//! Access to the in-memory tables.
//!
//! ```text
//! Storefront command
//!      │  catalog.products().filter(&filter)
//!      ▼
//! ProductRepository ── read lock ──► Vec<Product>
//! OrderRepository   ── read/write ─► Vec<Order>
//! ProfileRepository ── read/write ─► UserProfile
//! ```
//!
//! Each repository is a cheap handle (`Arc` clone) over one table, created
//! on demand by [`crate::Catalog`].

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use crate::error::CatalogError;

pub mod order;
pub mod product;
pub mod profile;

/// Shared read lock that reports poisoning as a catalog error.
pub(crate) fn read<'a, T>(
    table: &'static str,
    lock: &'a RwLock<T>,
) -> Result<RwLockReadGuard<'a, T>, CatalogError> {
    lock.read()
        .map_err(|_: PoisonError<_>| CatalogError::LockPoisoned(table))
}

/// Exclusive write lock that reports poisoning as a catalog error.
pub(crate) fn write<'a, T>(
    table: &'static str,
    lock: &'a RwLock<T>,
) -> Result<RwLockWriteGuard<'a, T>, CatalogError> {
    lock.write()
        .map_err(|_: PoisonError<_>| CatalogError::LockPoisoned(table))
}
