//! # Catalog State
//!
//! Wraps the mock data store for use in commands. The catalog's tables
//! carry their own locks, so no extra synchronization lives here.

use verdant_catalog::Catalog;

#[derive(Debug, Clone)]
pub struct CatalogState {
    catalog: Catalog,
}

impl CatalogState {
    pub fn new(catalog: Catalog) -> Self {
        CatalogState { catalog }
    }

    /// Returns a reference to the inner Catalog.
    ///
    /// ```rust
    /// use verdant_catalog::Catalog;
    /// use verdant_storefront::state::CatalogState;
    ///
    /// let state = CatalogState::new(Catalog::seeded());
    /// assert_eq!(state.inner().products().count().unwrap(), 12);
    /// ```
    pub fn inner(&self) -> &Catalog {
        &self.catalog
    }
}

impl Default for CatalogState {
    fn default() -> Self {
        CatalogState::new(Catalog::seeded())
    }
}
