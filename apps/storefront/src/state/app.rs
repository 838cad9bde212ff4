//! # Application State
//!
//! Everything a session needs, wired once at startup.

use std::sync::Arc;

use verdant_catalog::Catalog;

use super::{CartState, CatalogState, ConfigState, SessionState};
use crate::config::StorefrontConfig;
use crate::services::{OrderProcessor, ShipmentTracker, SimulatedProcessor, SimulatedTracker};

/// All state for one storefront session.
#[derive(Clone)]
pub struct AppState {
    pub cart: CartState,
    pub catalog: CatalogState,
    pub config: ConfigState,
    pub session: SessionState,
    pub processor: Arc<dyn OrderProcessor>,
    pub tracker: Arc<dyn ShipmentTracker>,
}

impl AppState {
    /// Seeded catalog and simulated services configured from `config`.
    pub fn new(config: StorefrontConfig) -> Self {
        let processor = Arc::new(SimulatedProcessor::from_config(&config.checkout));
        let tracker = Arc::new(SimulatedTracker::from_config(&config.tracking));
        AppState::with_services(Catalog::seeded(), config, processor, tracker)
    }

    /// Explicit catalog and services.
    pub fn with_services(
        catalog: Catalog,
        config: StorefrontConfig,
        processor: Arc<dyn OrderProcessor>,
        tracker: Arc<dyn ShipmentTracker>,
    ) -> Self {
        AppState {
            cart: CartState::new(),
            catalog: CatalogState::new(catalog),
            config: ConfigState::new(config),
            session: SessionState::new(),
            processor,
            tracker,
        }
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("cart", &self.cart)
            .field("catalog", &self.catalog)
            .field("config", &self.config)
            .field("session", &self.session)
            .finish_non_exhaustive()
    }
}
