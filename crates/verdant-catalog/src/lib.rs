//! # verdant-catalog: Mock Data Store for the Verdant Storefront
//!
//! Plants, historical orders and the shopper profile, held in process
//! memory and served through repositories.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Verdant Data Flow                                │
//! │                                                                         │
//! │  Storefront command (browse_products)                                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                  verdant-catalog (THIS CRATE)                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Catalog     │    │  Repositories │    │    Seed      │  │   │
//! │  │   │  (store.rs)   │    │ (product.rs)  │    │  (seed.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ Arc<RwLock<>> │◄───│ ProductRepo   │    │ 12 plants    │  │   │
//! │  │   │ per table     │    │ OrderRepo     │    │ 4 orders     │  │   │
//! │  │   │               │    │ ProfileRepo   │    │ 1 profile    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                                                         │
//! │  Nothing is written to disk. Admin edits last until the process exits. │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use verdant_catalog::Catalog;
//!
//! let catalog = Catalog::seeded();
//! let hits = catalog.products().search("monstera", 10).unwrap();
//! assert_eq!(hits.len(), 1);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod repository;
pub mod seed;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{CatalogError, CatalogResult};
pub use store::Catalog;

pub use repository::order::{OrderDraft, OrderFilter, OrderRepository};
pub use repository::product::{ProductFilter, ProductRepository, ProductUpdate, SortOrder};
pub use repository::profile::{ProfileRepository, ProfileUpdate};
