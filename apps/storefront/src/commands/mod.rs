//! # Commands Module
//!
//! Every operation the presentation layer can invoke.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs         ◄─── You are here (exports)
//! ├── product.rs     ◄─── Browse, search, product detail
//! ├── cart.rs        ◄─── Cart manipulation
//! ├── checkout.rs    ◄─── Quote and simulated payment
//! ├── tracking.rs    ◄─── Order lookup and shipment timeline
//! ├── profile.rs     ◄─── Account details and order history
//! ├── admin.rs       ◄─── Dashboard stats, catalog and order edits
//! └── navigation.rs  ◄─── Guarded view changes
//! ```
//!
//! ## State Injection
//! Each command declares only the state it needs:
//! ```rust,ignore
//! // Only needs the catalog
//! fn search_products(catalog: &CatalogState, ...)
//!
//! // Only needs the cart
//! fn get_cart(cart: &CartState)
//!
//! // Needs both
//! fn add_to_cart(catalog: &CatalogState, cart: &CartState, ...)
//!
//! // Needs a service
//! async fn track_order(catalog: &CatalogState, tracker: &dyn ShipmentTracker, ...)
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod navigation;
pub mod product;
pub mod profile;
pub mod tracking;
