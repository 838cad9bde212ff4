//! # verdant-core: Pure Business Logic for the Verdant Storefront
//!
//! This crate holds the storefront's domain rules as pure functions with zero
//! I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Verdant Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Presentation (shell / web)                   │   │
//! │  │    Shop ──► Product ──► Cart ──► Checkout ──► Tracking          │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    Storefront Commands                          │   │
//! │  │    add_to_cart, place_order, track_order, navigate, ...         │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ verdant-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │   money   │  │   cart    │  │   view    │  │   │
//! │  │   │  Product  │  │   Money   │  │   Cart    │  │  Router   │  │   │
//! │  │   │   Order   │  │  TaxRate  │  │ CartLine  │  │   View    │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO TIMERS • NO RANDOMNESS • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Order, UserProfile, ...)
//! - [`money`] - Money type with integer arithmetic
//! - [`cart`] - The cart reducer and derived totals
//! - [`view`] - View enum and navigation guards
//! - [`error`] - Domain error types
//! - [`validation`] - Input validation in front of the reducer
//!
//! ## Example Usage
//!
//! ```rust
//! use verdant_core::cart::Cart;
//! use verdant_core::money::Money;
//! # use verdant_core::types::*;
//! # fn fern() -> Product {
//! #     Product {
//! #         id: "fern".into(), name: "Boston Fern".into(),
//! #         scientific_name: "Nephrolepis exaltata".into(),
//! #         price: Money::from_cents(2000), description: String::new(),
//! #         image: String::new(), category: Category::Houseplant,
//! #         care_level: CareLevel::Easy, light: LightLevel::Medium,
//! #         water: WaterNeeds::High, humidity: Humidity::High,
//! #         pet_friendly: true, in_stock: 10, featured: false,
//! #     }
//! # }
//!
//! let mut cart = Cart::new();
//! cart.add(&fern(), 3);
//!
//! assert_eq!(cart.item_count(), 3);
//! assert_eq!(cart.total(), Money::from_cents(6000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod error;
pub mod money;
pub mod types;
pub mod validation;
pub mod view;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use cart::{reduce, Cart, CartAction, CartLine};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::{Money, TaxRate};
pub use types::*;
pub use view::{AdminTab, Navigation, RouteContext, Router, View};

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum quantity a shopper may request for a single line.
///
/// Enforced by [`validation::validate_quantity`] at the command layer;
/// the cart reducer itself never rejects input.
pub const MAX_ITEM_QUANTITY: i64 = 99;

/// Identifier of the demo shopper every session runs as.
pub const DEMO_USER_ID: &str = "user-001";
