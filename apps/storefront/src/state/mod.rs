//! # State Module
//!
//! Storefront state, one type per concern. Commands take only the pieces
//! they need; [`AppState`] bundles them for the shell.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐ ┌──────────────┐ ┌──────────────┐ ┌──────────────┐   │
//! │  │  CartState   │ │ CatalogState │ │ ConfigState  │ │ SessionState │   │
//! │  │              │ │              │ │              │ │              │   │
//! │  │  Arc<Mutex<  │ │  Catalog     │ │  Storefront  │ │  Arc<Mutex<  │   │
//! │  │    Cart>>    │ │  (RwLock per │ │  Config      │ │    Session>> │   │
//! │  │              │ │   table)     │ │  (read-only) │ │  router,     │   │
//! │  │              │ │              │ │              │ │  last order  │   │
//! │  └──────────────┘ └──────────────┘ └──────────────┘ └──────────────┘   │
//! │                                                                         │
//! │  THREAD SAFETY:                                                        │
//! │  • CartState / SessionState: exclusive access through a Mutex          │
//! │  • CatalogState: RwLock inside each repository table                   │
//! │  • ConfigState: read-only after startup                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod app;
mod cart;
mod catalog;
mod config;
mod session;

pub use app::AppState;
pub use cart::{CartState, CartTotals};
pub use catalog::CatalogState;
pub use config::ConfigState;
pub use session::{Session, SessionState};
