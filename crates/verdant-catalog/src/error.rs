//! # Catalog Error Types
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  Repository call (lookup miss, duplicate id, bad transition, lock)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  CatalogError (this module)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in storefront) ← code + message for the presentation layer  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use verdant_core::OrderStatus;

/// Mock data store errors.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// Entity not found.
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Insert with an id that is already taken.
    #[error("{entity} already exists: {id}")]
    Duplicate { entity: String, id: String },

    /// Order status change rejected by `OrderStatus::can_transition_to`.
    #[error("Order {order_id} cannot move from {from} to {to}")]
    InvalidTransition {
        order_id: String,
        from: OrderStatus,
        to: OrderStatus,
    },

    /// A writer panicked while holding one of the table locks.
    #[error("{0} table lock poisoned")]
    LockPoisoned(&'static str),
}

impl CatalogError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            entity: entity.into(),
            id: id.into(),
        }
    }
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
