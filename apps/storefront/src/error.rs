//! # API Error Type
//!
//! Unified error type for storefront commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Verdant                                │
//! │                                                                         │
//! │  Command Function ── Result<T, ApiError>                               │
//! │         │                                                               │
//! │         ├── ValidationError (bad quantity, bad card) ──┐               │
//! │         ├── CoreError (empty cart, bad transition) ────┤               │
//! │         ├── CatalogError (not found, poisoned lock) ───┼──► ApiError   │
//! │         ├── Payment declined (simulated) ──────────────┤               │
//! │         └── Navigation denied (router guard) ──────────┘               │
//! │                                                                         │
//! │  Presentation layer receives:                                          │
//! │    { "code": "NOT_FOUND", "message": "Order not found: VRD-9" }        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use verdant_catalog::CatalogError;
use verdant_core::{CoreError, ValidationError};

/// API error returned from storefront commands.
///
/// ## Serialization
/// ```json
/// {
///   "code": "PAYMENT_DECLINED",
///   "message": "Card declined by issuer"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for API responses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Resource not found (404)
    NotFound,

    /// Input validation failed (400)
    ValidationError,

    /// Business rule rejected the request (422)
    BusinessLogic,

    /// Cart operation failed
    CartError,

    /// Simulated processor declined the payment
    PaymentDeclined,

    /// Router guard refused a view change
    NavigationDenied,

    /// Internal error (500)
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Creates a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::ValidationError, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }

    /// Creates a cart error.
    pub fn cart(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::CartError, message)
    }

    pub fn payment_declined(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::PaymentDeclined, message)
    }

    pub fn navigation_denied(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::NavigationDenied, message)
    }
}

/// Converts catalog errors to API errors.
impl From<CatalogError> for ApiError {
    fn from(err: CatalogError) -> Self {
        match err {
            CatalogError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            CatalogError::Duplicate { .. } => ApiError::validation(err.to_string()),
            CatalogError::InvalidTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CatalogError::LockPoisoned(table) => {
                tracing::error!(table = table, "Catalog lock poisoned");
                ApiError::internal("Catalog unavailable")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id),
            CoreError::OrderNotFound(id) => ApiError::not_found("Order", &id),
            CoreError::InvalidStatusTransition { .. } => {
                ApiError::new(ErrorCode::BusinessLogic, err.to_string())
            }
            CoreError::EmptyCart => ApiError::cart(err.to_string()),
            CoreError::Validation(e) => e.into(),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::validation(err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_core::OrderStatus;

    #[test]
    fn test_catalog_error_mapping() {
        let err: ApiError = CatalogError::not_found("Product", "fern").into();
        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Product not found: fern");

        let err: ApiError = CatalogError::InvalidTransition {
            order_id: "VRD-1".into(),
            from: OrderStatus::Delivered,
            to: OrderStatus::Pending,
        }
        .into();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err: ApiError = CatalogError::Duplicate {
            entity: "Product".into(),
            id: "lavender".into(),
        }
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "Product already exists: lavender");
    }

    #[test]
    fn test_core_error_mapping() {
        let err: ApiError = CoreError::EmptyCart.into();
        assert_eq!(err.code, ErrorCode::CartError);

        let err: ApiError = CoreError::Validation(ValidationError::MustBePositive {
            field: "quantity".into(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(err.message, "quantity must be positive");
    }

    #[test]
    fn test_serializes_screaming_code() {
        let json = serde_json::to_string(&ApiError::payment_declined("nope")).unwrap();
        assert_eq!(json, r#"{"code":"PAYMENT_DECLINED","message":"nope"}"#);
    }
}
