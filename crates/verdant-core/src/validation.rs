//! # Validation Module
//!
//! Input validation utilities for the Verdant storefront.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Presentation                                                 │
//! │  ├── Quantity steppers, required form fields                           │
//! │  └── Immediate user feedback                                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: Storefront command                                           │
//! │  └── THIS MODULE: quantity, checkout form, admin edits                 │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Cart reducer                                                 │
//! │  └── Accepts whatever it is given (no validation by contract)          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use verdant_core::validation::{validate_email, validate_quantity};
//!
//! assert!(validate_quantity(3).is_ok());
//! assert!(validate_quantity(0).is_err());
//! assert!(validate_email("ivy@example.com").is_ok());
//! ```

use crate::error::ValidationError;
use crate::types::ShippingAddress;
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Fails with `Required` when `value` is blank.
pub fn validate_required(field: &str, value: &str) -> ValidationResult<()> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required {
            field: field.to_string(),
        });
    }
    Ok(())
}

/// Validates a product name: non-empty, at most 120 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    validate_required("name", name)?;

    if name.trim().chars().count() > 120 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 120,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// Empty is allowed (shows everything). Returns the trimmed query.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > 100 {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: 100,
        });
    }

    Ok(query.to_string())
}

/// Validates an email address.
///
/// Deliberately shallow: one `@`, a non-empty local part, and a domain
/// containing a dot that neither starts nor ends the domain.
pub fn validate_email(email: &str) -> ValidationResult<()> {
    validate_required("email", email)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "email".to_string(),
        reason: reason.to_string(),
    };

    let email = email.trim();
    if email.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain spaces"));
    }

    let (local, domain) = email
        .split_once('@')
        .ok_or_else(|| invalid("missing @"))?;

    if local.is_empty() || domain.contains('@') {
        return Err(invalid("must look like name@example.com"));
    }

    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(invalid("domain must contain a dot"));
    }

    Ok(())
}

/// Validates a postal code: 3-10 letters, digits, spaces or hyphens.
pub fn validate_postal_code(code: &str) -> ValidationResult<()> {
    validate_required("postal code", code)?;

    let code = code.trim();
    let len = code.chars().count();
    if !(3..=10).contains(&len)
        || !code
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == ' ' || c == '-')
    {
        return Err(ValidationError::InvalidFormat {
            field: "postal code".to_string(),
            reason: "must be 3-10 letters or digits".to_string(),
        });
    }

    Ok(())
}

/// Validates every field of a shipping address.
pub fn validate_shipping_address(address: &ShippingAddress) -> ValidationResult<()> {
    validate_required("full name", &address.full_name)?;
    validate_email(&address.email)?;
    validate_required("street", &address.street)?;
    validate_required("city", &address.city)?;
    validate_required("state", &address.state)?;
    validate_postal_code(&address.postal_code)?;
    validate_required("country", &address.country)?;
    Ok(())
}

// =============================================================================
// Payment Form Validators
// =============================================================================

/// Validates a card number: 13-19 digits (spaces and hyphens ignored)
/// passing the Luhn checksum.
///
/// ```rust
/// use verdant_core::validation::validate_card_number;
///
/// assert!(validate_card_number("4242 4242 4242 4242").is_ok());
/// assert!(validate_card_number("4242 4242 4242 4241").is_err());
/// ```
pub fn validate_card_number(number: &str) -> ValidationResult<()> {
    validate_required("card number", number)?;

    let invalid = |reason: &str| ValidationError::InvalidFormat {
        field: "card number".to_string(),
        reason: reason.to_string(),
    };

    let mut digits = Vec::with_capacity(19);
    for c in number.chars().filter(|c| *c != ' ' && *c != '-') {
        let d = c.to_digit(10).ok_or_else(|| invalid("must contain only digits"))?;
        digits.push(d);
    }

    if !(13..=19).contains(&digits.len()) {
        return Err(invalid("must be 13-19 digits"));
    }

    let checksum: u32 = digits
        .iter()
        .rev()
        .enumerate()
        .map(|(i, &d)| {
            if i % 2 == 1 {
                let doubled = d * 2;
                if doubled > 9 {
                    doubled - 9
                } else {
                    doubled
                }
            } else {
                d
            }
        })
        .sum();

    if checksum % 10 != 0 {
        return Err(invalid("checksum failed"));
    }

    Ok(())
}

/// Validates an `MM/YY` expiry. Does not compare against today's date;
/// that belongs to whoever holds a clock.
pub fn validate_expiry(expiry: &str) -> ValidationResult<(u32, u32)> {
    validate_required("expiry", expiry)?;

    let invalid = || ValidationError::InvalidFormat {
        field: "expiry".to_string(),
        reason: "must be MM/YY".to_string(),
    };

    let (mm, yy) = expiry.trim().split_once('/').ok_or_else(invalid)?;
    if mm.len() != 2 || yy.len() != 2 {
        return Err(invalid());
    }

    let month: u32 = mm.parse().map_err(|_| invalid())?;
    let year: u32 = yy.parse().map_err(|_| invalid())?;

    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "expiry month".to_string(),
            min: 1,
            max: 12,
        });
    }

    Ok((month, year))
}

/// Validates a card security code: 3 or 4 digits.
pub fn validate_cvv(cvv: &str) -> ValidationResult<()> {
    let cvv = cvv.trim();
    if !(3..=4).contains(&cvv.len()) || !cvv.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "cvv".to_string(),
            reason: "must be 3 or 4 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity the shopper typed.
///
/// ## Rules
/// - Must be positive (> 0)
/// - Must not exceed [`MAX_ITEM_QUANTITY`]
///
/// The cart reducer does not call this; the add/update commands do.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in cents. Zero is allowed.
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

/// Validates an admin stock edit and narrows it to the catalog's type.
pub fn validate_stock(stock: i64) -> ValidationResult<u32> {
    u32::try_from(stock).map_err(|_| ValidationError::OutOfRange {
        field: "stock".to_string(),
        min: 0,
        max: i64::from(u32::MAX),
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
