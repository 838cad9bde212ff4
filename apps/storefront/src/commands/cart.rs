//! # Cart Commands
//!
//! Validation sits here, in front of the cart reducer. The reducer itself
//! accepts any input; these commands reject what a shopper should never be
//! able to submit.
//!
//! ## Cart Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Cart Lifecycle                                       │
//! │                                                                         │
//! │  ┌──────────┐     ┌──────────┐     ┌──────────┐     ┌──────────┐       │
//! │  │  Empty   │────►│ In Cart  │────►│ Checkout │────►│  Order   │       │
//! │  │  Cart    │     │          │     │   Form   │     │  Placed  │       │
//! │  └──────────┘     └──────────┘     └──────────┘     └──────────┘       │
//! │       ▲                │                 │                │             │
//! │       │           add_to_cart       place_order           │             │
//! │       │           update_cart_item  (checkout.rs)         │             │
//! │       │           remove_from_cart                        │             │
//! │       │                │                                  │             │
//! │       └──── clear_cart ┘◄──────── cart cleared ───────────┘             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use verdant_core::validation::validate_quantity;
use verdant_core::{Cart, CartAction, CartLine, ValidationError, MAX_ITEM_QUANTITY};

use crate::error::ApiError;
use crate::state::{CartState, CartTotals, CatalogState};

/// A line asking for more units than the catalog reports. Informational
/// only: the cart never refuses a quantity because of stock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockWarning {
    pub product_id: String,
    pub name: String,
    pub requested: i64,
    pub available: u32,
}

/// Cart response including lines, totals and stock warnings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartResponse {
    pub lines: Vec<CartLine>,
    pub totals: CartTotals,
    pub stock_warnings: Vec<StockWarning>,
}

impl From<&Cart> for CartResponse {
    fn from(cart: &Cart) -> Self {
        let stock_warnings = cart
            .over_stock_lines()
            .map(|line| StockWarning {
                product_id: line.product.id.clone(),
                name: line.product.name.clone(),
                requested: line.quantity,
                available: line.product.in_stock,
            })
            .collect();

        CartResponse {
            lines: cart.lines().to_vec(),
            totals: CartTotals::from(cart),
            stock_warnings,
        }
    }
}

/// Gets the current cart contents.
pub fn get_cart(cart: &CartState) -> CartResponse {
    debug!("get_cart command");
    cart.with_cart(|c| CartResponse::from(c))
}

/// Adds a product to the cart.
///
/// ## Behavior
/// - If product already in cart: quantity increases
/// - If product not in cart: appended as a new line
/// - The line keeps the product as it was when added
///
/// ## Arguments
/// * `product_id` - Catalog id to add
/// * `quantity` - Quantity to add (default: 1)
///
/// ## Errors
/// * `VALIDATION_ERROR` - quantity outside 1-99, or the line would pass 99
/// * `NOT_FOUND` - unknown product
pub fn add_to_cart(
    catalog: &CatalogState,
    cart: &CartState,
    product_id: &str,
    quantity: Option<i64>,
) -> Result<CartResponse, ApiError> {
    let quantity = quantity.unwrap_or(1);
    debug!(product_id = %product_id, quantity = %quantity, "add_to_cart command");

    validate_quantity(quantity)?;

    let product = catalog
        .inner()
        .products()
        .get_by_id(product_id)?
        .ok_or_else(|| ApiError::not_found("Product", product_id))?;

    cart.with_cart_mut(|c| {
        let existing = c.line(product_id).map_or(0, |line| line.quantity);
        if existing + quantity > MAX_ITEM_QUANTITY {
            return Err(ApiError::from(ValidationError::OutOfRange {
                field: "quantity".to_string(),
                min: 1,
                max: MAX_ITEM_QUANTITY,
            }));
        }

        c.apply(CartAction::Add { product, quantity });
        info!(product_id = %product_id, quantity = existing + quantity, "Cart line added");
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Updates the quantity of a line.
///
/// ## Behavior
/// - Quantity 0 or below: removes the line
/// - Quantity above 99: validation error
pub fn update_cart_item(
    cart: &CartState,
    product_id: &str,
    quantity: i64,
) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, quantity = %quantity, "update_cart_item command");

    if quantity > 0 {
        validate_quantity(quantity)?;
    }

    cart.with_cart_mut(|c| {
        require_line(c, product_id)?;
        c.apply(CartAction::SetQuantity {
            product_id: product_id.to_string(),
            quantity,
        });
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Removes a line from the cart.
pub fn remove_from_cart(cart: &CartState, product_id: &str) -> Result<CartResponse, ApiError> {
    debug!(product_id = %product_id, "remove_from_cart command");

    cart.with_cart_mut(|c| {
        require_line(c, product_id)?;
        c.apply(CartAction::Remove {
            product_id: product_id.to_string(),
        });
        info!(product_id = %product_id, "Cart line removed");
        Ok::<CartResponse, ApiError>(CartResponse::from(&*c))
    })
}

/// Empties the cart.
pub fn clear_cart(cart: &CartState) -> CartResponse {
    debug!("clear_cart command");
    cart.with_cart_mut(|c| {
        c.apply(CartAction::Clear);
        CartResponse::from(&*c)
    })
}

fn require_line(cart: &Cart, product_id: &str) -> Result<(), ApiError> {
    match cart.line(product_id) {
        Some(_) => Ok(()),
        None => Err(ApiError::cart(format!("{} is not in the cart", product_id))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;

    fn setup() -> (CatalogState, CartState) {
        (CatalogState::default(), CartState::new())
    }

    #[test]
    fn test_add_accumulates_and_keeps_order() {
        let (catalog, cart) = setup();

        add_to_cart(&catalog, &cart, "boston-fern", None).unwrap();
        add_to_cart(&catalog, &cart, "aloe-vera", Some(2)).unwrap();
        let response = add_to_cart(&catalog, &cart, "boston-fern", Some(3)).unwrap();

        let ids: Vec<&str> = response.lines.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec!["boston-fern", "aloe-vera"]);
        assert_eq!(response.lines[0].quantity, 4);
        assert_eq!(response.totals.item_count, 6);
        assert_eq!(response.totals.line_count, 2);
        assert_eq!(response.totals.total_cents, 4 * 2499 + 2 * 1599);
    }

    #[test]
    fn test_get_cart_reports_lines_and_warnings() {
        let (catalog, cart) = setup();
        assert!(get_cart(&cart).lines.is_empty());

        add_to_cart(&catalog, &cart, "calathea-orbifolia", Some(4)).unwrap();
        let response = get_cart(&cart);
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.totals.item_count, 4);
        assert_eq!(response.stock_warnings.len(), 1);
        assert_eq!(response.stock_warnings[0].available, 3);
    }

    #[test]
    fn test_add_rejects_bad_quantity_without_touching_cart() {
        let (catalog, cart) = setup();

        for bad in [0, -3, 100] {
            let err = add_to_cart(&catalog, &cart, "lavender", Some(bad)).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }
        assert!(cart.is_empty());
    }

    #[test]
    fn test_add_caps_combined_quantity() {
        let (catalog, cart) = setup();
        add_to_cart(&catalog, &cart, "lavender", Some(98)).unwrap();

        let err = add_to_cart(&catalog, &cart, "lavender", Some(2)).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&cart).totals.item_count, 98);
    }

    #[test]
    fn test_add_unknown_product() {
        let (catalog, cart) = setup();
        let err = add_to_cart(&catalog, &cart, "plastic-palm", None).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_stock_warning_is_informational() {
        let (catalog, cart) = setup();

        // string-of-pearls is sold out
        let response = add_to_cart(&catalog, &cart, "string-of-pearls", Some(2)).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(
            response.stock_warnings,
            vec![StockWarning {
                product_id: "string-of-pearls".into(),
                name: response.lines[0].product.name.clone(),
                requested: 2,
                available: 0,
            }]
        );
    }

    #[test]
    fn test_update_to_zero_removes_line() {
        let (catalog, cart) = setup();
        add_to_cart(&catalog, &cart, "boston-fern", Some(2)).unwrap();
        add_to_cart(&catalog, &cart, "aloe-vera", None).unwrap();

        let response = update_cart_item(&cart, "boston-fern", 5).unwrap();
        assert_eq!(response.lines[0].quantity, 5);

        let response = update_cart_item(&cart, "boston-fern", 0).unwrap();
        assert_eq!(response.lines.len(), 1);
        assert_eq!(response.lines[0].product.id, "aloe-vera");
    }

    #[test]
    fn test_update_and_remove_require_line() {
        let (_, cart) = setup();

        let err = update_cart_item(&cart, "boston-fern", 2).unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);

        let err = remove_from_cart(&cart, "boston-fern").unwrap_err();
        assert_eq!(err.code, ErrorCode::CartError);
    }

    #[test]
    fn test_update_rejects_over_max() {
        let (catalog, cart) = setup();
        add_to_cart(&catalog, &cart, "boston-fern", None).unwrap();

        let err = update_cart_item(&cart, "boston-fern", 100).unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
        assert_eq!(get_cart(&cart).lines[0].quantity, 1);
    }

    #[test]
    fn test_remove_and_clear() {
        let (catalog, cart) = setup();
        add_to_cart(&catalog, &cart, "boston-fern", None).unwrap();
        add_to_cart(&catalog, &cart, "aloe-vera", None).unwrap();
        add_to_cart(&catalog, &cart, "lavender", None).unwrap();

        let response = remove_from_cart(&cart, "aloe-vera").unwrap();
        let ids: Vec<&str> = response.lines.iter().map(|l| l.product.id.as_str()).collect();
        assert_eq!(ids, vec!["boston-fern", "lavender"]);

        let response = clear_cart(&cart);
        assert!(response.lines.is_empty());
        assert_eq!(response.totals.total_cents, 0);
    }
}
