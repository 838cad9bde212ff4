//! # Checkout Commands
//!
//! Promo codes, the price quote and order placement against the simulated
//! processor.
//!
//! ## Order Placement Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    place_order                                          │
//! │                                                                         │
//! │  1. Validate address, card, promo ─ invalid ─► VALIDATION_ERROR        │
//! │  2. Snapshot cart ──────────────── empty ────► CART_ERROR              │
//! │  3. Quote (subtotal, shipping, tax, discount)                          │
//! │  4. OrderProcessor::process ────── declined ─► PAYMENT_DECLINED        │
//! │         │                                      Router ──► PaymentFailed│
//! │         ▼ approved                             (cart untouched)        │
//! │  5. Create Pending order with a tracking number                        │
//! │  6. Take the snapshot's lines out of the cart                          │
//! │  7. Router ──► OrderConfirmation { order_id }                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use chrono::{Datelike, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use verdant_catalog::OrderDraft;
use verdant_core::validation::{
    validate_card_number, validate_cvv, validate_expiry, validate_required,
    validate_shipping_address,
};
use verdant_core::{
    Cart, CoreError, Money, Navigation, Order, OrderItem, ShippingAddress, ValidationError,
};

use crate::error::ApiError;
use crate::services::{OrderProcessor, PaymentDetails, PaymentOutcome};
use crate::state::{CartState, CatalogState, ConfigState, SessionState};

/// Price breakdown shown on the checkout page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutQuote {
    pub item_count: i64,
    pub subtotal_cents: i64,
    pub shipping_cents: i64,
    pub tax_cents: i64,
    /// Promo savings, zero without a valid code.
    pub discount_cents: i64,
    pub total_cents: i64,
    pub tax_rate_bps: u32,
    /// How much more to spend for free shipping. `None` when no threshold
    /// is configured, zero once qualified.
    pub free_shipping_remaining_cents: Option<i64>,
}

impl CheckoutQuote {
    /// Prices a cart with the configured tax rate, shipping rules and an
    /// optional promo code. Unknown codes give no discount.
    ///
    /// Tax and the discount both apply to the subtotal only, never to
    /// shipping, and tax is taken before the discount.
    pub fn for_cart(cart: &Cart, config: &ConfigState, promo_code: Option<&str>) -> Self {
        let subtotal = cart.total();
        let shipping = config.shipping_for(subtotal);
        let tax_rate = config.tax_rate();
        let tax = subtotal.calculate_tax(tax_rate);
        let discount = match promo_code {
            Some(code) if config.is_valid_promo(code) => config.promo_discount(subtotal),
            _ => Money::zero(),
        };

        CheckoutQuote {
            item_count: cart.item_count(),
            subtotal_cents: subtotal.cents(),
            shipping_cents: shipping.cents(),
            tax_cents: tax.cents(),
            discount_cents: discount.cents(),
            total_cents: (subtotal + shipping + tax - discount).cents(),
            tax_rate_bps: tax_rate.bps(),
            free_shipping_remaining_cents: config
                .checkout
                .free_shipping_threshold_cents
                .map(|threshold| threshold.saturating_sub(subtotal.cents()).max(0)),
        }
    }
}

/// Checkout form submission.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutRequest {
    pub shipping_address: ShippingAddress,
    pub payment: PaymentDetails,
    #[serde(default)]
    pub promo_code: Option<String>,
}

/// Result of a successful checkout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlacedOrder {
    pub order: Order,
    pub transaction_id: String,
    pub navigation: Navigation,
}

/// Applies a promo code to the session and returns it normalized.
///
/// ## Errors
/// * `VALIDATION_ERROR` - the code is not recognized; any earlier code stays
pub fn apply_promo(
    session: &SessionState,
    config: &ConfigState,
    code: &str,
) -> Result<String, ApiError> {
    debug!(code = %code, "apply_promo command");
    if !config.is_valid_promo(code) {
        return Err(ApiError::validation(format!(
            "Promo code '{}' is not valid",
            code.trim()
        )));
    }

    let code = code.trim().to_ascii_uppercase();
    session.with_session_mut(|s| s.promo_code = Some(code.clone()));
    info!(code = %code, "Promo code applied");
    Ok(code)
}

/// Drops the session's promo code, if any.
pub fn remove_promo(session: &SessionState) {
    debug!("remove_promo command");
    session.with_session_mut(|s| s.promo_code = None);
}

/// Prices the current cart with the session's promo code.
pub fn checkout_quote(
    cart: &CartState,
    config: &ConfigState,
    session: &SessionState,
) -> CheckoutQuote {
    debug!("checkout_quote command");
    let promo = session.with_session(|s| s.promo_code.clone());
    cart.with_cart(|c| CheckoutQuote::for_cart(c, config, promo.as_deref()))
}

/// Places an order for the current cart.
///
/// Only the lines in the cart when the order was priced are taken out of
/// it afterwards; anything added while the payment was processing stays.
///
/// ## Errors
/// * `VALIDATION_ERROR` - bad address, card details or promo code, expired card
/// * `CART_ERROR` - the cart is empty
/// * `PAYMENT_DECLINED` - the processor said no; the cart is kept and the
///   router shows the payment failure screen
pub async fn place_order(
    cart: &CartState,
    catalog: &CatalogState,
    config: &ConfigState,
    session: &SessionState,
    processor: &dyn OrderProcessor,
    request: CheckoutRequest,
) -> Result<PlacedOrder, ApiError> {
    debug!(payment = ?request.payment, promo = ?request.promo_code, "place_order command");

    validate_shipping_address(&request.shipping_address)?;
    validate_payment(&request.payment)?;
    if let Some(code) = request.promo_code.as_deref() {
        if !config.is_valid_promo(code) {
            return Err(ApiError::validation(format!(
                "Promo code '{}' is not valid",
                code.trim()
            )));
        }
    }

    // Snapshot so the lock is not held across the processor call.
    let snapshot = cart.with_cart(Cart::clone);
    if snapshot.is_empty() {
        return Err(CoreError::EmptyCart.into());
    }
    let quote = CheckoutQuote::for_cart(&snapshot, config, request.promo_code.as_deref());

    let transaction_id = match processor
        .process(&request.payment, Money::from_cents(quote.total_cents))
        .await
    {
        PaymentOutcome::Approved { transaction_id } => transaction_id,
        PaymentOutcome::Declined { reason } => {
            warn!(total = quote.total_cents, reason = %reason, "Checkout declined");
            session.with_session_mut(|s| s.router.fail_checkout());
            return Err(ApiError::payment_declined(reason));
        }
    };

    let items = snapshot
        .lines()
        .iter()
        .map(|line| OrderItem {
            product_id: line.product.id.clone(),
            name: line.product.name.clone(),
            unit_price: line.product.price(),
            quantity: line.quantity,
        })
        .collect();

    let user_id = catalog.inner().profile().get()?.id;
    let order = catalog.inner().orders().create(OrderDraft {
        user_id,
        items,
        subtotal: Money::from_cents(quote.subtotal_cents),
        shipping: Money::from_cents(quote.shipping_cents),
        tax: Money::from_cents(quote.tax_cents),
        discount: Money::from_cents(quote.discount_cents),
        shipping_address: request.shipping_address,
        tracking_number: Some(tracking_number()),
    })?;

    let left = cart.remove_ordered(&snapshot);

    let navigation = session.with_session_mut(|s| {
        s.last_order_id = Some(order.id.clone());
        s.promo_code = None;
        s.router.complete_checkout(order.id.clone())
    });

    info!(
        order_number = %order.order_number,
        total = %order.total,
        transaction_id = %transaction_id,
        lines_left = left.line_count,
        "Order placed"
    );

    Ok(PlacedOrder {
        order,
        transaction_id,
        navigation,
    })
}

fn validate_payment(payment: &PaymentDetails) -> Result<(), ValidationError> {
    validate_required("cardholder name", &payment.cardholder_name)?;
    validate_card_number(&payment.card_number)?;
    validate_cvv(&payment.cvv)?;

    let (month, year) = validate_expiry(&payment.expiry)?;
    let today = Utc::now();
    let expires = (2000 + year as i32, month);
    if expires < (today.year(), today.month()) {
        return Err(ValidationError::InvalidFormat {
            field: "expiry".to_string(),
            reason: "card has expired".to_string(),
        });
    }

    Ok(())
}

/// Carrier-style tracking number, `1ZVRD` plus ten digits.
fn tracking_number() -> String {
    format!("1ZVRD{:010}", rand::rng().random_range(0..10_000_000_000u64))
}
