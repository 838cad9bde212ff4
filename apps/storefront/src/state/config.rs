//! # Configuration State
//!
//! Read-only after startup, so no mutex. Pricing rules the commands share
//! (tax, shipping, promo codes, currency display) live here.

use std::ops::Deref;
use std::sync::Arc;

use verdant_core::{Money, TaxRate};

use crate::config::StorefrontConfig;

#[derive(Debug, Clone, Default)]
pub struct ConfigState {
    config: Arc<StorefrontConfig>,
}

impl ConfigState {
    pub fn new(config: StorefrontConfig) -> Self {
        ConfigState {
            config: Arc::new(config),
        }
    }

    pub fn tax_rate(&self) -> TaxRate {
        TaxRate::from_bps(self.config.checkout.tax_rate_bps)
    }

    /// Shipping for a given subtotal: the flat rate, unless a free
    /// shipping threshold is configured and reached.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        match self.config.checkout.free_shipping_threshold_cents {
            Some(threshold) if subtotal.cents() >= threshold => Money::zero(),
            _ => Money::from_cents(self.config.checkout.flat_shipping_cents),
        }
    }

    /// Whether `code` is the configured promo code, ignoring case and
    /// surrounding whitespace.
    pub fn is_valid_promo(&self, code: &str) -> bool {
        let code = code.trim();
        !code.is_empty() && code.eq_ignore_ascii_case(self.config.checkout.promo_code.trim())
    }

    /// Savings a valid promo code takes off `subtotal`.
    pub fn promo_discount(&self, subtotal: Money) -> Money {
        subtotal.basis_points(self.config.checkout.promo_discount_bps)
    }

    /// Formats cents with the configured currency symbol.
    ///
    /// ```rust
    /// use verdant_storefront::state::ConfigState;
    ///
    /// let config = ConfigState::default();
    /// assert_eq!(config.format_currency(123456), "$1234.56");
    /// assert_eq!(config.format_currency(-599), "-$5.99");
    /// ```
    pub fn format_currency(&self, cents: i64) -> String {
        let sign = if cents < 0 { "-" } else { "" };
        let abs = cents.unsigned_abs();
        format!(
            "{}{}{}.{:02}",
            sign,
            self.config.store.currency_symbol,
            abs / 100,
            abs % 100
        )
    }
}

impl Deref for ConfigState {
    type Target = StorefrontConfig;

    fn deref(&self) -> &StorefrontConfig {
        &self.config
    }
}
