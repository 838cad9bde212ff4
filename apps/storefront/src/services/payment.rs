//! # Payment Processing
//!
//! The simulated processor sleeps for the configured delay and then
//! declines with probability `failure_rate`. It never inspects the card
//! beyond what validation already did.

use std::time::Duration;

use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use verdant_core::Money;

use crate::config::CheckoutSettings;

/// Card details from the checkout form.
#[derive(Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDetails {
    pub cardholder_name: String,
    pub card_number: String,
    /// `MM/YY`
    pub expiry: String,
    pub cvv: String,
}

impl PaymentDetails {
    /// Last four digits, for logs and receipts.
    pub fn last_four(&self) -> String {
        let digits: Vec<char> = self
            .card_number
            .chars()
            .filter(char::is_ascii_digit)
            .collect();
        digits[digits.len().saturating_sub(4)..].iter().collect()
    }
}

// Card data never reaches the logs.
impl std::fmt::Debug for PaymentDetails {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaymentDetails")
            .field("cardholder_name", &self.cardholder_name)
            .field("card_number", &format_args!("**** {}", self.last_four()))
            .finish_non_exhaustive()
    }
}

/// What the processor decided.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum PaymentOutcome {
    Approved { transaction_id: String },
    Declined { reason: String },
}

impl PaymentOutcome {
    pub fn is_approved(&self) -> bool {
        matches!(self, PaymentOutcome::Approved { .. })
    }
}

/// Charges a customer for an order.
#[async_trait]
pub trait OrderProcessor: Send + Sync {
    async fn process(&self, payment: &PaymentDetails, amount: Money) -> PaymentOutcome;
}

const DECLINE_REASONS: &[&str] = &[
    "Card declined by issuer",
    "Insufficient funds",
    "Payment gateway timed out",
];

/// Randomized processor standing in for a payment backend.
#[derive(Debug, Clone)]
pub struct SimulatedProcessor {
    delay: Duration,
    failure_rate: f64,
}

impl SimulatedProcessor {
    /// `failure_rate` is clamped to 0.0-1.0.
    pub fn new(delay: Duration, failure_rate: f64) -> Self {
        let failure_rate = if failure_rate.is_nan() {
            0.0
        } else {
            failure_rate.clamp(0.0, 1.0)
        };
        SimulatedProcessor {
            delay,
            failure_rate,
        }
    }

    pub fn from_config(settings: &CheckoutSettings) -> Self {
        SimulatedProcessor::new(settings.processing_delay(), settings.failure_rate)
    }

    pub fn failure_rate(&self) -> f64 {
        self.failure_rate
    }

    fn draw(&self) -> PaymentOutcome {
        let mut rng = rand::rng();
        if rng.random_bool(self.failure_rate) {
            let reason = DECLINE_REASONS[rng.random_range(0..DECLINE_REASONS.len())];
            PaymentOutcome::Declined {
                reason: reason.to_string(),
            }
        } else {
            PaymentOutcome::Approved {
                transaction_id: format!("txn_{:016x}", rng.random::<u64>()),
            }
        }
    }
}

#[async_trait]
impl OrderProcessor for SimulatedProcessor {
    async fn process(&self, payment: &PaymentDetails, amount: Money) -> PaymentOutcome {
        debug!(amount = %amount, card = %payment.last_four(), "Processing payment");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        let outcome = self.draw();
        if let PaymentOutcome::Declined { reason } = &outcome {
            warn!(amount = %amount, reason = %reason, "Simulated payment declined");
        }
        outcome
    }
}
