//! # Storefront Configuration
//!
//! ## Configuration Sources
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Configuration Priority                               │
//! │                                                                         │
//! │  1. Environment Variables (highest priority)                           │
//! │     VERDANT_TAX_RATE_BPS=825                                           │
//! │     VERDANT_FAILURE_RATE=0                                             │
//! │                                                                         │
//! │  2. TOML Config File                                                   │
//! │     --config <path>, else                                              │
//! │     ~/.config/verdant/storefront.toml (Linux)                          │
//! │     ~/Library/Application Support/com.verdant.storefront/... (macOS)   │
//! │                                                                         │
//! │  3. Default Values (lowest priority)                                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Configuration File Format
//! ```toml
//! [store]
//! name = "Verdant"
//! currency_symbol = "$"
//!
//! [checkout]
//! tax_rate_bps = 800                     # 8.00%
//! flat_shipping_cents = 1299
//! # free_shipping_threshold_cents = 5000 # unset: shipping always charged
//! processing_delay_ms = 2000
//! failure_rate = 0.3                     # share of simulated declines
//! promo_code = "PLANT10"
//! promo_discount_bps = 1000              # 10% off the subtotal
//!
//! [tracking]
//! lookup_delay_ms = 1500
//!
//! [admin]
//! low_stock_threshold = 5
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Config file name inside the platform config directory.
pub const CONFIG_FILE_NAME: &str = "storefront.toml";

// =============================================================================
// Errors
// =============================================================================

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Sections
// =============================================================================

/// `[store]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_name")]
    pub name: String,

    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
}

fn default_store_name() -> String {
    "Verdant".to_string()
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

impl Default for StoreSettings {
    fn default() -> Self {
        StoreSettings {
            name: default_store_name(),
            currency_symbol: default_currency_symbol(),
        }
    }
}

/// `[checkout]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckoutSettings {
    /// Sales tax on the subtotal, in basis points.
    #[serde(default = "default_tax_rate_bps")]
    pub tax_rate_bps: u32,

    /// Subtotal at or above which shipping is free. Unset means every
    /// order pays the flat rate.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub free_shipping_threshold_cents: Option<i64>,

    /// Shipping charged per order.
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping_cents: i64,

    /// Simulated payment processing time.
    #[serde(default = "default_processing_delay")]
    pub processing_delay_ms: u64,

    /// Probability (0.0-1.0) that the simulated processor declines.
    #[serde(default = "default_failure_rate")]
    pub failure_rate: f64,

    /// Code accepted at checkout, matched case-insensitively.
    #[serde(default = "default_promo_code")]
    pub promo_code: String,

    /// Promo savings on the subtotal, in basis points.
    #[serde(default = "default_promo_discount")]
    pub promo_discount_bps: u32,
}

fn default_tax_rate_bps() -> u32 {
    800
}
fn default_flat_shipping() -> i64 {
    1299
}
fn default_processing_delay() -> u64 {
    2000
}
fn default_failure_rate() -> f64 {
    0.3
}
fn default_promo_code() -> String {
    "PLANT10".to_string()
}
fn default_promo_discount() -> u32 {
    1000
}

impl Default for CheckoutSettings {
    fn default() -> Self {
        CheckoutSettings {
            tax_rate_bps: default_tax_rate_bps(),
            free_shipping_threshold_cents: None,
            flat_shipping_cents: default_flat_shipping(),
            processing_delay_ms: default_processing_delay(),
            failure_rate: default_failure_rate(),
            promo_code: default_promo_code(),
            promo_discount_bps: default_promo_discount(),
        }
    }
}

impl CheckoutSettings {
    pub fn processing_delay(&self) -> Duration {
        Duration::from_millis(self.processing_delay_ms)
    }
}

/// `[tracking]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrackingSettings {
    /// Simulated carrier lookup time.
    #[serde(default = "default_lookup_delay")]
    pub lookup_delay_ms: u64,
}

fn default_lookup_delay() -> u64 {
    1500
}

impl Default for TrackingSettings {
    fn default() -> Self {
        TrackingSettings {
            lookup_delay_ms: default_lookup_delay(),
        }
    }
}

impl TrackingSettings {
    pub fn lookup_delay(&self) -> Duration {
        Duration::from_millis(self.lookup_delay_ms)
    }
}

/// `[admin]`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdminSettings {
    /// Products with fewer units than this are flagged on the dashboard.
    #[serde(default = "default_low_stock_threshold")]
    pub low_stock_threshold: u32,
}

fn default_low_stock_threshold() -> u32 {
    5
}

impl Default for AdminSettings {
    fn default() -> Self {
        AdminSettings {
            low_stock_threshold: default_low_stock_threshold(),
        }
    }
}

// =============================================================================
// Main Configuration
// =============================================================================

/// Complete storefront configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub store: StoreSettings,

    #[serde(default)]
    pub checkout: CheckoutSettings,

    #[serde(default)]
    pub tracking: TrackingSettings,

    #[serde(default)]
    pub admin: AdminSettings,
}

impl StorefrontConfig {
    /// Loads configuration from file, environment, and defaults.
    ///
    /// ## Load Order (later overrides earlier)
    /// 1. Default values
    /// 2. Config file (storefront.toml)
    /// 3. Environment variables
    pub fn load(config_path: Option<PathBuf>) -> ConfigResult<Self> {
        let mut config = Self::default();

        if let Some(path) = config_path.or_else(Self::default_config_path) {
            if path.exists() {
                info!(?path, "Loading storefront config from file");
                config = Self::from_file(&path)?;
            } else {
                debug!(?path, "Config file not found, using defaults");
            }
        }

        config.apply_env_overrides();
        config.validate()?;

        Ok(config)
    }

    /// Loads config or returns default if load fails.
    pub fn load_or_default(config_path: Option<PathBuf>) -> Self {
        Self::load(config_path).unwrap_or_else(|e| {
            warn!("Failed to load storefront config: {}. Using defaults.", e);
            Self::default()
        })
    }

    /// Parses a config file without applying environment overrides.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        Ok(toml::from_str(&contents)?)
    }

    /// Validates the configuration.
    pub fn validate(&self) -> ConfigResult<()> {
        let rate = self.checkout.failure_rate;
        if !(0.0..=1.0).contains(&rate) {
            return Err(ConfigError::Invalid(format!(
                "failure_rate must be between 0 and 1, got {rate}"
            )));
        }

        if self.checkout.tax_rate_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "tax_rate_bps must be at most 10000, got {}",
                self.checkout.tax_rate_bps
            )));
        }

        if self.checkout.flat_shipping_cents < 0
            || self.checkout.free_shipping_threshold_cents.is_some_and(|t| t < 0)
        {
            return Err(ConfigError::Invalid(
                "shipping amounts must not be negative".into(),
            ));
        }

        if self.checkout.promo_discount_bps > 10_000 {
            return Err(ConfigError::Invalid(format!(
                "promo_discount_bps must be at most 10000, got {}",
                self.checkout.promo_discount_bps
            )));
        }

        if self.store.currency_symbol.is_empty() {
            return Err(ConfigError::Invalid("currency_symbol must not be empty".into()));
        }

        Ok(())
    }

    /// Applies `VERDANT_*` environment variable overrides. Unparseable
    /// values are logged and ignored.
    fn apply_env_overrides(&mut self) {
        if let Ok(name) = std::env::var("VERDANT_STORE_NAME") {
            self.store.name = name;
        }

        if let Ok(symbol) = std::env::var("VERDANT_CURRENCY_SYMBOL") {
            self.store.currency_symbol = symbol;
        }

        if let Ok(code) = std::env::var("VERDANT_PROMO_CODE") {
            self.checkout.promo_code = code;
        }

        override_parsed("VERDANT_TAX_RATE_BPS", &mut self.checkout.tax_rate_bps);
        if let Some(threshold) = parse_env("VERDANT_FREE_SHIPPING_THRESHOLD_CENTS") {
            self.checkout.free_shipping_threshold_cents = Some(threshold);
        }
        override_parsed(
            "VERDANT_PROMO_DISCOUNT_BPS",
            &mut self.checkout.promo_discount_bps,
        );
        override_parsed(
            "VERDANT_FLAT_SHIPPING_CENTS",
            &mut self.checkout.flat_shipping_cents,
        );
        override_parsed(
            "VERDANT_PROCESSING_DELAY_MS",
            &mut self.checkout.processing_delay_ms,
        );
        override_parsed("VERDANT_FAILURE_RATE", &mut self.checkout.failure_rate);
        override_parsed(
            "VERDANT_LOOKUP_DELAY_MS",
            &mut self.tracking.lookup_delay_ms,
        );
        override_parsed(
            "VERDANT_LOW_STOCK_THRESHOLD",
            &mut self.admin.low_stock_threshold,
        );
    }

    /// Returns the default config file path.
    pub fn default_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("com", "verdant", "storefront")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE_NAME))
    }

    /// Zero delays and no random declines; for tests and scripted runs.
    pub fn instant() -> Self {
        let mut config = Self::default();
        config.checkout.processing_delay_ms = 0;
        config.checkout.failure_rate = 0.0;
        config.tracking.lookup_delay_ms = 0;
        config
    }
}

fn override_parsed<T>(var: &str, slot: &mut T)
where
    T: std::str::FromStr + std::fmt::Display,
{
    if let Some(value) = parse_env(var) {
        *slot = value;
    }
}

fn parse_env<T>(var: &str) -> Option<T>
where
    T: std::str::FromStr + std::fmt::Display,
{
    let raw = std::env::var(var).ok()?;
    match raw.trim().parse::<T>() {
        Ok(value) => {
            debug!(var = var, value = %value, "Overriding config from environment");
            Some(value)
        }
        Err(_) => {
            warn!(var = var, value = %raw, "Ignoring unparseable environment override");
            None
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
