//! # Domain Types
//!
//! Core domain types used throughout the Verdant storefront.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │      Order      │   │  UserProfile    │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id             │   │  id (UUID)      │   │  id             │       │
//! │  │  name           │   │  order_number   │   │  name, email    │       │
//! │  │  price (Money)  │   │  items          │   │  address        │       │
//! │  │  category       │   │  status         │   │  is_admin       │       │
//! │  │  care_level     │   │  tracking_no.   │   └─────────────────┘       │
//! │  │  in_stock       │   └─────────────────┘                             │
//! │  └─────────────────┘                                                   │
//! │                                                                         │
//! │  Plant attributes: Category, CareLevel, LightLevel, WaterNeeds,        │
//! │                    Humidity (small ordinal enums)                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Products are immutable reference data as far as the cart is concerned;
//! only the admin screens edit them, and those edits live in the catalog.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ts_rs::TS;

use crate::error::ValidationError;
use crate::money::Money;

// =============================================================================
// Attribute Enums
// =============================================================================

/// Declares a small string-backed enum with `as_str`, `all`, `Display`
/// and case-insensitive `FromStr`.
macro_rules! string_enum {
    (
        $(#[$meta:meta])*
        $name:ident, $field:literal {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
        #[serde(rename_all = "snake_case")]
        #[ts(export)]
        pub enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Canonical lowercase name.
            pub const fn as_str(&self) -> &'static str {
                match self {
                    $( $name::$variant => $text ),+
                }
            }

            /// Every variant, in ordinal order.
            pub const fn all() -> &'static [$name] {
                &[ $( $name::$variant ),+ ]
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ValidationError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let needle = s.trim().to_ascii_lowercase();
                $name::all()
                    .iter()
                    .copied()
                    .find(|v| v.as_str() == needle)
                    .ok_or_else(|| ValidationError::NotAllowed {
                        field: $field.to_string(),
                        allowed: $name::all().iter().map(|v| v.as_str().to_string()).collect(),
                    })
            }
        }
    };
}

string_enum! {
    /// Shop category a plant is listed under.
    Category, "category" {
        Houseplant => "houseplant",
        Succulent => "succulent",
        Outdoor => "outdoor",
        Flowering => "flowering",
    }
}

string_enum! {
    /// How much attention a plant needs.
    CareLevel, "care level" {
        Easy => "easy",
        Medium => "medium",
        Hard => "hard",
    }
}

string_enum! {
    /// Light requirement.
    LightLevel, "light" {
        Low => "low",
        Medium => "medium",
        Bright => "bright",
    }
}

string_enum! {
    /// Watering requirement.
    WaterNeeds, "water" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

string_enum! {
    /// Humidity requirement.
    Humidity, "humidity" {
        Low => "low",
        Medium => "medium",
        High => "high",
    }
}

// =============================================================================
// Product
// =============================================================================

/// A plant listed in the shop.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Product {
    /// Catalog identifier (stable slug, e.g. "monstera-deliciosa").
    pub id: String,

    /// Display name.
    pub name: String,

    /// Botanical name shown under the title.
    pub scientific_name: String,

    /// Unit price.
    pub price: Money,

    pub description: String,

    /// Image reference (path or URL; never fetched by this crate).
    pub image: String,

    pub category: Category,
    pub care_level: CareLevel,
    pub light: LightLevel,
    pub water: WaterNeeds,
    pub humidity: Humidity,

    /// Safe around cats and dogs.
    pub pet_friendly: bool,

    /// Units available. Not enforced by the cart.
    pub in_stock: u32,

    /// Shown on the home page.
    pub featured: bool,
}

impl Product {
    /// Returns the unit price.
    #[inline]
    pub fn price(&self) -> Money {
        self.price
    }

    #[inline]
    pub fn is_in_stock(&self) -> bool {
        self.in_stock > 0
    }

    /// True when stock is below `threshold` (including sold out).
    #[inline]
    pub fn is_low_stock(&self, threshold: u32) -> bool {
        self.in_stock < threshold
    }
}

// =============================================================================
// Order Status
// =============================================================================

string_enum! {
    /// Lifecycle of a placed order.
    ///
    /// ```text
    ///  Pending ──► Processing ──► Shipped ──► Delivered
    ///     │            │
    ///     └────────────┴──► Cancelled
    /// ```
    OrderStatus, "status" {
        Pending => "pending",
        Processing => "processing",
        Shipped => "shipped",
        Delivered => "delivered",
        Cancelled => "cancelled",
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl OrderStatus {
    /// Delivered and cancelled orders never change again.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, OrderStatus::Delivered | OrderStatus::Cancelled)
    }

    /// Whether an admin may move an order from `self` to `next`.
    ///
    /// Forward-only along the fulfilment path, one or more steps at a time.
    /// Cancellation only before the parcel leaves the warehouse.
    pub fn can_transition_to(&self, next: OrderStatus) -> bool {
        if self.is_terminal() || *self == next {
            return false;
        }
        match next {
            OrderStatus::Cancelled => {
                matches!(self, OrderStatus::Pending | OrderStatus::Processing)
            }
            OrderStatus::Pending => false,
            _ => next > *self,
        }
    }
}

// =============================================================================
// Orders
// =============================================================================

/// A line of a placed order. Frozen copy of the product at checkout time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct OrderItem {
    pub product_id: String,
    /// Product name at time of purchase.
    pub name: String,
    /// Unit price at time of purchase.
    pub unit_price: Money,
    pub quantity: i64,
}

impl OrderItem {
    #[inline]
    pub fn line_total(&self) -> Money {
        self.unit_price.multiply_quantity(self.quantity)
    }
}

/// Where an order ships to.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct ShippingAddress {
    pub full_name: String,
    pub email: String,
    pub street: String,
    pub city: String,
    pub state: String,
    pub postal_code: String,
    pub country: String,
}

/// A placed order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct Order {
    /// Internal identifier (UUID v4).
    pub id: String,

    /// Customer-facing number, e.g. "VRD-241016-0042".
    pub order_number: String,

    pub user_id: String,
    pub items: Vec<OrderItem>,
    pub subtotal: Money,
    pub shipping: Money,
    pub tax: Money,

    /// Promo code savings; `total` already has it taken off.
    #[serde(default)]
    pub discount: Money,

    pub total: Money,
    pub status: OrderStatus,
    pub shipping_address: ShippingAddress,

    /// Carrier tracking number, assigned at placement.
    pub tracking_number: Option<String>,

    #[ts(as = "String")]
    pub placed_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Total units across all items.
    pub fn item_count(&self) -> i64 {
        self.items
            .iter()
            .fold(0i64, |count, i| count.saturating_add(i.quantity))
    }

    /// Orders that count toward revenue.
    pub fn is_billable(&self) -> bool {
        self.status != OrderStatus::Cancelled
    }
}

/// One stage of a shipment timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct TrackingEvent {
    pub status: OrderStatus,
    pub location: String,
    pub description: String,

    /// When the stage was reached; `None` for stages still ahead.
    #[ts(as = "Option<String>")]
    pub timestamp: Option<DateTime<Utc>>,

    pub completed: bool,
}

// =============================================================================
// User Profile
// =============================================================================

/// The shopper's account details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[serde(rename_all = "camelCase")]
#[ts(export)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<ShippingAddress>,

    #[ts(as = "String")]
    pub member_since: DateTime<Utc>,

    /// Grants access to the admin dashboard.
    pub is_admin: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_enum_parsing_is_case_insensitive() {
        assert_eq!("Succulent".parse::<Category>().unwrap(), Category::Succulent);
        assert_eq!(" EASY ".parse::<CareLevel>().unwrap(), CareLevel::Easy);
        assert_eq!("bright".parse::<LightLevel>().unwrap(), LightLevel::Bright);
        assert!("tree".parse::<Category>().is_err());
    }

    #[test]
    fn test_enum_parse_error_lists_allowed_values() {
        let err = "soggy".parse::<WaterNeeds>().unwrap_err();
        assert_eq!(
            err.to_string(),
            r#"water must be one of: ["low", "medium", "high"]"#
        );
    }

    #[test]
    fn test_enum_display_round_trips_through_all() {
        for c in Category::all() {
            assert_eq!(c.to_string().parse::<Category>().unwrap(), *c);
        }
        assert_eq!(Humidity::all().len(), 3);
    }

    #[test]
    fn test_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Category::Houseplant).unwrap();
        assert_eq!(json, "\"houseplant\"");
        let water: WaterNeeds = serde_json::from_str("\"medium\"").unwrap();
        assert_eq!(water, WaterNeeds::Medium);
        assert!(serde_json::from_str::<WaterNeeds>("\"moderate\"").is_err());
        let status: OrderStatus = serde_json::from_str("\"shipped\"").unwrap();
        assert_eq!(status, OrderStatus::Shipped);
    }

    #[test]
    fn test_order_status_transitions() {
        use OrderStatus::*;

        assert!(Pending.can_transition_to(Processing));
        assert!(Pending.can_transition_to(Shipped));
        assert!(Processing.can_transition_to(Cancelled));
        assert!(Shipped.can_transition_to(Delivered));

        assert!(!Shipped.can_transition_to(Cancelled));
        assert!(!Processing.can_transition_to(Pending));
        assert!(!Delivered.can_transition_to(Shipped));
        assert!(!Cancelled.can_transition_to(Processing));
        assert!(!Pending.can_transition_to(Pending));
    }

    #[test]
    fn test_order_status_default() {
        assert_eq!(OrderStatus::default(), OrderStatus::Pending);
        assert!(OrderStatus::Delivered.is_terminal());
        assert!(!OrderStatus::Shipped.is_terminal());
    }

    #[test]
    fn test_low_stock_is_strictly_below_threshold() {
        let mut product = Product {
            id: "p".into(),
            name: "Pothos".into(),
            scientific_name: String::new(),
            price: Money::from_cents(1299),
            description: String::new(),
            image: String::new(),
            category: Category::Houseplant,
            care_level: CareLevel::Easy,
            light: LightLevel::Medium,
            water: WaterNeeds::Medium,
            humidity: Humidity::Medium,
            pet_friendly: true,
            in_stock: 5,
            featured: false,
        };
        assert!(!product.is_low_stock(5));

        product.in_stock = 4;
        assert!(product.is_low_stock(5));

        product.in_stock = 0;
        assert!(product.is_low_stock(5));
        assert!(!product.is_low_stock(0));
    }

    #[test]
    fn test_order_item_line_total() {
        let item = OrderItem {
            product_id: "p".into(),
            name: "Pothos".into(),
            unit_price: Money::from_cents(1299),
            quantity: 3,
        };
        assert_eq!(item.line_total().cents(), 3897);
    }
}
