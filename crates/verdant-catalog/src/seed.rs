//! # Seed Data
//!
//! The hard-coded records every session starts from.
//!
//! ## Contents
//! - 12 plants across all four categories and three care levels
//! - 4 historical orders for the demo shopper, one per non-pending status
//! - The demo shopper's profile (admin flag on so the dashboard is reachable)
//!
//! Order timestamps are relative to process start so the tracking
//! timelines always look recent.

use chrono::{Duration, Utc};
use verdant_core::{
    CareLevel, Category, Humidity, LightLevel, Money, Order, OrderItem, OrderStatus, Product,
    ShippingAddress, TaxRate, UserProfile, WaterNeeds, DEMO_USER_ID,
};

/// Shipping and tax rules the historical orders were priced with.
const SEED_TAX_RATE: TaxRate = TaxRate::from_bps(800);
const SEED_FLAT_SHIPPING_CENTS: i64 = 1299;

struct PlantSeed {
    id: &'static str,
    name: &'static str,
    scientific_name: &'static str,
    price_cents: i64,
    category: Category,
    care_level: CareLevel,
    light: LightLevel,
    water: WaterNeeds,
    humidity: Humidity,
    pet_friendly: bool,
    in_stock: u32,
    featured: bool,
    description: &'static str,
}

const PLANTS: &[PlantSeed] = &[
    PlantSeed {
        id: "monstera-deliciosa",
        name: "Monstera Deliciosa",
        scientific_name: "Monstera deliciosa",
        price_cents: 4599,
        category: Category::Houseplant,
        care_level: CareLevel::Easy,
        light: LightLevel::Medium,
        water: WaterNeeds::Medium,
        humidity: Humidity::High,
        pet_friendly: false,
        in_stock: 15,
        featured: true,
        description: "The Swiss cheese plant. Big split leaves that fill a corner fast.",
    },
    PlantSeed {
        id: "fiddle-leaf-fig",
        name: "Fiddle Leaf Fig",
        scientific_name: "Ficus lyrata",
        price_cents: 5999,
        category: Category::Houseplant,
        care_level: CareLevel::Hard,
        light: LightLevel::Bright,
        water: WaterNeeds::Medium,
        humidity: Humidity::Medium,
        pet_friendly: false,
        in_stock: 4,
        featured: true,
        description: "Glossy violin-shaped leaves. Hates drafts and being moved.",
    },
    PlantSeed {
        id: "snake-plant",
        name: "Snake Plant",
        scientific_name: "Dracaena trifasciata",
        price_cents: 2999,
        category: Category::Houseplant,
        care_level: CareLevel::Easy,
        light: LightLevel::Low,
        water: WaterNeeds::Low,
        humidity: Humidity::Low,
        pet_friendly: false,
        in_stock: 30,
        featured: true,
        description: "Upright striped leaves that shrug off low light and missed waterings.",
    },
    PlantSeed {
        id: "golden-pothos",
        name: "Golden Pothos",
        scientific_name: "Epipremnum aureum",
        price_cents: 1999,
        category: Category::Houseplant,
        care_level: CareLevel::Easy,
        light: LightLevel::Low,
        water: WaterNeeds::Medium,
        humidity: Humidity::Medium,
        pet_friendly: false,
        in_stock: 42,
        featured: false,
        description: "Trailing heart-shaped leaves splashed with gold.",
    },
    PlantSeed {
        id: "boston-fern",
        name: "Boston Fern",
        scientific_name: "Nephrolepis exaltata",
        price_cents: 2499,
        category: Category::Houseplant,
        care_level: CareLevel::Medium,
        light: LightLevel::Medium,
        water: WaterNeeds::High,
        humidity: Humidity::High,
        pet_friendly: true,
        in_stock: 18,
        featured: false,
        description: "Feathery arching fronds. Loves a steamy bathroom.",
    },
    PlantSeed {
        id: "calathea-orbifolia",
        name: "Calathea Orbifolia",
        scientific_name: "Goeppertia orbifolia",
        price_cents: 3899,
        category: Category::Houseplant,
        care_level: CareLevel::Hard,
        light: LightLevel::Medium,
        water: WaterNeeds::High,
        humidity: Humidity::High,
        pet_friendly: true,
        in_stock: 3,
        featured: false,
        description: "Broad silver-striped leaves that fold up at night.",
    },
    PlantSeed {
        id: "echeveria-elegans",
        name: "Mexican Snowball",
        scientific_name: "Echeveria elegans",
        price_cents: 1299,
        category: Category::Succulent,
        care_level: CareLevel::Easy,
        light: LightLevel::Bright,
        water: WaterNeeds::Low,
        humidity: Humidity::Low,
        pet_friendly: true,
        in_stock: 25,
        featured: false,
        description: "Tight pale-blue rosettes for a sunny windowsill.",
    },
    PlantSeed {
        id: "string-of-pearls",
        name: "String of Pearls",
        scientific_name: "Curio rowleyanus",
        price_cents: 2199,
        category: Category::Succulent,
        care_level: CareLevel::Medium,
        light: LightLevel::Bright,
        water: WaterNeeds::Low,
        humidity: Humidity::Low,
        pet_friendly: false,
        in_stock: 0,
        featured: true,
        description: "Cascading strands of bead-like leaves. Best in a hanging pot.",
    },
    PlantSeed {
        id: "aloe-vera",
        name: "Aloe Vera",
        scientific_name: "Aloe barbadensis miller",
        price_cents: 1599,
        category: Category::Succulent,
        care_level: CareLevel::Easy,
        light: LightLevel::Bright,
        water: WaterNeeds::Low,
        humidity: Humidity::Low,
        pet_friendly: false,
        in_stock: 22,
        featured: false,
        description: "Thick serrated leaves full of soothing gel.",
    },
    PlantSeed {
        id: "japanese-maple",
        name: "Japanese Maple",
        scientific_name: "Acer palmatum",
        price_cents: 8999,
        category: Category::Outdoor,
        care_level: CareLevel::Medium,
        light: LightLevel::Medium,
        water: WaterNeeds::Medium,
        humidity: Humidity::Medium,
        pet_friendly: true,
        in_stock: 6,
        featured: true,
        description: "Delicate lobed leaves that blaze red in autumn.",
    },
    PlantSeed {
        id: "lavender",
        name: "English Lavender",
        scientific_name: "Lavandula angustifolia",
        price_cents: 1499,
        category: Category::Outdoor,
        care_level: CareLevel::Easy,
        light: LightLevel::Bright,
        water: WaterNeeds::Low,
        humidity: Humidity::Low,
        pet_friendly: false,
        in_stock: 35,
        featured: false,
        description: "Fragrant purple spikes for borders and pots.",
    },
    PlantSeed {
        id: "phalaenopsis-orchid",
        name: "Moth Orchid",
        scientific_name: "Phalaenopsis amabilis",
        price_cents: 3499,
        category: Category::Flowering,
        care_level: CareLevel::Medium,
        light: LightLevel::Medium,
        water: WaterNeeds::Low,
        humidity: Humidity::High,
        pet_friendly: true,
        in_stock: 9,
        featured: true,
        description: "Long-lasting arching sprays of white blooms.",
    },
];

/// All seed plants, in catalog order.
pub fn products() -> Vec<Product> {
    PLANTS
        .iter()
        .map(|p| Product {
            id: p.id.to_string(),
            name: p.name.to_string(),
            scientific_name: p.scientific_name.to_string(),
            price: Money::from_cents(p.price_cents),
            description: p.description.to_string(),
            image: format!("/images/plants/{}.jpg", p.id),
            category: p.category,
            care_level: p.care_level,
            light: p.light,
            water: p.water,
            humidity: p.humidity,
            pet_friendly: p.pet_friendly,
            in_stock: p.in_stock,
            featured: p.featured,
        })
        .collect()
}

/// The demo shopper's home address.
pub fn demo_address() -> ShippingAddress {
    ShippingAddress {
        full_name: "Alex Rivera".to_string(),
        email: "alex.rivera@example.com".to_string(),
        street: "742 Greenleaf Avenue".to_string(),
        city: "Portland".to_string(),
        state: "OR".to_string(),
        postal_code: "97205".to_string(),
        country: "United States".to_string(),
    }
}

/// The demo shopper.
pub fn profile() -> UserProfile {
    UserProfile {
        id: DEMO_USER_ID.to_string(),
        name: "Alex Rivera".to_string(),
        email: "alex.rivera@example.com".to_string(),
        phone: Some("(503) 555-0142".to_string()),
        address: Some(demo_address()),
        member_since: Utc::now() - Duration::days(420),
        is_admin: true,
    }
}

/// Historical orders for the demo shopper, oldest first.
pub fn orders() -> Vec<Order> {
    let catalog = products();
    let line = |id: &str, quantity: i64| -> OrderItem {
        // ids below are taken from PLANTS, so the lookup always hits
        let product = catalog.iter().find(|p| p.id == id);
        OrderItem {
            product_id: id.to_string(),
            name: product.map(|p| p.name.clone()).unwrap_or_default(),
            unit_price: product.map(|p| p.price).unwrap_or_default(),
            quantity,
        }
    };

    vec![
        historical_order(
            "ord-1001",
            1001,
            60,
            OrderStatus::Delivered,
            Some("1ZVRD0000001001"),
            vec![line("monstera-deliciosa", 1), line("golden-pothos", 2)],
        ),
        historical_order(
            "ord-1002",
            1002,
            21,
            OrderStatus::Cancelled,
            None,
            vec![line("fiddle-leaf-fig", 1)],
        ),
        historical_order(
            "ord-1003",
            1003,
            4,
            OrderStatus::Shipped,
            Some("1ZVRD0000001003"),
            vec![line("echeveria-elegans", 3), line("aloe-vera", 1)],
        ),
        historical_order(
            "ord-1004",
            1004,
            1,
            OrderStatus::Processing,
            Some("1ZVRD0000001004"),
            vec![line("phalaenopsis-orchid", 1), line("boston-fern", 1)],
        ),
    ]
}

fn historical_order(
    id: &str,
    sequence: u32,
    days_ago: i64,
    status: OrderStatus,
    tracking_number: Option<&str>,
    items: Vec<OrderItem>,
) -> Order {
    let placed_at = Utc::now() - Duration::days(days_ago);
    let subtotal: Money = items.iter().map(OrderItem::line_total).sum();
    let shipping = Money::from_cents(SEED_FLAT_SHIPPING_CENTS);
    let tax = subtotal.calculate_tax(SEED_TAX_RATE);

    Order {
        id: id.to_string(),
        order_number: format!("VRD-{}-{:04}", placed_at.format("%y%m%d"), sequence),
        user_id: DEMO_USER_ID.to_string(),
        items,
        subtotal,
        shipping,
        tax,
        discount: Money::zero(),
        total: subtotal + shipping + tax,
        status,
        shipping_address: demo_address(),
        tracking_number: tracking_number.map(str::to_string),
        placed_at,
        updated_at: placed_at + Duration::hours(status_age_hours(status)),
    }
}

fn status_age_hours(status: OrderStatus) -> i64 {
    match status {
        OrderStatus::Pending => 0,
        OrderStatus::Processing | OrderStatus::Cancelled => 6,
        OrderStatus::Shipped => 30,
        OrderStatus::Delivered => 96,
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_seed_products_are_unique_and_cover_categories() {
        let products = products();
        assert_eq!(products.len(), 12);

        let ids: HashSet<_> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());

        for category in Category::all() {
            assert!(products.iter().any(|p| p.category == *category));
        }
        for level in CareLevel::all() {
            assert!(products.iter().any(|p| p.care_level == *level));
        }
    }

    #[test]
    fn test_seed_orders_reference_real_products() {
        let ids: HashSet<_> = products().into_iter().map(|p| p.id).collect();
        for order in orders() {
            assert!(!order.items.is_empty());
            for item in &order.items {
                assert!(ids.contains(&item.product_id), "{}", item.product_id);
                assert!(item.unit_price.is_positive());
            }
            assert_eq!(order.total, order.subtotal + order.shipping + order.tax);
        }
    }

    #[test]
    fn test_seed_order_pricing() {
        let orders = orders();
        // 45.99 + 2 × 19.99 = 85.97, flat 12.99 shipping, 8% tax = 6.88
        let first = &orders[0];
        assert_eq!(first.subtotal.cents(), 8597);
        assert_eq!(first.shipping.cents(), 1299);
        assert_eq!(first.tax.cents(), 688);
        assert!(first.discount.is_zero());
        assert!(first.order_number.starts_with("VRD-"));
        assert!(first.order_number.ends_with("-1001"));
    }

    #[test]
    fn test_demo_profile_is_admin() {
        let profile = profile();
        assert_eq!(profile.id, DEMO_USER_ID);
        assert!(profile.is_admin);
        assert!(profile.address.is_some());
    }
}
