//! # Admin Commands
//!
//! Dashboard numbers, order search and session-scoped catalog edits (add,
//! edit, delete) for the admin view. Every command here first checks the
//! current profile's admin flag.
//!
//! ## Dashboard
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Revenue          Orders         Avg. order       Products             │
//! │  $412.87          5              $103.22          12                   │
//! │  (non-cancelled)  (all)          (revenue ÷ billable orders)           │
//! │                                                                         │
//! │  By status: pending 1 · processing 1 · shipped 1 · delivered 1 · ...   │
//! │  By category: houseplant $230.93 · succulent $61.08 · ...              │
//! │  Low stock: calathea-orbifolia (3) · fiddle-leaf-fig (4) · ...         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use verdant_catalog::{OrderFilter, ProductUpdate};
use verdant_core::validation::{validate_price_cents, validate_product_name, validate_stock};
use verdant_core::{
    CareLevel, Category, Humidity, LightLevel, Money, Order, OrderStatus, Product, WaterNeeds,
};

use crate::error::ApiError;
use crate::state::{CatalogState, ConfigState};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusCount {
    pub status: OrderStatus,
    pub count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRevenue {
    pub category: Category,
    pub revenue_cents: i64,
}

/// Figures for the admin dashboard tab.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    /// Sum of totals over non-cancelled orders.
    pub revenue_cents: i64,
    pub order_count: usize,
    /// Revenue divided by non-cancelled orders, zero when there are none.
    pub average_order_value_cents: i64,
    /// One entry per status, in lifecycle order.
    pub orders_by_status: Vec<StatusCount>,
    pub product_count: usize,
    /// Below the configured threshold, scarcest first.
    pub low_stock: Vec<Product>,
    /// Item revenue (before shipping and tax) per category.
    pub revenue_by_category: Vec<CategoryRevenue>,
}

/// Catalog edit as typed into the products tab. `None` keeps the field.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdminProductUpdate {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price_cents: Option<i64>,
    pub category: Option<Category>,
    pub care_level: Option<CareLevel>,
    pub light: Option<LightLevel>,
    pub water: Option<WaterNeeds>,
    pub humidity: Option<Humidity>,
    pub pet_friendly: Option<bool>,
    pub stock: Option<i64>,
    pub featured: Option<bool>,
}

impl AdminProductUpdate {
    fn validate(self) -> Result<ProductUpdate, ApiError> {
        if let Some(name) = &self.name {
            validate_product_name(name)?;
        }
        let price = match self.price_cents {
            Some(cents) => {
                validate_price_cents(cents)?;
                Some(Money::from_cents(cents))
            }
            None => None,
        };
        let stock = self.stock.map(validate_stock).transpose()?;

        Ok(ProductUpdate {
            name: self.name.map(|n| n.trim().to_string()),
            scientific_name: self.scientific_name,
            description: self.description,
            image: self.image,
            price,
            category: self.category,
            care_level: self.care_level,
            light: self.light,
            water: self.water,
            humidity: self.humidity,
            pet_friendly: self.pet_friendly,
            stock,
            featured: self.featured,
        })
    }
}

/// The add-product form. Unset fields start from the form's defaults: a
/// houseplant, easy care, medium light, water and humidity, no stock.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewProduct {
    /// Left blank, the catalog generates one.
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub description: String,
    pub image: String,
    pub price_cents: i64,
    pub category: Category,
    pub care_level: CareLevel,
    pub light: LightLevel,
    pub water: WaterNeeds,
    pub humidity: Humidity,
    pub pet_friendly: bool,
    pub stock: i64,
    pub featured: bool,
}

impl Default for NewProduct {
    fn default() -> Self {
        NewProduct {
            id: String::new(),
            name: String::new(),
            scientific_name: String::new(),
            description: String::new(),
            image: String::new(),
            price_cents: 0,
            category: Category::Houseplant,
            care_level: CareLevel::Easy,
            light: LightLevel::Medium,
            water: WaterNeeds::Medium,
            humidity: Humidity::Medium,
            pet_friendly: false,
            stock: 0,
            featured: false,
        }
    }
}

fn require_admin(catalog: &CatalogState) -> Result<(), ApiError> {
    if catalog.inner().profile().get()?.is_admin {
        Ok(())
    } else {
        Err(ApiError::navigation_denied("Admin access required"))
    }
}

/// Computes the dashboard figures.
pub fn dashboard_stats(
    catalog: &CatalogState,
    config: &ConfigState,
) -> Result<DashboardStats, ApiError> {
    debug!("dashboard_stats command");
    require_admin(catalog)?;

    let orders = catalog.inner().orders().list()?;
    let products = catalog.inner().products().list()?;

    let billable: Vec<&Order> = orders.iter().filter(|o| o.is_billable()).collect();
    let revenue: Money = billable.iter().map(|o| o.total).sum();
    let average = if billable.is_empty() {
        0
    } else {
        revenue.cents() / billable.len() as i64
    };

    let orders_by_status = OrderStatus::all()
        .iter()
        .map(|&status| StatusCount {
            status,
            count: orders.iter().filter(|o| o.status == status).count(),
        })
        .collect();

    let category_of: HashMap<&str, Category> = products
        .iter()
        .map(|p| (p.id.as_str(), p.category))
        .collect();
    let mut by_category: HashMap<Category, Money> = HashMap::new();
    for item in billable.iter().flat_map(|o| &o.items) {
        // Items for products no longer in the catalog are skipped.
        if let Some(&category) = category_of.get(item.product_id.as_str()) {
            *by_category.entry(category).or_default() += item.line_total();
        }
    }
    let revenue_by_category = Category::all()
        .iter()
        .map(|&category| CategoryRevenue {
            category,
            revenue_cents: by_category.get(&category).map_or(0, Money::cents),
        })
        .collect();

    let low_stock = catalog
        .inner()
        .products()
        .low_stock(config.admin.low_stock_threshold)?;

    Ok(DashboardStats {
        revenue_cents: revenue.cents(),
        order_count: orders.len(),
        average_order_value_cents: average,
        orders_by_status,
        product_count: products.len(),
        low_stock,
        revenue_by_category,
    })
}

/// Orders matching the search box and status dropdown, newest first.
pub fn admin_list_orders(
    catalog: &CatalogState,
    filter: &OrderFilter,
) -> Result<Vec<Order>, ApiError> {
    debug!(filter = ?filter, "admin_list_orders command");
    require_admin(catalog)?;
    Ok(catalog.inner().orders().filter(filter)?)
}

/// Edits any product field but the id. Lasts until the process exits.
pub fn admin_update_product(
    catalog: &CatalogState,
    product_id: &str,
    update: AdminProductUpdate,
) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, update = ?update, "admin_update_product command");
    require_admin(catalog)?;

    let update = update.validate()?;
    if update.is_empty() {
        return Err(ApiError::validation("Nothing to update"));
    }

    let product = catalog.inner().products().update(product_id, update)?;
    info!(product_id = %product_id, price = %product.price, stock = product.in_stock, "Product edited");
    Ok(product)
}

/// Adds a plant to the catalog.
///
/// ## Errors
/// * `VALIDATION_ERROR` - blank name, negative price or stock, taken id
pub fn admin_add_product(catalog: &CatalogState, new: NewProduct) -> Result<Product, ApiError> {
    debug!(id = %new.id, name = %new.name, "admin_add_product command");
    require_admin(catalog)?;

    validate_product_name(&new.name)?;
    validate_price_cents(new.price_cents)?;
    let stock = validate_stock(new.stock)?;

    let product = catalog.inner().products().insert(Product {
        id: new.id,
        name: new.name.trim().to_string(),
        scientific_name: new.scientific_name,
        price: Money::from_cents(new.price_cents),
        description: new.description,
        image: new.image,
        category: new.category,
        care_level: new.care_level,
        light: new.light,
        water: new.water,
        humidity: new.humidity,
        pet_friendly: new.pet_friendly,
        in_stock: stock,
        featured: new.featured,
    })?;
    Ok(product)
}

/// Removes a plant from the catalog. Carts that already hold it keep
/// their line.
pub fn admin_delete_product(catalog: &CatalogState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "admin_delete_product command");
    require_admin(catalog)?;
    Ok(catalog.inner().products().delete(product_id)?)
}

/// Moves an order along its lifecycle. `order_ref` is anything the
/// tracking lookup accepts.
pub fn admin_update_order_status(
    catalog: &CatalogState,
    order_ref: &str,
    status: OrderStatus,
) -> Result<Order, ApiError> {
    debug!(order = %order_ref, status = %status, "admin_update_order_status command");
    require_admin(catalog)?;

    let orders = catalog.inner().orders();
    let order = orders
        .lookup(order_ref)?
        .ok_or_else(|| ApiError::not_found("Order", order_ref.trim()))?;

    Ok(orders.update_status(&order.id, status)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use verdant_catalog::{seed, Catalog};
    use verdant_core::UserProfile;

    #[test]
    fn test_dashboard_excludes_cancelled_revenue() {
        let catalog = CatalogState::default();
        let config = ConfigState::default();
        let stats = dashboard_stats(&catalog, &config).unwrap();

        let orders = catalog.inner().orders().list().unwrap();
        let expected: i64 = orders
            .iter()
            .filter(|o| o.status != OrderStatus::Cancelled)
            .map(|o| o.total.cents())
            .sum();

        assert_eq!(stats.order_count, 4);
        assert_eq!(stats.revenue_cents, expected);
        assert_eq!(stats.average_order_value_cents, expected / 3);
        assert_eq!(stats.product_count, 12);

        let cancelled = stats
            .orders_by_status
            .iter()
            .find(|s| s.status == OrderStatus::Cancelled)
            .unwrap();
        assert_eq!(cancelled.count, 1);
        assert_eq!(stats.orders_by_status.len(), OrderStatus::all().len());

        assert!(stats.low_stock.iter().all(|p| p.in_stock < 5));
        assert_eq!(stats.low_stock[0].id, "string-of-pearls");
        let item_revenue: i64 = stats.revenue_by_category.iter().map(|c| c.revenue_cents).sum();
        let expected_items: i64 = orders
            .iter()
            .filter(|o| o.is_billable())
            .map(|o| o.subtotal.cents())
            .sum();
        assert_eq!(item_revenue, expected_items);
    }

    #[test]
    fn test_dashboard_on_empty_store() {
        let catalog = CatalogState::new(Catalog::empty());
        let stats = dashboard_stats(&catalog, &ConfigState::default()).unwrap();

        assert_eq!(stats.order_count, 0);
        assert_eq!(stats.average_order_value_cents, 0);
        assert!(stats.revenue_by_category.iter().all(|c| c.revenue_cents == 0));
    }

    #[test]
    fn test_update_product_validates() {
        let catalog = CatalogState::default();

        let err = admin_update_product(
            &catalog,
            "lavender",
            AdminProductUpdate {
                price_cents: Some(-100),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let err = admin_update_product(&catalog, "lavender", AdminProductUpdate::default())
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);

        let product = admin_update_product(
            &catalog,
            "lavender",
            AdminProductUpdate {
                stock: Some(2),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(product.in_stock, 2);
        assert_eq!(product.price.cents(), 1499);
    }

    #[test]
    fn test_update_product_edits_descriptive_fields() {
        let catalog = CatalogState::default();

        let product = admin_update_product(
            &catalog,
            "aloe-vera",
            AdminProductUpdate {
                name: Some("  Tiger Aloe ".into()),
                water: Some(WaterNeeds::Low),
                category: Some(Category::Houseplant),
                pet_friendly: Some(true),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(product.name, "Tiger Aloe");
        assert_eq!(product.water, WaterNeeds::Low);
        assert_eq!(product.category, Category::Houseplant);
        assert!(product.pet_friendly);

        let err = admin_update_product(
            &catalog,
            "aloe-vera",
            AdminProductUpdate {
                name: Some("   ".into()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }

    #[test]
    fn test_add_and_delete_product() {
        let catalog = CatalogState::default();

        let added = admin_add_product(
            &catalog,
            NewProduct {
                name: "Pink Princess Philodendron".into(),
                price_cents: 5499,
                stock: 2,
                ..Default::default()
            },
        )
        .unwrap();
        assert!(added.id.starts_with("new-"));
        assert_eq!(added.category, Category::Houseplant);
        assert_eq!(added.water, WaterNeeds::Medium);
        assert_eq!(added.in_stock, 2);
        assert_eq!(catalog.inner().products().count().unwrap(), 13);

        for bad in [
            NewProduct::default(),
            NewProduct {
                name: "Fern".into(),
                price_cents: -1,
                ..Default::default()
            },
            NewProduct {
                id: "lavender".into(),
                name: "Lavender again".into(),
                ..Default::default()
            },
        ] {
            let err = admin_add_product(&catalog, bad).unwrap_err();
            assert_eq!(err.code, ErrorCode::ValidationError);
        }

        let removed = admin_delete_product(&catalog, &added.id).unwrap();
        assert_eq!(removed.name, "Pink Princess Philodendron");
        assert_eq!(catalog.inner().products().count().unwrap(), 12);

        let err = admin_delete_product(&catalog, &added.id).unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_list_orders_applies_filter() {
        let catalog = CatalogState::default();

        assert_eq!(admin_list_orders(&catalog, &OrderFilter::default()).unwrap().len(), 4);

        let cancelled = admin_list_orders(
            &catalog,
            &OrderFilter {
                status: Some(OrderStatus::Cancelled),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(cancelled.len(), 1);

        let nobody = admin_list_orders(
            &catalog,
            &OrderFilter {
                query: Some("jordan".into()),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(nobody.is_empty());
    }

    #[test]
    fn test_update_order_status_by_number() {
        let catalog = CatalogState::default();

        let order = admin_update_order_status(&catalog, "1004", OrderStatus::Shipped).unwrap();
        assert_eq!(order.id, "ord-1004");
        assert_eq!(order.status, OrderStatus::Shipped);

        let err = admin_update_order_status(&catalog, "ord-1001", OrderStatus::Cancelled)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::BusinessLogic);

        let err = admin_update_order_status(&catalog, "ord-9999", OrderStatus::Shipped)
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotFound);
    }

    #[test]
    fn test_non_admin_is_denied() {
        let catalog = CatalogState::new(Catalog::new(
            Vec::new(),
            Vec::new(),
            UserProfile {
                is_admin: false,
                ..seed::profile()
            },
        ));

        let err = dashboard_stats(&catalog, &ConfigState::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NavigationDenied);
        let err = admin_delete_product(&catalog, "lavender").unwrap_err();
        assert_eq!(err.code, ErrorCode::NavigationDenied);
        let err = admin_list_orders(&catalog, &OrderFilter::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::NavigationDenied);
    }
}
