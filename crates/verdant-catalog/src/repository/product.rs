//! # Product Repository
//!
//! Lookups, search and filtering over the plant table, plus the
//! session-scoped admin edits (insert, full-field update, delete).
//!
//! ## Browse Pipeline
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    ProductRepository::filter                            │
//! │                                                                         │
//! │  all products                                                          │
//! │       │                                                                 │
//! │       ▼  category? care level? pet friendly? featured only?            │
//! │       ▼  in stock only? max price? text query?                         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  sort: Featured (featured first, catalog order otherwise)              │
//! │        PriceLowHigh | PriceHighLow | Name                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Vec<Product>                                                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::{Arc, RwLock};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;
use verdant_core::{CareLevel, Category, Humidity, LightLevel, Money, Product, WaterNeeds};

use super::{read, write};
use crate::error::{CatalogError, CatalogResult};

const TABLE: &str = "products";

// =============================================================================
// Filter Types
// =============================================================================

/// Shop page ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Featured,
    PriceLowHigh,
    PriceHighLow,
    Name,
}

/// Shop page filters. Every field narrows; the default matches everything.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductFilter {
    pub category: Option<Category>,
    pub care_level: Option<CareLevel>,
    /// When true, only pet-friendly plants.
    pub pet_friendly: bool,
    pub featured_only: bool,
    pub in_stock_only: bool,
    pub max_price: Option<Money>,
    pub query: Option<String>,
    pub sort: SortOrder,
}

impl ProductFilter {
    fn matches(&self, product: &Product, needle: Option<&str>) -> bool {
        self.category.map_or(true, |c| product.category == c)
            && self.care_level.map_or(true, |c| product.care_level == c)
            && (!self.pet_friendly || product.pet_friendly)
            && (!self.featured_only || product.featured)
            && (!self.in_stock_only || product.is_in_stock())
            && self.max_price.map_or(true, |max| product.price <= max)
            && needle.map_or(true, |n| matches_text(product, n))
    }
}

/// Admin edit. `None` leaves a field untouched; every field but the id
/// can be changed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductUpdate {
    pub name: Option<String>,
    pub scientific_name: Option<String>,
    pub description: Option<String>,
    pub image: Option<String>,
    pub price: Option<Money>,
    pub category: Option<Category>,
    pub care_level: Option<CareLevel>,
    pub light: Option<LightLevel>,
    pub water: Option<WaterNeeds>,
    pub humidity: Option<Humidity>,
    pub pet_friendly: Option<bool>,
    pub stock: Option<u32>,
    pub featured: Option<bool>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        *self == ProductUpdate::default()
    }

    fn apply(self, product: &mut Product) {
        if let Some(name) = self.name {
            product.name = name;
        }
        if let Some(scientific_name) = self.scientific_name {
            product.scientific_name = scientific_name;
        }
        if let Some(description) = self.description {
            product.description = description;
        }
        if let Some(image) = self.image {
            product.image = image;
        }
        if let Some(price) = self.price {
            product.price = price;
        }
        if let Some(category) = self.category {
            product.category = category;
        }
        if let Some(care_level) = self.care_level {
            product.care_level = care_level;
        }
        if let Some(light) = self.light {
            product.light = light;
        }
        if let Some(water) = self.water {
            product.water = water;
        }
        if let Some(humidity) = self.humidity {
            product.humidity = humidity;
        }
        if let Some(pet_friendly) = self.pet_friendly {
            product.pet_friendly = pet_friendly;
        }
        if let Some(stock) = self.stock {
            product.in_stock = stock;
        }
        if let Some(featured) = self.featured {
            product.featured = featured;
        }
    }
}

fn matches_text(product: &Product, needle_lower: &str) -> bool {
    product.name.to_lowercase().contains(needle_lower)
        || product.scientific_name.to_lowercase().contains(needle_lower)
        || product.description.to_lowercase().contains(needle_lower)
}

// =============================================================================
// Repository
// =============================================================================

/// Repository for the plant table.
///
/// ## Usage
/// ```rust
/// use verdant_catalog::{Catalog, ProductFilter, SortOrder};
/// use verdant_core::Category;
///
/// let catalog = Catalog::seeded();
/// let succulents = catalog
///     .products()
///     .filter(&ProductFilter {
///         category: Some(Category::Succulent),
///         sort: SortOrder::PriceLowHigh,
///         ..Default::default()
///     })
///     .unwrap();
/// assert_eq!(succulents[0].id, "echeveria-elegans");
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    table: Arc<RwLock<Vec<Product>>>,
}

impl ProductRepository {
    pub fn new(table: Arc<RwLock<Vec<Product>>>) -> Self {
        ProductRepository { table }
    }

    /// Every product, in catalog order.
    pub fn list(&self) -> CatalogResult<Vec<Product>> {
        Ok(read(TABLE, &self.table)?.clone())
    }

    /// Gets a product by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Product))` - Product found
    /// * `Ok(None)` - Product not found
    pub fn get_by_id(&self, id: &str) -> CatalogResult<Option<Product>> {
        let products = read(TABLE, &self.table)?;
        Ok(products.iter().find(|p| p.id == id).cloned())
    }

    /// Case-insensitive substring search over name, scientific name and
    /// description. An empty query returns the first `limit` products.
    pub fn search(&self, query: &str, limit: usize) -> CatalogResult<Vec<Product>> {
        let query = query.trim();
        debug!(query = %query, limit = limit, "Searching products");

        let products = read(TABLE, &self.table)?;
        let needle = query.to_lowercase();
        let hits: Vec<Product> = products
            .iter()
            .filter(|p| needle.is_empty() || matches_text(p, &needle))
            .take(limit)
            .cloned()
            .collect();

        debug!(count = hits.len(), "Search returned products");
        Ok(hits)
    }

    /// Applies a shop filter and sort.
    pub fn filter(&self, filter: &ProductFilter) -> CatalogResult<Vec<Product>> {
        let needle = filter
            .query
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(str::to_lowercase);

        let mut hits: Vec<Product> = read(TABLE, &self.table)?
            .iter()
            .filter(|p| filter.matches(p, needle.as_deref()))
            .cloned()
            .collect();

        // sort_by is stable, so ties keep catalog order
        match filter.sort {
            SortOrder::Featured => hits.sort_by_key(|p| !p.featured),
            SortOrder::PriceLowHigh => hits.sort_by_key(|p| p.price),
            SortOrder::PriceHighLow => hits.sort_by(|a, b| b.price.cmp(&a.price)),
            SortOrder::Name => hits.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        }

        debug!(count = hits.len(), sort = ?filter.sort, "Filter returned products");
        Ok(hits)
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> CatalogResult<Vec<Product>> {
        let products = read(TABLE, &self.table)?;
        Ok(products.iter().filter(|p| p.featured).cloned().collect())
    }

    /// Up to `limit` other products from the same category.
    pub fn related(&self, id: &str, limit: usize) -> CatalogResult<Vec<Product>> {
        let products = read(TABLE, &self.table)?;
        let product = products
            .iter()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        Ok(products
            .iter()
            .filter(|p| p.category == product.category && p.id != product.id)
            .take(limit)
            .cloned()
            .collect())
    }

    /// Products below `threshold` units, scarcest first.
    pub fn low_stock(&self, threshold: u32) -> CatalogResult<Vec<Product>> {
        let mut low: Vec<Product> = read(TABLE, &self.table)?
            .iter()
            .filter(|p| p.is_low_stock(threshold))
            .cloned()
            .collect();
        low.sort_by_key(|p| p.in_stock);
        Ok(low)
    }

    pub fn count(&self) -> CatalogResult<usize> {
        Ok(read(TABLE, &self.table)?.len())
    }

    /// Applies an admin edit and returns the updated product.
    ///
    /// Edits live in memory only and are gone when the process exits.
    pub fn update(&self, id: &str, update: ProductUpdate) -> CatalogResult<Product> {
        let mut products = write(TABLE, &self.table)?;
        let product = products
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        update.apply(product);

        info!(
            id = %id,
            price = %product.price,
            stock = product.in_stock,
            featured = product.featured,
            "Product updated"
        );
        Ok(product.clone())
    }

    /// Appends a new product to the end of the catalog.
    ///
    /// A blank id is replaced with a generated `new-<hex>` id.
    pub fn insert(&self, mut product: Product) -> CatalogResult<Product> {
        product.id = product.id.trim().to_string();
        if product.id.is_empty() {
            product.id = format!("new-{}", &Uuid::new_v4().simple().to_string()[..8]);
        }

        let mut products = write(TABLE, &self.table)?;
        if products.iter().any(|p| p.id == product.id) {
            warn!(id = %product.id, "Rejected duplicate product id");
            return Err(CatalogError::Duplicate {
                entity: "Product".to_string(),
                id: product.id,
            });
        }

        info!(id = %product.id, name = %product.name, price = %product.price, "Product added");
        products.push(product.clone());
        Ok(product)
    }

    /// Removes a product and returns it. Carts keep their own copy, so
    /// existing lines are unaffected.
    pub fn delete(&self, id: &str) -> CatalogResult<Product> {
        let mut products = write(TABLE, &self.table)?;
        let index = products
            .iter()
            .position(|p| p.id == id)
            .ok_or_else(|| CatalogError::not_found("Product", id))?;

        let removed = products.remove(index);
        info!(id = %id, name = %removed.name, "Product deleted");
        Ok(removed)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Catalog;

    fn repo() -> ProductRepository {
        Catalog::seeded().products()
    }

    #[test]
    fn test_get_by_id() {
        let repo = repo();
        let fern = repo.get_by_id("boston-fern").unwrap().unwrap();
        assert_eq!(fern.name, "Boston Fern");
        assert!(repo.get_by_id("triffid").unwrap().is_none());
    }

    #[test]
    fn test_search_matches_any_text_field() {
        let repo = repo();

        let by_name = repo.search("POTHOS", 10).unwrap();
        assert_eq!(by_name.len(), 1);

        let by_scientific = repo.search("ficus", 10).unwrap();
        assert_eq!(by_scientific[0].id, "fiddle-leaf-fig");

        let by_description = repo.search("bathroom", 10).unwrap();
        assert_eq!(by_description[0].id, "boston-fern");

        assert!(repo.search("cactus", 10).unwrap().is_empty());
    }

    #[test]
    fn test_search_empty_query_respects_limit() {
        assert_eq!(repo().search("   ", 5).unwrap().len(), 5);
    }

    #[test]
    fn test_filter_default_puts_featured_first() {
        let all = repo().filter(&ProductFilter::default()).unwrap();
        assert_eq!(all.len(), 12);
        let first_plain = all.iter().position(|p| !p.featured).unwrap();
        assert!(all[first_plain..].iter().all(|p| !p.featured));
        // catalog order among featured
        assert_eq!(all[0].id, "monstera-deliciosa");
    }

    #[test]
    fn test_filter_combines_criteria() {
        let hits = repo()
            .filter(&ProductFilter {
                pet_friendly: true,
                in_stock_only: true,
                max_price: Some(Money::from_cents(3000)),
                sort: SortOrder::PriceHighLow,
                ..Default::default()
            })
            .unwrap();

        let ids: Vec<_> = hits.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["boston-fern", "echeveria-elegans"]);
    }

    #[test]
    fn test_filter_in_stock_excludes_sold_out() {
        let filter = ProductFilter {
            category: Some(Category::Succulent),
            in_stock_only: true,
            ..Default::default()
        };
        let hits = repo().filter(&filter).unwrap();
        assert!(hits.iter().all(|p| p.id != "string-of-pearls"));
        assert_eq!(hits.len(), 2);
    }

    #[test]
    fn test_filter_query_and_name_sort() {
        let hits = repo()
            .filter(&ProductFilter {
                query: Some("  leaves ".into()),
                sort: SortOrder::Name,
                ..Default::default()
            })
            .unwrap();
        assert!(hits.len() > 1);
        assert!(hits.windows(2).all(|w| w[0].name <= w[1].name));
    }

    #[test]
    fn test_filter_deserializes_from_partial_json() {
        let filter: ProductFilter =
            serde_json::from_str(r#"{"category":"outdoor","sort":"price_low_high"}"#).unwrap();
        let hits = repo().filter(&filter).unwrap();
        assert_eq!(hits[0].id, "lavender");
        assert_eq!(hits[1].id, "japanese-maple");
    }

    #[test]
    fn test_related_same_category_excluding_self() {
        let repo = repo();
        let related = repo.related("aloe-vera", 10).unwrap();
        assert_eq!(related.len(), 2);
        assert!(related.iter().all(|p| p.category == Category::Succulent));
        assert!(related.iter().all(|p| p.id != "aloe-vera"));

        assert_eq!(repo.related("snake-plant", 2).unwrap().len(), 2);
        assert!(matches!(
            repo.related("nope", 3),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_low_stock_sorted_scarcest_first() {
        let low = repo().low_stock(5).unwrap();
        let ids: Vec<_> = low.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["string-of-pearls", "calathea-orbifolia", "fiddle-leaf-fig"]);
    }

    #[test]
    fn test_low_stock_excludes_product_at_threshold() {
        let repo = repo();
        repo.update(
            "japanese-maple",
            ProductUpdate {
                stock: Some(5),
                ..Default::default()
            },
        )
        .unwrap();

        let ids: Vec<_> = repo.low_stock(5).unwrap().into_iter().map(|p| p.id).collect();
        assert!(!ids.contains(&"japanese-maple".to_string()));
        assert!(repo
            .low_stock(6)
            .unwrap()
            .iter()
            .any(|p| p.id == "japanese-maple"));
    }

    #[test]
    fn test_update_applies_only_given_fields() {
        let repo = repo();
        let before = repo.get_by_id("lavender").unwrap().unwrap();

        let after = repo
            .update(
                "lavender",
                ProductUpdate {
                    price: Some(Money::from_cents(999)),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(after.price.cents(), 999);
        assert_eq!(after.in_stock, before.in_stock);
        assert_eq!(after.featured, before.featured);

        assert!(matches!(
            repo.update("nope", ProductUpdate::default()),
            Err(CatalogError::NotFound { .. })
        ));
    }

    #[test]
    fn test_update_replaces_every_editable_field() {
        let repo = repo();
        let after = repo
            .update(
                "boston-fern",
                ProductUpdate {
                    name: Some("Kimberly Queen Fern".into()),
                    scientific_name: Some("Nephrolepis obliterata".into()),
                    description: Some("Upright fronds.".into()),
                    image: Some("/img/kimberly.jpg".into()),
                    category: Some(Category::Outdoor),
                    care_level: Some(CareLevel::Easy),
                    light: Some(LightLevel::Bright),
                    water: Some(WaterNeeds::High),
                    humidity: Some(Humidity::Low),
                    pet_friendly: Some(false),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(after.id, "boston-fern");
        assert_eq!(after.name, "Kimberly Queen Fern");
        assert_eq!(after.scientific_name, "Nephrolepis obliterata");
        assert_eq!(after.category, Category::Outdoor);
        assert_eq!(after.light, LightLevel::Bright);
        assert_eq!(after.water, WaterNeeds::High);
        assert_eq!(after.humidity, Humidity::Low);
        assert!(!after.pet_friendly);
        assert_eq!(repo.get_by_id("boston-fern").unwrap().unwrap(), after);
        assert!(!ProductUpdate {
            image: Some(String::new()),
            ..Default::default()
        }
        .is_empty());
    }

    #[test]
    fn test_insert_appends_and_generates_blank_ids() {
        let repo = repo();
        let mut product = repo.get_by_id("lavender").unwrap().unwrap();
        product.id = "  ".into();
        product.name = "French Lavender".into();

        let added = repo.insert(product.clone()).unwrap();
        assert!(added.id.starts_with("new-"));
        assert_eq!(added.id.len(), "new-".len() + 8);
        assert_eq!(repo.count().unwrap(), 13);
        assert_eq!(repo.list().unwrap().last().unwrap().id, added.id);

        product.id = "lavender".into();
        assert!(matches!(
            repo.insert(product),
            Err(CatalogError::Duplicate { .. })
        ));
        assert_eq!(repo.count().unwrap(), 13);
    }

    #[test]
    fn test_delete_removes_and_returns_product() {
        let repo = repo();
        let removed = repo.delete("aloe-vera").unwrap();
        assert_eq!(removed.id, "aloe-vera");
        assert!(repo.get_by_id("aloe-vera").unwrap().is_none());
        assert_eq!(repo.count().unwrap(), 11);

        assert!(matches!(
            repo.delete("aloe-vera"),
            Err(CatalogError::NotFound { .. })
        ));
    }
}
