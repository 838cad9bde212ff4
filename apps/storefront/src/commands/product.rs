//! # Product Commands
//!
//! Read-only catalog access for the home, shop and product pages.

use tracing::debug;
use verdant_catalog::ProductFilter;
use verdant_core::validation::validate_search_query;
use verdant_core::Product;

use crate::error::ApiError;
use crate::state::CatalogState;

const DEFAULT_SEARCH_LIMIT: usize = 20;
const DEFAULT_RELATED_LIMIT: usize = 4;

/// Free-text search over name, botanical name and description.
///
/// An empty query returns nothing rather than the whole catalog.
pub fn search_products(
    catalog: &CatalogState,
    query: &str,
    limit: Option<usize>,
) -> Result<Vec<Product>, ApiError> {
    let query = validate_search_query(query)?;
    let limit = limit.unwrap_or(DEFAULT_SEARCH_LIMIT);
    debug!(query = %query, limit = limit, "search_products command");

    if query.is_empty() {
        return Ok(Vec::new());
    }
    Ok(catalog.inner().products().search(&query, limit)?)
}

/// Shop page listing with filters and sort order.
pub fn browse_products(
    catalog: &CatalogState,
    mut filter: ProductFilter,
) -> Result<Vec<Product>, ApiError> {
    debug!(filter = ?filter, "browse_products command");

    if let Some(query) = filter.query.take() {
        let query = validate_search_query(&query)?;
        filter.query = (!query.is_empty()).then_some(query);
    }
    if filter.max_price.is_some_and(|p| p.is_negative()) {
        return Err(ApiError::validation("max price cannot be negative"));
    }

    Ok(catalog.inner().products().filter(&filter)?)
}

pub fn get_product(catalog: &CatalogState, product_id: &str) -> Result<Product, ApiError> {
    debug!(product_id = %product_id, "get_product command");

    catalog
        .inner()
        .products()
        .get_by_id(product_id)?
        .ok_or_else(|| ApiError::not_found("Product", product_id))
}

/// Products for the home page carousel.
pub fn featured_products(catalog: &CatalogState) -> Result<Vec<Product>, ApiError> {
    debug!("featured_products command");
    Ok(catalog.inner().products().featured()?)
}

/// "You may also like" on the product page: same category, never the
/// product itself.
pub fn related_products(
    catalog: &CatalogState,
    product_id: &str,
    limit: Option<usize>,
) -> Result<Vec<Product>, ApiError> {
    debug!(product_id = %product_id, "related_products command");
    let limit = limit.unwrap_or(DEFAULT_RELATED_LIMIT);
    Ok(catalog.inner().products().related(product_id, limit)?)
}
