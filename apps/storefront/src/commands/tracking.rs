//! # Tracking Commands
//!
//! Order lookup for the tracking page. Accepts whatever the shopper pastes:
//! an order id, an order number (or just its trailing digits) or a
//! tracking number.

use serde::Serialize;
use tracing::debug;
use verdant_core::validation::validate_required;
use verdant_core::{Order, TrackingEvent};

use crate::error::ApiError;
use crate::services::ShipmentTracker;
use crate::state::CatalogState;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackingResponse {
    pub order: Order,
    pub events: Vec<TrackingEvent>,
}

/// Looks up an order and builds its shipment timeline.
pub async fn track_order(
    catalog: &CatalogState,
    tracker: &dyn ShipmentTracker,
    query: &str,
) -> Result<TrackingResponse, ApiError> {
    debug!(query = %query, "track_order command");
    validate_required("order number", query)?;

    let order = catalog
        .inner()
        .orders()
        .lookup(query)?
        .ok_or_else(|| ApiError::not_found("Order", query.trim()))?;

    let events = tracker.timeline(&order).await;
    Ok(TrackingResponse { order, events })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use crate::services::SimulatedTracker;

    #[tokio::test]
    async fn test_track_by_trailing_digits() {
        let catalog = CatalogState::default();
        let response = track_order(&catalog, &SimulatedTracker::default(), "1003")
            .await
            .unwrap();

        assert_eq!(response.order.id, "ord-1003");
        assert_eq!(response.events.len(), 4);
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let catalog = CatalogState::default();
        let err = track_order(&catalog, &SimulatedTracker::default(), " VRD-000000-0001 ")
            .await
            .unwrap_err();

        assert_eq!(err.code, ErrorCode::NotFound);
        assert_eq!(err.message, "Order not found: VRD-000000-0001");
    }

    #[tokio::test]
    async fn test_blank_query_is_invalid() {
        let catalog = CatalogState::default();
        let err = track_order(&catalog, &SimulatedTracker::default(), "   ")
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::ValidationError);
    }
}
