//! # Shipment Tracking
//!
//! Builds a shipment timeline from an order's status. Nothing is randomized:
//! the same order always yields the same timeline.
//!
//! ```text
//!  status      Pending   Processing   Shipped   Delivered
//!  ─────────────────────────────────────────────────────────
//!  Pending        ✓          ·           ·          ·
//!  Processing     ✓          ✓           ·          ·
//!  Shipped        ✓          ✓           ✓          ·
//!  Delivered      ✓          ✓           ✓          ✓
//!  Cancelled      ✓    then a single Cancelled stage
//! ```

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Duration as Elapsed, Utc};
use tracing::debug;
use verdant_core::{Order, OrderStatus, TrackingEvent};

use crate::config::TrackingSettings;

/// Produces the shipment timeline for an order.
#[async_trait]
pub trait ShipmentTracker: Send + Sync {
    async fn timeline(&self, order: &Order) -> Vec<TrackingEvent>;
}

const WAREHOUSE: &str = "Verdant Greenhouse, Portland OR";

/// Fulfilment stages in order, with the hours after placement each is
/// normally reached.
const STAGES: &[(OrderStatus, i64)] = &[
    (OrderStatus::Pending, 0),
    (OrderStatus::Processing, 6),
    (OrderStatus::Shipped, 30),
    (OrderStatus::Delivered, 96),
];

/// Tracker standing in for a carrier API.
#[derive(Debug, Clone, Default)]
pub struct SimulatedTracker {
    delay: Duration,
}

impl SimulatedTracker {
    pub fn new(delay: Duration) -> Self {
        SimulatedTracker { delay }
    }

    pub fn from_config(settings: &TrackingSettings) -> Self {
        SimulatedTracker::new(settings.lookup_delay())
    }
}

#[async_trait]
impl ShipmentTracker for SimulatedTracker {
    async fn timeline(&self, order: &Order) -> Vec<TrackingEvent> {
        debug!(order_number = %order.order_number, status = %order.status, "Building timeline");

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        build_timeline(order)
    }
}

/// Timeline for `order` as of its current status.
pub fn build_timeline(order: &Order) -> Vec<TrackingEvent> {
    if order.status == OrderStatus::Cancelled {
        return vec![
            reached(order, OrderStatus::Pending, order.placed_at),
            TrackingEvent {
                status: OrderStatus::Cancelled,
                location: WAREHOUSE.to_string(),
                description: "Order cancelled. No charge was captured".to_string(),
                timestamp: Some(order.updated_at),
                completed: true,
            },
        ];
    }

    STAGES
        .iter()
        .map(|&(stage, hours)| {
            if stage > order.status {
                upcoming(order, stage)
            } else {
                // Earlier stages can't be later than the last status change.
                let at = (order.placed_at + Elapsed::hours(hours)).min(order.updated_at);
                let at = if stage == order.status { order.updated_at } else { at };
                reached(order, stage, at)
            }
        })
        .collect()
}

fn reached(order: &Order, stage: OrderStatus, at: DateTime<Utc>) -> TrackingEvent {
    TrackingEvent {
        status: stage,
        location: location(order, stage),
        description: description(stage).to_string(),
        timestamp: Some(at),
        completed: true,
    }
}

fn upcoming(order: &Order, stage: OrderStatus) -> TrackingEvent {
    TrackingEvent {
        status: stage,
        location: location(order, stage),
        description: description(stage).to_string(),
        timestamp: None,
        completed: false,
    }
}

fn location(order: &Order, stage: OrderStatus) -> String {
    let address = &order.shipping_address;
    match stage {
        OrderStatus::Shipped => format!("In transit to {}", address.city),
        OrderStatus::Delivered => format!("{}, {}", address.city, address.state),
        _ => WAREHOUSE.to_string(),
    }
}

fn description(stage: OrderStatus) -> &'static str {
    match stage {
        OrderStatus::Pending => "Order placed",
        OrderStatus::Processing => "Plants hand-picked and packed",
        OrderStatus::Shipped => "Handed to carrier",
        OrderStatus::Delivered => "Delivered",
        OrderStatus::Cancelled => "Order cancelled",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use verdant_catalog::Catalog;

    fn order(id: &str) -> Order {
        Catalog::seeded().orders().get(id).unwrap().unwrap()
    }

    #[tokio::test]
    async fn test_shipped_order_has_one_stage_ahead() {
        let tracker = SimulatedTracker::default();
        let events = tracker.timeline(&order("ord-1003")).await;

        let done: Vec<OrderStatus> = events.iter().filter(|e| e.completed).map(|e| e.status).collect();
        assert_eq!(
            done,
            vec![OrderStatus::Pending, OrderStatus::Processing, OrderStatus::Shipped]
        );

        let last = events.last().unwrap();
        assert_eq!(last.status, OrderStatus::Delivered);
        assert!(!last.completed);
        assert!(last.timestamp.is_none());
    }

    #[test]
    fn test_delivered_order_is_complete_and_ordered() {
        let events = build_timeline(&order("ord-1001"));
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.completed));

        let stamps: Vec<_> = events.iter().filter_map(|e| e.timestamp).collect();
        assert!(stamps.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(events[3].location, "Portland, OR");
    }

    #[test]
    fn test_cancelled_order_ends_in_cancellation() {
        let events = build_timeline(&order("ord-1002"));
        assert_eq!(events.len(), 2);
        assert_eq!(events[1].status, OrderStatus::Cancelled);
        assert!(events.iter().all(|e| e.completed));
    }
}
