//! # Services
//!
//! Stand-ins for the backends a real storefront would call. Each is a
//! trait so a real integration can replace the simulation without touching
//! the commands.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  place_order ──► OrderProcessor::process ──► Approved | Declined       │
//! │                  └─ SimulatedProcessor: sleep, then a weighted coin     │
//! │                                                                         │
//! │  track_order ──► ShipmentTracker::timeline ──► Vec<TrackingEvent>      │
//! │                  └─ SimulatedTracker: sleep, then stages from status    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod payment;
pub mod shipping;

pub use payment::{OrderProcessor, PaymentDetails, PaymentOutcome, SimulatedProcessor};
pub use shipping::{ShipmentTracker, SimulatedTracker};
