//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{ExceptionRecord, NewShipment, Shipment, TrackingId};
use chrono::{DateTime, Utc};
use std::future::Future;

/// Trait for holding and mutating shipments
///
/// Implemented by the infrastructure layer (comfreight-store)
pub trait ShipmentStore {
    /// Error type for store operations
    type Error;

    /// All shipments, most recently created first
    fn list(&self) -> Vec<Shipment>;

    /// Get a shipment by tracking id
    fn get(&self, id: TrackingId) -> Option<Shipment>;

    /// Shipments whose id, origin, or destination contains `term`
    /// (case-insensitive), in `list` order
    fn search(&self, term: &str) -> Vec<Shipment>;

    /// Create a new shipment and put it at the front of the collection
    fn create(&mut self, data: NewShipment) -> Result<Shipment, Self::Error>;

    /// Log an exception against a shipment, forcing its status to `Exception`
    fn log_exception(
        &mut self,
        id: TrackingId,
        exception: ExceptionRecord,
    ) -> Result<Shipment, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (comfreight-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate JSON constrained by a response schema
    ///
    /// `schema` is a JSON document in the provider's schema dialect.
    fn generate_structured(
        &self,
        prompt: &str,
        schema: &str,
    ) -> impl Future<Output = Result<String, Self::Error>> + Send;
}

/// Source of the current time
///
/// Injected into the store so tests can control timestamps.
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}
