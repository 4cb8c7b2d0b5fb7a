//! ComFreight Storage Layer
//!
//! Implements the `ShipmentStore` trait over an in-memory collection.
//!
//! # Architecture
//!
//! - A single `Vec<Shipment>` ordered newest-first is the authoritative state
//! - The store is an explicit value owned by its caller; there is no global
//! - Nothing is persisted: the collection lives as long as the store does
//!
//! # Examples
//!
//! ```
//! use comfreight_domain::traits::ShipmentStore;
//! use comfreight_domain::NewShipment;
//! use comfreight_store::InMemoryStore;
//!
//! let mut store = InMemoryStore::seeded();
//! let created = store
//!     .create(NewShipment::new("LA", "NY", "X", "2024-08-01"))
//!     .unwrap();
//! assert_eq!(store.list()[0].id, created.id);
//! ```

#![warn(missing_docs)]

mod memory;
pub mod seed;

use comfreight_domain::TrackingId;
use thiserror::Error;

pub use memory::{InMemoryStore, MAX_ID_ATTEMPTS};
pub use seed::seed_shipments;

/// Errors that can occur during store operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Input failed validation
    #[error("Validation error: {0}")]
    Validation(String),

    /// No shipment carries the tracking id
    #[error("Shipment not found: {0}")]
    NotFound(TrackingId),

    /// Could not find an unused tracking id
    #[error("No unused tracking id found after {0} attempts")]
    IdSpaceExhausted(u32),
}
