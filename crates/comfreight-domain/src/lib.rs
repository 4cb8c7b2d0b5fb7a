//! ComFreight Domain Layer
//!
//! This crate contains the domain model for ComFreight Track, an in-memory
//! freight shipment tracker. It defines the entities, value objects, and trait
//! interfaces that the store, the LLM providers, and the presentation layer
//! depend upon.
//!
//! ## Key Concepts
//!
//! - **Shipment**: A tracked freight movement with status, history, and exceptions
//! - **Tracking ID**: Human-readable `CFT-#####` identifier
//! - **History Entry**: Append-only event record (location + details + time)
//! - **Exception**: A logged problem affecting a shipment, optionally analyzed by AI
//! - **Status**: Pending → In Transit → Delivered, with Delayed and Exception detours
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture:
//! - Pure business rules only (no I/O)
//! - Infrastructure implementations live in other crates
//! - Trait definitions for all external interactions

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod exception;
pub mod shipment;
pub mod status;
pub mod time;
pub mod tracking_id;
pub mod traits;

// Re-exports for convenience
pub use exception::{AiAnalysis, ExceptionCategory, ExceptionRecord};
pub use shipment::{HistoryEntry, NewShipment, Shipment, CREATED_DETAILS};
pub use status::ShipmentStatus;
pub use time::{parse_timestamp, SystemClock};
pub use tracking_id::TrackingId;
