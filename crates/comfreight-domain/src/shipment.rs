//! Shipment module - the central entity of ComFreight Track

use crate::exception::ExceptionRecord;
use crate::status::ShipmentStatus;
use crate::tracking_id::TrackingId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Details text of the history entry written when a shipment is created
pub const CREATED_DETAILS: &str = "Shipment created";

/// An immutable event in a shipment's history
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// When the event happened
    pub timestamp: DateTime<Utc>,

    /// Where the event happened
    pub location: String,

    /// What happened
    pub details: String,
}

impl HistoryEntry {
    /// Create a new history entry
    pub fn new(
        timestamp: DateTime<Utc>,
        location: impl Into<String>,
        details: impl Into<String>,
    ) -> Self {
        Self {
            timestamp,
            location: location.into(),
            details: details.into(),
        }
    }
}

/// Input for creating a shipment
///
/// Fields arrive as raw text from a form or the command line; the store
/// validates them before allocating a tracking id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShipment {
    /// Origin, e.g. "Los Angeles, CA"
    pub origin: String,

    /// Destination, e.g. "New York, NY"
    pub destination: String,

    /// Carrier name
    pub carrier: String,

    /// Estimated delivery date or date-time
    pub estimated_delivery: String,
}

impl NewShipment {
    /// Create new shipment input
    pub fn new(
        origin: impl Into<String>,
        destination: impl Into<String>,
        carrier: impl Into<String>,
        estimated_delivery: impl Into<String>,
    ) -> Self {
        Self {
            origin: origin.into(),
            destination: destination.into(),
            carrier: carrier.into(),
            estimated_delivery: estimated_delivery.into(),
        }
    }

    /// Names of the fields that are empty or whitespace-only
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("origin", &self.origin),
            ("destination", &self.destination),
            ("carrier", &self.carrier),
            ("estimated delivery", &self.estimated_delivery),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

/// A tracked freight movement
///
/// `id`, `origin`, `destination`, `carrier`, `created_date` and
/// `estimated_delivery` never change after creation. `history` and
/// `exceptions` only grow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Shipment {
    /// Tracking identifier
    pub id: TrackingId,

    /// Where the freight starts
    pub origin: String,

    /// Where the freight is going
    pub destination: String,

    /// Who moves it
    pub carrier: String,

    /// When the shipment was created
    pub created_date: DateTime<Utc>,

    /// When delivery is expected
    pub estimated_delivery: DateTime<Utc>,

    /// When the shipment was last mutated
    pub last_update: DateTime<Utc>,

    /// Current status
    pub status: ShipmentStatus,

    /// Event history
    pub history: Vec<HistoryEntry>,

    /// Logged problems, oldest first
    pub exceptions: Vec<ExceptionRecord>,
}

impl Shipment {
    /// Create a freshly booked shipment
    ///
    /// The shipment is `Pending`, carries a single "Shipment created" history
    /// entry at `origin`, and has no exceptions.
    pub fn book(
        id: TrackingId,
        origin: String,
        destination: String,
        carrier: String,
        estimated_delivery: DateTime<Utc>,
        now: DateTime<Utc>,
    ) -> Self {
        let history = vec![HistoryEntry::new(now, origin.clone(), CREATED_DETAILS)];
        Self {
            id,
            origin,
            destination,
            carrier,
            created_date: now,
            estimated_delivery,
            last_update: now,
            status: ShipmentStatus::Pending,
            history,
            exceptions: Vec::new(),
        }
    }

    /// Append an exception and force the status to `Exception`
    pub fn record_exception(&mut self, exception: ExceptionRecord, now: DateTime<Utc>) {
        self.exceptions.push(exception);
        self.status = ShipmentStatus::Exception;
        self.last_update = now;
    }

    /// Most recent history entry by timestamp
    pub fn latest_event(&self) -> Option<&HistoryEntry> {
        self.history.iter().max_by_key(|entry| entry.timestamp)
    }

    /// Whether the estimated delivery has passed without delivery
    pub fn is_overdue(&self, now: DateTime<Utc>) -> bool {
        self.status != ShipmentStatus::Delivered && self.estimated_delivery < now
    }

    /// Case-insensitive substring match on id, origin, or destination
    ///
    /// `needle` must already be lowercased.
    pub fn matches(&self, needle: &str) -> bool {
        self.id.to_string().to_lowercase().contains(needle)
            || self.origin.to_lowercase().contains(needle)
            || self.destination.to_lowercase().contains(needle)
    }
}
