//! Status module - where a shipment stands in its journey

use serde::{Deserialize, Serialize};
use std::fmt;

/// Status of a shipment
///
/// Shipments start out `Pending`. Logging an exception forces `Exception`
/// from any status, including `Delivered`. Moves among the other statuses
/// would come from a carrier feed and are not driven by this system.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShipmentStatus {
    /// Created, not yet picked up
    #[default]
    Pending,

    /// Moving between facilities
    #[serde(rename = "In Transit")]
    InTransit,

    /// Handed over at the destination
    Delivered,

    /// Behind its estimated delivery
    Delayed,

    /// A problem has been logged against the shipment
    Exception,
}

impl ShipmentStatus {
    /// All statuses, in journey order
    pub const ALL: [ShipmentStatus; 5] = [
        ShipmentStatus::Pending,
        ShipmentStatus::InTransit,
        ShipmentStatus::Delivered,
        ShipmentStatus::Delayed,
        ShipmentStatus::Exception,
    ];

    /// Get the display label
    pub fn as_str(&self) -> &'static str {
        match self {
            ShipmentStatus::Pending => "Pending",
            ShipmentStatus::InTransit => "In Transit",
            ShipmentStatus::Delivered => "Delivered",
            ShipmentStatus::Delayed => "Delayed",
            ShipmentStatus::Exception => "Exception",
        }
    }

    /// Parse a status from its label (case-insensitive; `in-transit` and
    /// `in_transit` are accepted too)
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().replace(['-', '_'], " ").as_str() {
            "pending" => Some(ShipmentStatus::Pending),
            "in transit" | "intransit" => Some(ShipmentStatus::InTransit),
            "delivered" => Some(ShipmentStatus::Delivered),
            "delayed" => Some(ShipmentStatus::Delayed),
            "exception" => Some(ShipmentStatus::Exception),
            _ => None,
        }
    }

    /// Whether the shipment has left the network
    pub fn is_terminal(&self) -> bool {
        matches!(self, ShipmentStatus::Delivered)
    }

    /// Whether the shipment needs operator attention
    pub fn needs_attention(&self) -> bool {
        matches!(self, ShipmentStatus::Delayed | ShipmentStatus::Exception)
    }
}

impl fmt::Display for ShipmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ShipmentStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Invalid status: {}", s))
    }
}
