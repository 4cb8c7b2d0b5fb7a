//! Example shipments loaded at session start

use comfreight_domain::{
    parse_timestamp, ExceptionRecord, HistoryEntry, Shipment, ShipmentStatus, TrackingId,
};

/// (timestamp, location, details), newest first
type SeedEvent = (&'static str, &'static str, &'static str);

/// (timestamp, description)
type SeedException = (&'static str, &'static str);

struct SeedShipment {
    id: u32,
    origin: &'static str,
    destination: &'static str,
    carrier: &'static str,
    created: &'static str,
    eta: &'static str,
    last_update: &'static str,
    status: ShipmentStatus,
    history: &'static [SeedEvent],
    exceptions: &'static [SeedException],
}

const SEED: [SeedShipment; 4] = [
    SeedShipment {
        id: 84620,
        origin: "Los Angeles, CA",
        destination: "New York, NY",
        carrier: "FastLane Logistics",
        created: "2024-07-15T09:00:00Z",
        eta: "2024-07-22T17:00:00Z",
        last_update: "2024-07-18T14:30:00Z",
        status: ShipmentStatus::InTransit,
        history: &[
            ("2024-07-18T14:30:00Z", "Omaha, NE", "Departed from facility"),
            ("2024-07-17T02:15:00Z", "Denver, CO", "Arrived at sorting hub"),
            ("2024-07-15T18:00:00Z", "Los Angeles, CA", "Shipment picked up"),
        ],
        exceptions: &[],
    },
    SeedShipment {
        id: 51983,
        origin: "Chicago, IL",
        destination: "Miami, FL",
        carrier: "Speedy Haulers",
        created: "2024-07-16T11:30:00Z",
        eta: "2024-07-20T17:00:00Z",
        last_update: "2024-07-19T08:45:00Z",
        status: ShipmentStatus::Delayed,
        history: &[
            (
                "2024-07-19T08:45:00Z",
                "Atlanta, GA",
                "Mechanical issue with vehicle. Delay expected.",
            ),
            ("2024-07-18T12:00:00Z", "Nashville, TN", "Departed from facility"),
            ("2024-07-17T10:20:00Z", "Chicago, IL", "Shipment picked up"),
        ],
        exceptions: &[],
    },
    SeedShipment {
        id: 33741,
        origin: "Seattle, WA",
        destination: "Austin, TX",
        carrier: "West-Coast Movers",
        created: "2024-07-14T14:00:00Z",
        eta: "2024-07-19T17:00:00Z",
        last_update: "2024-07-19T18:00:00Z",
        status: ShipmentStatus::Delivered,
        history: &[
            ("2024-07-19T18:00:00Z", "Austin, TX", "Delivered. Signed by J. Doe."),
            ("2024-07-19T09:00:00Z", "Austin, TX", "Out for delivery."),
            ("2024-07-15T05:00:00Z", "Seattle, WA", "Shipment picked up"),
        ],
        exceptions: &[],
    },
    SeedShipment {
        id: 91125,
        origin: "Boston, MA",
        destination: "San Francisco, CA",
        carrier: "CrossCountry Freight",
        created: "2024-07-17T08:00:00Z",
        eta: "2024-07-24T17:00:00Z",
        last_update: "2024-07-20T03:15:00Z",
        status: ShipmentStatus::Exception,
        history: &[
            (
                "2024-07-20T03:15:00Z",
                "Cleveland, OH",
                "Package contents damaged during transit. Awaiting inspection.",
            ),
            ("2024-07-18T22:00:00Z", "Buffalo, NY", "Departed from facility"),
            ("2024-07-17T15:00:00Z", "Boston, MA", "Shipment picked up"),
        ],
        exceptions: &[(
            "2024-07-20T03:15:00Z",
            "Forklift operator reported a punctured crate. Visible damage to contents.",
        )],
    },
];

impl SeedShipment {
    fn build(&self) -> Option<Shipment> {
        let history = self
            .history
            .iter()
            .map(|(ts, location, details)| {
                parse_timestamp(ts)
                    .ok()
                    .map(|ts| HistoryEntry::new(ts, *location, *details))
            })
            .collect::<Option<Vec<_>>>()?;

        let exceptions = self
            .exceptions
            .iter()
            .map(|(ts, description)| {
                parse_timestamp(ts)
                    .ok()
                    .map(|ts| ExceptionRecord::new(ts, *description))
            })
            .collect::<Option<Vec<_>>>()?;

        Some(Shipment {
            id: TrackingId::from_number(self.id)?,
            origin: self.origin.to_string(),
            destination: self.destination.to_string(),
            carrier: self.carrier.to_string(),
            created_date: parse_timestamp(self.created).ok()?,
            estimated_delivery: parse_timestamp(self.eta).ok()?,
            last_update: parse_timestamp(self.last_update).ok()?,
            status: self.status,
            history,
            exceptions,
        })
    }
}

/// The four example shipments shown on a fresh dashboard
pub fn seed_shipments() -> Vec<Shipment> {
    SEED.iter().filter_map(SeedShipment::build).collect()
}
