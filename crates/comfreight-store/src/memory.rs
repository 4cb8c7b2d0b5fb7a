//! In-memory implementation of ShipmentStore

use crate::seed::seed_shipments;
use crate::StoreError;
use chrono::{DateTime, Utc};
use comfreight_domain::traits::{Clock, ShipmentStore};
use comfreight_domain::{
    parse_timestamp, ExceptionRecord, NewShipment, Shipment, SystemClock, TrackingId,
};
use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Maximum candidates drawn before giving up on finding an unused tracking id
pub const MAX_ID_ATTEMPTS: u32 = 1_000;

type IdGenerator = Box<dyn FnMut() -> TrackingId + Send>;

/// In-memory shipment store
///
/// Shipments are kept newest-first. The store has a single writer; callers
/// pass it around explicitly (`&mut` for mutation).
pub struct InMemoryStore {
    shipments: Vec<Shipment>,
    clock: Arc<dyn Clock>,
    next_id: IdGenerator,
}

impl InMemoryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::from_shipments(Vec::new())
    }

    /// Create a store holding the example shipments
    pub fn seeded() -> Self {
        Self::from_shipments(seed_shipments())
    }

    /// Create a store from initial data, given newest-first
    pub fn from_shipments(shipments: Vec<Shipment>) -> Self {
        Self {
            shipments,
            clock: Arc::new(SystemClock),
            next_id: Box::new(TrackingId::generate),
        }
    }

    /// Use a different clock for timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Use a different source of candidate tracking ids
    pub fn with_id_generator<F>(mut self, generator: F) -> Self
    where
        F: FnMut() -> TrackingId + Send + 'static,
    {
        self.next_id = Box::new(generator);
        self
    }

    /// Number of shipments held
    pub fn len(&self) -> usize {
        self.shipments.len()
    }

    /// Whether the store holds no shipments
    pub fn is_empty(&self) -> bool {
        self.shipments.is_empty()
    }

    /// Current time according to the store's clock
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Draw candidates until one is not already in use
    fn allocate_id(&mut self) -> Result<TrackingId, StoreError> {
        let taken: HashSet<TrackingId> = self.shipments.iter().map(|s| s.id).collect();

        for attempt in 1..=MAX_ID_ATTEMPTS {
            let candidate = (self.next_id)();
            if !taken.contains(&candidate) {
                return Ok(candidate);
            }
            debug!("Tracking id {} already in use (attempt {})", candidate, attempt);
        }

        Err(StoreError::IdSpaceExhausted(MAX_ID_ATTEMPTS))
    }

    fn validate(data: &NewShipment) -> Result<(), StoreError> {
        let missing = data.missing_fields();
        if !missing.is_empty() {
            return Err(StoreError::Validation(format!(
                "missing required field(s): {}",
                missing.join(", ")
            )));
        }
        Ok(())
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for InMemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InMemoryStore")
            .field("shipments", &self.shipments.len())
            .finish_non_exhaustive()
    }
}

impl ShipmentStore for InMemoryStore {
    type Error = StoreError;

    fn list(&self) -> Vec<Shipment> {
        self.shipments.clone()
    }

    fn get(&self, id: TrackingId) -> Option<Shipment> {
        self.shipments.iter().find(|s| s.id == id).cloned()
    }

    fn search(&self, term: &str) -> Vec<Shipment> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return self.list();
        }

        let found: Vec<Shipment> = self
            .shipments
            .iter()
            .filter(|s| s.matches(&needle))
            .cloned()
            .collect();

        debug!("Search '{}' matched {} shipment(s)", needle, found.len());
        found
    }

    fn create(&mut self, data: NewShipment) -> Result<Shipment, Self::Error> {
        Self::validate(&data)?;

        let estimated_delivery = parse_timestamp(&data.estimated_delivery)
            .map_err(|e| StoreError::Validation(format!("estimated delivery: {}", e)))?;

        let id = self.allocate_id()?;
        let shipment = Shipment::book(
            id,
            data.origin.trim().to_string(),
            data.destination.trim().to_string(),
            data.carrier.trim().to_string(),
            estimated_delivery,
            self.clock.now(),
        );

        info!(
            "Created shipment {} ({} -> {}, carrier {})",
            shipment.id, shipment.origin, shipment.destination, shipment.carrier
        );

        self.shipments.insert(0, shipment.clone());
        Ok(shipment)
    }

    fn log_exception(
        &mut self,
        id: TrackingId,
        exception: ExceptionRecord,
    ) -> Result<Shipment, Self::Error> {
        if exception.description.trim().is_empty() {
            return Err(StoreError::Validation(
                "exception description must not be empty".to_string(),
            ));
        }

        let now = self.clock.now();
        let Some(shipment) = self.shipments.iter_mut().find(|s| s.id == id) else {
            warn!("Cannot log exception: shipment {} not found", id);
            return Err(StoreError::NotFound(id));
        };

        let analyzed = exception.ai_analysis.is_some();
        shipment.record_exception(exception, now);

        info!(
            "Logged exception #{} on shipment {} (analysis attached: {})",
            shipment.exceptions.len(),
            id,
            analyzed
        );

        Ok(shipment.clone())
    }
}
