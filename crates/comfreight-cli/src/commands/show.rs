//! Show command implementation.

use super::parse_tracking_id;
use crate::cli::ShowArgs;
use crate::error::Result;
use crate::output::Formatter;
use comfreight_domain::traits::ShipmentStore;
use comfreight_domain::Shipment;
use comfreight_store::{InMemoryStore, StoreError};

/// Execute the show command.
pub fn execute_show(
    args: ShowArgs,
    store: &InMemoryStore,
    formatter: &Formatter,
) -> Result<Shipment> {
    let id = parse_tracking_id(&args.id)?;
    let shipment = store.get(id).ok_or(StoreError::NotFound(id))?;

    println!("{}", formatter.format_shipment(&shipment)?);

    Ok(shipment)
}
