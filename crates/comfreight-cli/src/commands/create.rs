//! Create command implementation.

use crate::cli::CreateArgs;
use crate::error::Result;
use crate::output::Formatter;
use comfreight_domain::traits::ShipmentStore;
use comfreight_domain::{NewShipment, Shipment};
use comfreight_store::InMemoryStore;

/// Execute the create command.
pub fn execute_create(
    args: CreateArgs,
    store: &mut InMemoryStore,
    formatter: &Formatter,
) -> Result<Shipment> {
    let data = NewShipment::new(args.origin, args.destination, args.carrier, args.eta);
    let shipment = store.create(data)?;

    if formatter.is_verbose() {
        println!("{}", formatter.shipment_created(&shipment.id));
    }
    println!("{}", formatter.format_shipment(&shipment)?);

    Ok(shipment)
}
