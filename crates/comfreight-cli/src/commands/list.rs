//! List command implementation.

use crate::error::Result;
use crate::output::Formatter;
use comfreight_domain::traits::ShipmentStore;
use comfreight_store::InMemoryStore;

/// Execute the list command.
pub fn execute_list(store: &InMemoryStore, formatter: &Formatter) -> Result<()> {
    println!("{}", formatter.format_shipments(&store.list())?);
    Ok(())
}
