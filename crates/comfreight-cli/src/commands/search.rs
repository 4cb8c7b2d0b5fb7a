//! Search command implementation.

use crate::cli::SearchArgs;
use crate::error::Result;
use crate::output::Formatter;
use comfreight_domain::traits::ShipmentStore;
use comfreight_domain::Shipment;
use comfreight_store::InMemoryStore;

/// Execute the search command.
pub fn execute_search(
    args: SearchArgs,
    store: &InMemoryStore,
    formatter: &Formatter,
) -> Result<Vec<Shipment>> {
    let matches = store.search(&args.term);

    if formatter.is_verbose() && !args.term.trim().is_empty() {
        println!(
            "{}",
            formatter.info(&format!(
                "{} shipment(s) matching '{}'",
                matches.len(),
                args.term.trim()
            ))
        );
    }
    println!("{}", formatter.format_shipments(&matches)?);

    Ok(matches)
}
