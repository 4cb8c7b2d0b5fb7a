//! Log-exception command implementation.

use super::parse_tracking_id;
use crate::cli::LogExceptionArgs;
use crate::error::Result;
use crate::output::Formatter;
use comfreight_analyzer::{Applied, ExceptionAnalyzer, ExceptionDraft};
use comfreight_domain::traits::{LlmProvider, ShipmentStore};
use comfreight_domain::Shipment;
use comfreight_store::{InMemoryStore, StoreError};

/// Execute the log-exception command.
///
/// When an analyzer is supplied the description is analyzed first. An
/// analysis failure is reported but does not stop the exception from
/// being logged.
pub async fn execute_log_exception<L>(
    args: LogExceptionArgs,
    store: &mut InMemoryStore,
    analyzer: Option<&ExceptionAnalyzer<L>>,
    formatter: &Formatter,
) -> Result<Shipment>
where
    L: LlmProvider + Sync,
    L::Error: std::fmt::Display,
{
    let id = parse_tracking_id(&args.id)?;
    // Fail before spending an analysis call on an unknown shipment
    if store.get(id).is_none() {
        return Err(StoreError::NotFound(id).into());
    }

    let mut draft = ExceptionDraft::new();
    draft.set_description(args.description);

    if let Some(analyzer) = analyzer {
        match analyzer.analyze_draft(&mut draft).await? {
            Applied::Analysis if formatter.is_verbose() => {
                if let Some(analysis) = draft.analysis() {
                    println!("{}", formatter.format_analysis(analysis)?);
                }
            }
            Applied::Unavailable | Applied::Failed => {
                let message = draft.error().unwrap_or_default();
                eprintln!("{}", formatter.warning(message));
            }
            Applied::Analysis | Applied::Discarded => {}
        }
    }

    let record = draft.submit(store.now())?;
    let shipment = store.log_exception(id, record)?;

    if formatter.is_verbose() {
        println!("{}", formatter.exception_logged(&shipment.id));
    }
    println!("{}", formatter.format_shipment(&shipment)?);

    Ok(shipment)
}
