//! Command implementations.

pub mod analyze;
pub mod create;
pub mod list;
pub mod log_exception;
pub mod search;
pub mod show;

pub use self::analyze::execute_analyze;
pub use self::create::execute_create;
pub use self::list::execute_list;
pub use self::log_exception::execute_log_exception;
pub use self::search::execute_search;
pub use self::show::execute_show;

use crate::error::{CliError, Result};
use comfreight_domain::TrackingId;

/// Parse a tracking id typed by the user.
pub fn parse_tracking_id(input: &str) -> Result<TrackingId> {
    TrackingId::from_string(input).map_err(CliError::InvalidInput)
}
