//! Dashboard CLI command

use chrono::Local;

use crate::error::{FinanceError, FinanceResult};
use crate::reports::{DashboardReport, DateRange};
use crate::store::FinanceStore;
use crate::storage::KeyValueStorage;

use super::parse_optional_date;

/// Print the dashboard for an optional date range
pub fn handle_dashboard_command<S: KeyValueStorage>(
    store: &FinanceStore<S>,
    from: Option<&str>,
    to: Option<&str>,
) -> FinanceResult<()> {
    let range = DateRange::new(parse_optional_date(from)?, parse_optional_date(to)?);
    if let (Some(from), Some(to)) = (range.from, range.to) {
        if from > to {
            return Err(FinanceError::Validation(format!(
                "Start date {} is after end date {}",
                from, to
            )));
        }
    }

    let report = DashboardReport::generate(store.document(), range, Local::now().date_naive());
    print!("{}", report.format_terminal());

    Ok(())
}
