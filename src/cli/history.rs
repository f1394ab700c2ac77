//! `history` command

use crate::audit::AuditLog;
use crate::error::FinanceResult;

/// Print the latest `count` audit entries, oldest first
pub fn handle_history_command(log: &AuditLog, count: usize) -> FinanceResult<()> {
    let entries = log.tail(count)?;

    if entries.is_empty() {
        println!("No changes recorded yet.");
        return Ok(());
    }

    for entry in &entries {
        println!("{}", entry);
    }

    let total = log.len()?;
    if total > entries.len() {
        println!("\nShowing {} of {} entries", entries.len(), total);
    }

    Ok(())
}
