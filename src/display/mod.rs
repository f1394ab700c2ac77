//! Display formatting for terminal output
//!
//! Formats transactions, the profile and store notifications for the
//! terminal. Report views format themselves.

pub mod profile;
pub mod transaction;

pub use profile::format_profile;
pub use transaction::{
    format_signed_amount, format_transaction_details, format_transaction_register,
    format_transaction_row,
};

use crate::store::{FinanceEvent, Severity};

/// One-line notification, e.g. `[!] Budget exceeded for Transport`
pub fn format_notification(event: &FinanceEvent) -> String {
    let marker = match event.severity() {
        Severity::Success => "[ok]",
        Severity::Info => "[i]",
        Severity::Error => "[!]",
    };
    format!("{} {}", marker, event.message())
}

/// Truncate a string to at most `max` characters, marking the cut with `...`
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
