//! CLI command handlers
//!
//! This module contains the implementation of CLI commands, bridging the
//! clap argument parsing with the finance store. Form-level validation of
//! user input happens here before anything reaches the store.

pub mod budget;
pub mod dashboard;
pub mod history;
pub mod profile;
pub mod transaction;

pub use budget::{handle_budget_command, BudgetCommands};
pub use dashboard::handle_dashboard_command;
pub use history::handle_history_command;
pub use profile::{handle_profile_command, ProfileCommands};
pub use transaction::{handle_transaction_command, TransactionCommands};

use chrono::NaiveDate;

use crate::display::format_notification;
use crate::error::{FinanceError, FinanceResult};
use crate::models::{Money, TransactionId, TransactionType};
use crate::store::{EventSink, FinanceEvent, FinanceStore};
use crate::storage::KeyValueStorage;

/// Sink that prints notifications to stderr
pub fn stderr_notifier() -> impl EventSink {
    |event: &FinanceEvent| eprintln!("{}", format_notification(event))
}

/// Parse a non-negative amount such as `1200`, `12.50` or `₹1,200`
pub fn parse_amount(input: &str) -> FinanceResult<Money> {
    let amount = Money::parse(input).map_err(|e| {
        FinanceError::Validation(format!(
            "Invalid amount: '{}'. Use a number like '1200' or '12.50'. Error: {}",
            input, e
        ))
    })?;

    if amount.is_negative() {
        return Err(FinanceError::Validation(format!(
            "Amount cannot be negative: '{}'",
            input
        )));
    }

    Ok(amount)
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_date(input: &str) -> FinanceResult<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), "%Y-%m-%d").map_err(|_| {
        FinanceError::Validation(format!("Invalid date: '{}'. Use YYYY-MM-DD", input))
    })
}

pub fn parse_optional_date(input: Option<&str>) -> FinanceResult<Option<NaiveDate>> {
    input.map(parse_date).transpose()
}

/// Parse `income` or `expense`
pub fn parse_type(input: &str) -> FinanceResult<TransactionType> {
    TransactionType::parse(input).ok_or_else(|| {
        FinanceError::Validation(format!(
            "Invalid transaction type: '{}'. Use 'income' or 'expense'",
            input
        ))
    })
}

/// Resolve a transaction id from an exact id or a unique prefix
pub fn resolve_transaction_id<S: KeyValueStorage>(
    store: &FinanceStore<S>,
    input: &str,
) -> FinanceResult<TransactionId> {
    let input = input.trim();
    if input.is_empty() {
        return Err(FinanceError::Validation(
            "Transaction ID cannot be empty".into(),
        ));
    }

    let id = TransactionId::from(input);
    if store.transaction(&id).is_some() {
        return Ok(id);
    }

    let matches: Vec<&TransactionId> = store
        .transactions()
        .iter()
        .map(|t| &t.id)
        .filter(|id| id.as_str().starts_with(input))
        .collect();

    match matches.as_slice() {
        [only] => Ok((*only).clone()),
        [] => Err(FinanceError::transaction_not_found(input)),
        _ => Err(FinanceError::Validation(format!(
            "Transaction ID prefix '{}' is ambiguous ({} matches)",
            input,
            matches.len()
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::NewTransaction;
    use crate::storage::MemoryStorage;

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("1200").unwrap(), Money::from_units(1200));
        assert_eq!(parse_amount("₹1,200.5").unwrap(), Money::from_cents(120050));
        assert_eq!(parse_amount("0").unwrap(), Money::zero());
        assert!(parse_amount("-5").unwrap_err().is_validation());
        assert!(parse_amount("").is_err());
        assert!(parse_amount("abc").is_err());
        assert!(parse_amount("abc12").is_err());
        assert!(parse_amount("₹-10").unwrap_err().is_validation());
        assert!(parse_amount("50000000000000000").unwrap_err().is_validation());
    }

    #[test]
    fn test_parse_date() {
        assert_eq!(
            parse_date("2025-11-02").unwrap(),
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap()
        );
        assert!(parse_date("02/11/2025").is_err());
        assert!(parse_optional_date(None).unwrap().is_none());
    }

    #[test]
    fn test_parse_type() {
        assert_eq!(parse_type("Income").unwrap(), TransactionType::Income);
        assert!(parse_type("transfer").is_err());
    }

    #[test]
    fn test_resolve_transaction_id() {
        let mut store = FinanceStore::open(MemoryStorage::new());
        let txn = store
            .add_transaction(NewTransaction::new(
                TransactionType::Expense,
                Money::from_units(10),
                "Other",
                NaiveDate::from_ymd_opt(2025, 11, 3).unwrap(),
            ))
            .unwrap();

        assert_eq!(resolve_transaction_id(&store, "t2").unwrap().as_str(), "t2");
        assert_eq!(
            resolve_transaction_id(&store, &txn.id.as_str()[..8]).unwrap(),
            txn.id
        );
        // Every sample id starts with "t"
        assert!(resolve_transaction_id(&store, "t").unwrap_err().is_validation());
        assert!(resolve_transaction_id(&store, "zzz").unwrap_err().is_not_found());
    }
}
