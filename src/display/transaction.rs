//! Transaction display formatting
//!
//! Register and detail views. Amounts carry the profile currency symbol and
//! expenses are shown with a leading minus.

use crate::models::Transaction;

use super::truncate;

/// Signed amount with the currency symbol, e.g. `-₹ 1,200`
pub fn format_signed_amount(txn: &Transaction, currency: &str) -> String {
    let amount = txn.amount.format_with_symbol(currency);
    if txn.is_expense() {
        format!("-{}", amount)
    } else {
        format!("+{}", amount)
    }
}

/// Format a single transaction for display (register row)
pub fn format_transaction_row(txn: &Transaction, currency: &str, date_format: &str) -> String {
    format!(
        "{:<8} {:<10} {:<7} {:<16} {:>14}  {}",
        txn.id.as_str(),
        txn.date.format(date_format).to_string(),
        txn.kind.to_string(),
        truncate(&txn.category, 16),
        format_signed_amount(txn, currency),
        txn.description.as_deref().unwrap_or("")
    )
}

/// Format a list of transactions as a register
pub fn format_transaction_register(
    transactions: &[&Transaction],
    currency: &str,
    date_format: &str,
) -> String {
    if transactions.is_empty() {
        return "No transactions available.\n".to_string();
    }

    let mut output = String::new();
    output.push_str(&format!(
        "{:<8} {:<10} {:<7} {:<16} {:>14}  {}\n",
        "ID", "Date", "Type", "Category", "Amount", "Description"
    ));
    output.push_str(&"-".repeat(80));
    output.push('\n');

    for txn in transactions {
        output.push_str(&format_transaction_row(txn, currency, date_format));
        output.push('\n');
    }

    output.push_str(&format!("\n{} transaction(s)\n", transactions.len()));
    output
}

/// Format transaction details for display
pub fn format_transaction_details(txn: &Transaction, currency: &str, date_format: &str) -> String {
    let mut output = String::new();

    output.push_str(&format!("Transaction: {}\n", txn.id));
    output.push_str(&format!("Type:        {}\n", txn.kind));
    output.push_str(&format!("Date:        {}\n", txn.date.format(date_format)));
    output.push_str(&format!(
        "Amount:      {}\n",
        txn.amount.format_with_symbol(currency)
    ));
    output.push_str(&format!("Category:    {}\n", txn.category));

    if let Some(description) = &txn.description {
        output.push_str(&format!("Description: {}\n", description));
    }

    output
}
