//! Transaction CLI commands
//!
//! Implements CLI commands for transaction management.

use chrono::Local;
use clap::Subcommand;

use crate::config::settings::Settings;
use crate::display::transaction::{format_transaction_details, format_transaction_register};
use crate::error::{FinanceError, FinanceResult};
use crate::models::{NewTransaction, TransactionPatch};
use crate::reports::{DateRange, SortDirection, SortField, TransactionFilter, TransactionSort};
use crate::store::FinanceStore;
use crate::storage::KeyValueStorage;

use super::{parse_amount, parse_date, parse_optional_date, parse_type, resolve_transaction_id};

/// Transaction subcommands
#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Amount (e.g., "1200" or "12.50")
        amount: String,
        /// income or expense
        #[arg(short = 't', long = "type", default_value = "expense")]
        kind: String,
        /// Category name
        #[arg(short, long, default_value = "Groceries")]
        category: String,
        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(short, long)]
        date: Option<String>,
        /// Description
        #[arg(short = 'm', long)]
        description: Option<String>,
    },
    /// List transactions
    List {
        /// Start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// End date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
        /// Only income or only expense
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// Filter by category name
        #[arg(short, long)]
        category: Option<String>,
        /// Sort by date, amount, category, type or description
        #[arg(short, long, default_value = "date")]
        sort: String,
        /// Sort direction (asc or desc)
        #[arg(short, long, default_value = "desc")]
        order: String,
        /// Number of transactions to show
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Show transaction details
    Show {
        /// Transaction ID (or a unique prefix)
        id: String,
    },
    /// Edit a transaction
    Edit {
        /// Transaction ID (or a unique prefix)
        id: String,
        /// New type
        #[arg(short = 't', long = "type")]
        kind: Option<String>,
        /// New amount
        #[arg(short, long)]
        amount: Option<String>,
        /// New category
        #[arg(short, long)]
        category: Option<String>,
        /// New date
        #[arg(short, long)]
        date: Option<String>,
        /// New description
        #[arg(short = 'm', long, conflicts_with = "clear_description")]
        description: Option<String>,
        /// Remove the description
        #[arg(long)]
        clear_description: bool,
    },
    /// Delete a transaction
    Delete {
        /// Transaction ID (or a unique prefix)
        id: String,
    },
}

/// Handle a transaction command
pub fn handle_transaction_command<S: KeyValueStorage>(
    store: &mut FinanceStore<S>,
    settings: &Settings,
    cmd: TransactionCommands,
) -> FinanceResult<()> {
    let currency = store.profile().currency().to_string();

    match cmd {
        TransactionCommands::Add {
            amount,
            kind,
            category,
            date,
            description,
        } => {
            let kind = parse_type(&kind)?;
            let amount = parse_amount(&amount)?;
            let date = match date {
                Some(date) => parse_date(&date)?,
                None => Local::now().date_naive(),
            };

            let mut input = NewTransaction::new(kind, amount, category.trim(), date);
            if let Some(description) = description.filter(|d| !d.trim().is_empty()) {
                input = input.with_description(description);
            }
            input
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;

            let txn = store.add_transaction(input)?;
            println!("Added transaction {}", txn.id);
            println!(
                "  {} {} {}",
                txn.kind,
                txn.category,
                txn.amount.format_with_symbol(&currency)
            );
        }

        TransactionCommands::List {
            from,
            to,
            kind,
            category,
            sort,
            order,
            limit,
        } => {
            let filter = TransactionFilter {
                range: DateRange::new(
                    parse_optional_date(from.as_deref())?,
                    parse_optional_date(to.as_deref())?,
                ),
                kind: kind.as_deref().map(parse_type).transpose()?,
                category,
            };

            let field: SortField = sort.parse().map_err(FinanceError::Validation)?;
            let direction: SortDirection = order.parse().map_err(FinanceError::Validation)?;

            let mut rows =
                TransactionSort::new(field, direction).sorted(filter.apply(store.transactions()));
            if let Some(limit) = limit {
                rows.truncate(limit);
            }

            print!(
                "{}",
                format_transaction_register(&rows, &currency, &settings.date_format)
            );
        }

        TransactionCommands::Show { id } => {
            let id = resolve_transaction_id(store, &id)?;
            let txn = store
                .transaction(&id)
                .ok_or_else(|| FinanceError::transaction_not_found(id.as_str()))?;
            print!(
                "{}",
                format_transaction_details(txn, &currency, &settings.date_format)
            );
        }

        TransactionCommands::Edit {
            id,
            kind,
            amount,
            category,
            date,
            description,
            clear_description,
        } => {
            let id = resolve_transaction_id(store, &id)?;

            let mut patch = TransactionPatch::new();
            if let Some(kind) = kind {
                patch = patch.kind(parse_type(&kind)?);
            }
            if let Some(amount) = amount {
                patch = patch.amount(parse_amount(&amount)?);
            }
            if let Some(category) = category {
                patch = patch.category(category.trim());
            }
            if let Some(date) = date {
                patch = patch.date(parse_date(&date)?);
            }
            if clear_description {
                patch = patch.description(None);
            } else if let Some(description) = description {
                let description = Some(description).filter(|d| !d.trim().is_empty());
                patch = patch.description(description);
            }

            if patch.is_empty() {
                println!("No changes specified.");
                return Ok(());
            }
            patch
                .validate()
                .map_err(|e| FinanceError::Validation(e.to_string()))?;

            let txn = store
                .update_transaction(&id, patch)?
                .ok_or_else(|| FinanceError::transaction_not_found(id.as_str()))?;
            println!("Updated transaction {}", txn.id);
            print!(
                "{}",
                format_transaction_details(&txn, &currency, &settings.date_format)
            );
        }

        TransactionCommands::Delete { id } => {
            let id = resolve_transaction_id(store, &id)?;
            if store.delete_transaction(&id)? {
                println!("Deleted transaction {}", id);
            } else {
                return Err(FinanceError::transaction_not_found(id.as_str()));
            }
        }
    }

    Ok(())
}
