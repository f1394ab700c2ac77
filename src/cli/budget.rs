//! Budget CLI commands
//!
//! Implements CLI commands for setting category limits and reviewing
//! progress against them.

use clap::Subcommand;

use crate::config::settings::Settings;
use crate::error::{FinanceError, FinanceResult};
use crate::models::Budget;
use crate::reports::BudgetOverviewReport;
use crate::store::FinanceStore;
use crate::storage::KeyValueStorage;

use super::parse_amount;

/// Budget subcommands
#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Set the spending limit for a category (creates the budget if needed)
    Set {
        /// Category name
        category: String,
        /// Limit (e.g., "10000")
        limit: String,
    },

    /// Show every budget with spend and progress
    #[command(alias = "ls")]
    List,
}

/// Handle a budget command
pub fn handle_budget_command<S: KeyValueStorage>(
    store: &mut FinanceStore<S>,
    settings: &Settings,
    cmd: BudgetCommands,
) -> FinanceResult<()> {
    match cmd {
        BudgetCommands::Set { category, limit } => {
            let category = category.trim();
            let limit = parse_amount(&limit)?;
            Budget::validate(category, limit)
                .map_err(|e| FinanceError::Validation(e.to_string()))?;

            let existed = store.budget_for(category).is_some();
            let budget = store.set_budget(category, limit)?;
            let verb = if existed { "Updated" } else { "Created" };
            println!(
                "{} budget for {}: {}",
                verb,
                budget.category,
                budget.limit.format_with_symbol(store.profile().currency())
            );
        }

        BudgetCommands::List => {
            let report =
                BudgetOverviewReport::generate_with_cap(store.document(), settings.budget_percent_cap);
            print!("{}", report.format_terminal());
        }
    }

    Ok(())
}
