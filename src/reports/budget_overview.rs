//! Budget Overview Report
//!
//! Shows every budget with what has been spent against it, a progress
//! percentage and whether the limit has been crossed.

use crate::config::settings::DEFAULT_BUDGET_PERCENT_CAP;
use crate::display::truncate;
use crate::models::{Budget, Document, Money};

use super::totals::CategorySpend;

/// Progress of a single budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetProgress {
    pub budget: Budget,
    /// Expense total for the budget's category
    pub spent: Money,
    /// Spend as a rounded percentage of the limit, clamped to the cap
    pub percent: u32,
    /// Spend is strictly greater than the limit
    pub over: bool,
}

impl BudgetProgress {
    /// Compute progress for one budget
    pub fn new(budget: &Budget, spent: Money, cap: u32) -> Self {
        Self {
            budget: budget.clone(),
            spent,
            percent: progress_percent(spent, budget.limit, cap),
            over: budget.is_exceeded_by(spent),
        }
    }

    /// Headroom left under the limit (negative once overspent)
    pub fn remaining(&self) -> Money {
        self.budget.remaining(self.spent)
    }
}

/// `0` for a zero limit, else `min(cap, round(spent / limit * 100))`
pub fn progress_percent(spent: Money, limit: Money, cap: u32) -> u32 {
    if limit.is_zero() {
        return 0;
    }
    let ratio = (spent.cents() as f64 / limit.cents() as f64 * 100.0).round();
    if ratio <= 0.0 {
        0
    } else {
        ratio.min(cap as f64) as u32
    }
}

/// Budget Overview Report
#[derive(Debug, Clone)]
pub struct BudgetOverviewReport {
    pub rows: Vec<BudgetProgress>,
    pub total_limit: Money,
    pub total_spent: Money,
    /// Currency symbol used when formatting
    pub currency: String,
}

impl BudgetOverviewReport {
    /// Generate the overview using the default percentage cap
    pub fn generate(document: &Document) -> Self {
        Self::generate_with_cap(document, DEFAULT_BUDGET_PERCENT_CAP)
    }

    /// Generate the overview with an explicit percentage cap
    pub fn generate_with_cap(document: &Document, cap: u32) -> Self {
        let spend = CategorySpend::compute(&document.transactions);

        let rows: Vec<BudgetProgress> = document
            .budgets
            .iter()
            .map(|b| BudgetProgress::new(b, spend.get(&b.category), cap))
            .collect();

        let total_limit: Money = rows.iter().map(|r| r.budget.limit).sum();
        let total_spent: Money = rows.iter().map(|r| r.spent).sum();

        Self {
            rows,
            total_limit,
            total_spent,
            currency: document.profile.currency().to_string(),
        }
    }

    /// Budgets currently over their limit
    pub fn over_budget(&self) -> Vec<&BudgetProgress> {
        self.rows.iter().filter(|r| r.over).collect()
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Budgets\n");
        output.push_str(&"=".repeat(72));
        output.push('\n');

        if self.rows.is_empty() {
            output.push_str("No budgets set.\n");
            return output;
        }

        output.push_str(&format!(
            "{:<22} {:>14} {:>14} {:>8}  {}\n",
            "Category", "Spent", "Limit", "Used", "Status"
        ));
        output.push_str(&"-".repeat(72));
        output.push('\n');

        for row in &self.rows {
            let status = if row.over { "Over" } else { "Within" };
            output.push_str(&format!(
                "{:<22} {:>14} {:>14} {:>7}%  {}\n",
                truncate(&row.budget.category, 22),
                row.spent.format_with_symbol(&self.currency),
                row.budget.limit.format_with_symbol(&self.currency),
                row.percent,
                status
            ));
        }

        output.push_str(&"-".repeat(72));
        output.push('\n');
        output.push_str(&format!(
            "{:<22} {:>14} {:>14}\n",
            "TOTAL",
            self.total_spent.format_with_symbol(&self.currency),
            self.total_limit.format_with_symbol(&self.currency)
        ));

        output
    }
}
