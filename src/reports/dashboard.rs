//! Dashboard Report
//!
//! Headline totals for the whole document, plus the monthly trend, category
//! breakdown and today's expenses for the selected date range.

use chrono::NaiveDate;

use crate::models::{Document, Money, Transaction};

use super::filter::DateRange;
use super::totals::{CategorySpend, Totals};
use super::trend::MonthlyTrend;

/// Widest bar drawn in the trend and category charts
const BAR_WIDTH: usize = 30;

/// Dashboard Report
#[derive(Debug, Clone)]
pub struct DashboardReport {
    /// Totals over every transaction and budget
    pub totals: Totals,
    pub range: DateRange,
    /// Expenses per month within the range
    pub trend: MonthlyTrend,
    /// Expenses per category within the range
    pub categories: CategorySpend,
    /// Expenses within the range dated `today`
    pub todays_expenses: Vec<Transaction>,
    pub today: NaiveDate,
    pub currency: String,
}

impl DashboardReport {
    /// Generate the dashboard for a date range as seen on `today`
    pub fn generate(document: &Document, range: DateRange, today: NaiveDate) -> Self {
        let filtered = range.apply(&document.transactions);

        let todays_expenses = filtered
            .iter()
            .filter(|t| t.is_expense() && t.date == today)
            .map(|t| (*t).clone())
            .collect();

        Self {
            totals: Totals::compute(document),
            range,
            trend: MonthlyTrend::compute(filtered.iter().copied()),
            categories: CategorySpend::compute(filtered.iter().copied()),
            todays_expenses,
            today,
            currency: document.profile.currency().to_string(),
        }
    }

    /// Sum of today's expenses
    pub fn todays_total(&self) -> Money {
        self.todays_expenses.iter().map(|t| t.amount).sum()
    }

    fn money(&self, amount: Money) -> String {
        amount.format_with_symbol(&self.currency)
    }

    /// Format the report for terminal display
    pub fn format_terminal(&self) -> String {
        let mut output = String::new();

        output.push_str("Dashboard\n");
        output.push_str(&"=".repeat(60));
        output.push('\n');

        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Total Income:",
            self.money(self.totals.total_income)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Total Expenses:",
            self.money(self.totals.total_expenses)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Remaining Budget:",
            self.money(self.totals.remaining_budget)
        ));
        output.push_str(&format!(
            "{:<20} {:>20}\n",
            "Savings:",
            self.money(self.totals.savings)
        ));

        output.push_str(&format!("\nRange: {}\n", self.range.label()));

        output.push_str("\nMonthly Spending Trend\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.trend.is_empty() {
            output.push_str("No expense data in this range.\n");
        } else {
            let peak = self.trend.peak();
            for bucket in &self.trend.months {
                output.push_str(&format!(
                    "{:<9} {:>14}  {}\n",
                    bucket.month,
                    self.money(bucket.expenses),
                    bar(bucket.expenses, peak)
                ));
            }
        }

        output.push_str("\nExpense by Category\n");
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.categories.is_empty() {
            output.push_str("No expense data to display.\n");
        } else {
            let total = self.categories.total();
            for (category, amount) in self.categories.ranked() {
                let share = if total.is_zero() {
                    0.0
                } else {
                    amount.cents() as f64 / total.cents() as f64 * 100.0
                };
                output.push_str(&format!(
                    "{:<20} {:>14} {:>6.1}%\n",
                    category,
                    self.money(amount),
                    share
                ));
            }
        }

        output.push_str(&format!("\nToday's Expenses ({})\n", self.today));
        output.push_str(&"-".repeat(60));
        output.push('\n');
        if self.todays_expenses.is_empty() {
            output.push_str("No expenses recorded today.\n");
        } else {
            for txn in &self.todays_expenses {
                output.push_str(&format!(
                    "{:<20} {:>14}  {}\n",
                    txn.category,
                    self.money(txn.amount),
                    txn.description.as_deref().unwrap_or("")
                ));
            }
            output.push_str(&format!(
                "{:<20} {:>14}\n",
                "Total",
                self.money(self.todays_total())
            ));
        }

        output
    }
}

fn bar(amount: Money, peak: Money) -> String {
    if peak.cents() <= 0 || amount.cents() <= 0 {
        return String::new();
    }
    let len = (amount.cents() as f64 / peak.cents() as f64 * BAR_WIDTH as f64).round() as usize;
    "#".repeat(len.max(1))
}
