//! Monthly expense trend
//!
//! Expense totals bucketed by calendar month (`YYYY-MM`), oldest first.

use std::collections::BTreeMap;

use crate::models::{Money, Transaction};

/// One month of expenses
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthBucket {
    /// Month key, `YYYY-MM`
    pub month: String,
    pub expenses: Money,
}

/// Expense totals per month, ascending by month
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MonthlyTrend {
    pub months: Vec<MonthBucket>,
}

impl MonthlyTrend {
    /// Bucket the expenses of a transaction set by month
    pub fn compute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut buckets: BTreeMap<String, Money> = BTreeMap::new();
        for txn in transactions.into_iter().filter(|t| t.is_expense()) {
            let month = txn.date.format("%Y-%m").to_string();
            *buckets.entry(month).or_default() += txn.amount;
        }

        Self {
            months: buckets
                .into_iter()
                .map(|(month, expenses)| MonthBucket { month, expenses })
                .collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Largest monthly total, used to scale bars
    pub fn peak(&self) -> Money {
        self.months
            .iter()
            .map(|m| m.expenses)
            .max()
            .unwrap_or_default()
    }
}
