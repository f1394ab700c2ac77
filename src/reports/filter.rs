//! Transaction filters
//!
//! Dates are compared as calendar dates and both bounds are inclusive.

use chrono::NaiveDate;

use crate::models::{Transaction, TransactionType};

/// Inclusive date range; a missing bound is open
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// A range with no bounds, matching everything
    pub fn all() -> Self {
        Self::default()
    }

    /// A range covering a single day
    pub fn day(date: NaiveDate) -> Self {
        Self::new(Some(date), Some(date))
    }

    pub fn is_unbounded(&self) -> bool {
        self.from.is_none() && self.to.is_none()
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        if let Some(from) = self.from {
            if date < from {
                return false;
            }
        }
        if let Some(to) = self.to {
            if date > to {
                return false;
            }
        }
        true
    }

    /// Transactions dated within the range, in document order
    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.contains(t.date)).collect()
    }

    /// Short label such as `2025-11-01 .. 2025-11-30` or `all dates`
    pub fn label(&self) -> String {
        match (self.from, self.to) {
            (None, None) => "all dates".to_string(),
            (Some(from), None) => format!("from {}", from),
            (None, Some(to)) => format!("until {}", to),
            (Some(from), Some(to)) => format!("{} .. {}", from, to),
        }
    }
}

/// Filter options for the transaction list
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    pub range: DateRange,
    pub kind: Option<TransactionType>,
    /// Case-insensitive exact category match
    pub category: Option<String>,
}

impl TransactionFilter {
    /// Check if a transaction matches this filter
    pub fn matches(&self, txn: &Transaction) -> bool {
        if !self.range.contains(txn.date) {
            return false;
        }

        if let Some(kind) = self.kind {
            if txn.kind != kind {
                return false;
            }
        }

        if let Some(ref category) = self.category {
            if !txn.category.eq_ignore_ascii_case(category.trim()) {
                return false;
            }
        }

        true
    }

    pub fn apply<'a>(&self, transactions: &'a [Transaction]) -> Vec<&'a Transaction> {
        transactions.iter().filter(|t| self.matches(t)).collect()
    }
}
