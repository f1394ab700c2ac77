//! Transaction register ordering
//!
//! Amounts compare numerically; every other field compares as text
//! (dates in their ISO form, types by their lowercase name). Sorting is
//! stable, so ties keep the document order.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use crate::models::Transaction;

/// Column a register can be sorted by
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Date,
    Amount,
    Category,
    Type,
    Description,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "date" => Ok(Self::Date),
            "amount" => Ok(Self::Amount),
            "category" => Ok(Self::Category),
            "type" => Ok(Self::Type),
            "description" => Ok(Self::Description),
            other => Err(format!(
                "Unknown sort field '{}'. Use date, amount, category, type or description",
                other
            )),
        }
    }
}

impl fmt::Display for SortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Date => "date",
            Self::Amount => "amount",
            Self::Category => "category",
            Self::Type => "type",
            Self::Description => "description",
        };
        write!(f, "{}", name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    pub fn toggled(self) -> Self {
        match self {
            Self::Asc => Self::Desc,
            Self::Desc => Self::Asc,
        }
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" => Ok(Self::Asc),
            "desc" | "descending" => Ok(Self::Desc),
            other => Err(format!("Unknown sort direction '{}'. Use asc or desc", other)),
        }
    }
}

/// Sort order for a transaction register, newest first by default
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TransactionSort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TransactionSort {
    pub fn new(field: SortField, direction: SortDirection) -> Self {
        Self { field, direction }
    }

    /// Selecting the current field flips the direction; a new field starts
    /// ascending.
    pub fn select(self, field: SortField) -> Self {
        if field == self.field {
            Self::new(field, self.direction.toggled())
        } else {
            Self::new(field, SortDirection::Asc)
        }
    }

    /// Compare two transactions under this ordering
    pub fn compare(&self, a: &Transaction, b: &Transaction) -> Ordering {
        let ordering = match self.field {
            SortField::Amount => a.amount.cmp(&b.amount),
            SortField::Date => a.date.cmp(&b.date),
            SortField::Category => a.category.cmp(&b.category),
            SortField::Type => a.kind.as_str().cmp(b.kind.as_str()),
            SortField::Description => description(a).cmp(description(b)),
        };

        match self.direction {
            SortDirection::Asc => ordering,
            SortDirection::Desc => ordering.reverse(),
        }
    }

    /// Return the transactions in sorted order
    pub fn sorted<'a, I>(&self, transactions: I) -> Vec<&'a Transaction>
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut rows: Vec<&Transaction> = transactions.into_iter().collect();
        rows.sort_by(|a, b| self.compare(a, b));
        rows
    }
}

fn description(txn: &Transaction) -> &str {
    txn.description.as_deref().unwrap_or("")
}
