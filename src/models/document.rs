//! The finance document
//!
//! All persisted application state lives in one [`Document`]: the transaction
//! list (newest-added first), the budget list and the profile. The whole
//! document is the unit of persistence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::budget::Budget;
use super::ids::{BudgetId, TransactionId};
use super::money::Money;
use super::profile::Profile;
use super::transaction::{Transaction, TransactionType};

/// The complete persisted state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub transactions: Vec<Transaction>,
    pub budgets: Vec<Budget>,
    pub profile: Profile,
}

impl Document {
    /// Parse a document from its JSON text
    pub fn from_json(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Serialize the document to pretty-printed JSON text
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// The built-in document used when nothing has been persisted yet
    pub fn sample() -> Self {
        let date = |d: u32| NaiveDate::from_ymd_opt(2025, 11, d).unwrap_or_default();
        let txn = |id: &str, kind, units, category: &str, day, description: &str| Transaction {
            id: TransactionId::from(id),
            kind,
            amount: Money::from_units(units),
            category: category.into(),
            date: date(day),
            description: Some(description.into()),
        };
        let budget = |id: &str, category: &str, units| Budget {
            id: BudgetId::from(id),
            category: category.into(),
            limit: Money::from_units(units),
        };

        Self {
            transactions: vec![
                txn("t1", TransactionType::Income, 30000, "Salary", 1, "Monthly salary"),
                txn("t2", TransactionType::Expense, 4000, "Groceries", 2, "Monthly groceries"),
                txn("t3", TransactionType::Expense, 1200, "Transport", 2, "Cab rides"),
                txn("t4", TransactionType::Income, 5000, "Freelance", 5, "Design project"),
            ],
            budgets: vec![
                budget("b1", "Groceries", 10000),
                budget("b2", "Transport", 3000),
                budget("b3", "Entertainment", 5000),
            ],
            profile: Profile {
                name: "Aarav Mehta".into(),
                email: "aarav.mehta@example.com".into(),
                default_currency: "₹".into(),
            },
        }
    }

    /// Find a transaction by id
    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.transactions.iter().find(|t| &t.id == id)
    }

    /// Find the budget for a category
    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.budgets.iter().find(|b| b.category == category)
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::sample()
    }
}
