//! Transaction model
//!
//! Represents a single income or expense entry. A transaction is identified by
//! its id; every other field may be replaced through a [`TransactionPatch`].

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::TransactionId;
use super::money::Money;

/// Whether money came in or went out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    #[default]
    Expense,
}

impl TransactionType {
    /// Parse a type from user input ("income", "expense", "in", "out")
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "income" | "in" => Some(Self::Income),
            "expense" | "out" => Some(Self::Expense),
            _ => None,
        }
    }

    /// The lowercase name used on disk
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "Income"),
            Self::Expense => write!(f, "Expense"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    /// Unique identifier
    pub id: TransactionId,

    /// Income or expense
    #[serde(rename = "type")]
    pub kind: TransactionType,

    /// Amount, always non-negative; the direction comes from `kind`
    pub amount: Money,

    /// Free-text category label
    pub category: String,

    /// Calendar date of the transaction
    pub date: NaiveDate,

    /// Optional note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Transaction {
    /// Build a transaction with a fresh id from creation input
    pub fn from_input(input: NewTransaction) -> Self {
        Self {
            id: TransactionId::new(),
            kind: input.kind,
            amount: input.amount,
            category: input.category,
            date: input.date,
            description: input.description,
        }
    }

    /// Check if this is an income entry
    pub fn is_income(&self) -> bool {
        self.kind == TransactionType::Income
    }

    /// Check if this is an expense entry
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionType::Expense
    }

    /// Merge the supplied fields of a patch into this transaction.
    ///
    /// The id is never touched.
    pub fn apply(&mut self, patch: TransactionPatch) {
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(amount) = patch.amount {
            self.amount = amount;
        }
        if let Some(category) = patch.category {
            self.category = category;
        }
        if let Some(date) = patch.date {
            self.date = date;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.date.format("%Y-%m-%d"),
            self.kind,
            self.category,
            self.amount
        )
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    pub kind: TransactionType,
    pub amount: Money,
    pub category: String,
    pub date: NaiveDate,
    pub description: Option<String>,
}

impl NewTransaction {
    /// Create input with the required fields
    pub fn new(
        kind: TransactionType,
        amount: Money,
        category: impl Into<String>,
        date: NaiveDate,
    ) -> Self {
        Self {
            kind,
            amount,
            category: category.into(),
            date,
            description: None,
        }
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Form-level validation: non-negative amount and a category
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount);
        }
        if self.category.trim().is_empty() {
            return Err(TransactionValidationError::MissingCategory);
        }
        Ok(())
    }
}

/// Partial update for a transaction; `None` leaves a field unchanged.
///
/// `description` is doubly optional so a patch can clear it with
/// `Some(None)`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionPatch {
    pub kind: Option<TransactionType>,
    pub amount: Option<Money>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<Option<String>>,
}

impl TransactionPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn kind(mut self, kind: TransactionType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn amount(mut self, amount: Money) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn description(mut self, description: Option<String>) -> Self {
        self.description = Some(description);
        self
    }

    /// Check if the patch would change nothing
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Form-level validation of the supplied fields
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_some_and(|amount| amount.is_negative()) {
            return Err(TransactionValidationError::NegativeAmount);
        }
        if let Some(category) = &self.category {
            if category.trim().is_empty() {
                return Err(TransactionValidationError::MissingCategory);
            }
        }
        Ok(())
    }
}

/// Validation errors for transaction input
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount,
    MissingCategory,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount => write!(f, "Amount cannot be negative"),
            Self::MissingCategory => write!(f, "Category is required"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn salary() -> Transaction {
        Transaction {
            id: TransactionId::from("t1"),
            kind: TransactionType::Income,
            amount: Money::from_units(30000),
            category: "Salary".into(),
            date: date(2025, 11, 1),
            description: Some("Monthly salary".into()),
        }
    }

    #[test]
    fn test_from_input_assigns_fresh_id() {
        let input = NewTransaction::new(
            TransactionType::Expense,
            Money::from_units(250),
            "Transport",
            date(2025, 11, 3),
        );
        let a = Transaction::from_input(input.clone());
        let b = Transaction::from_input(input);
        assert_ne!(a.id, b.id);
        assert!(a.is_expense());
        assert_eq!(a.description, None);
    }

    #[test]
    fn test_apply_only_overwrites_supplied_fields() {
        let mut txn = salary();
        txn.apply(TransactionPatch::new().amount(Money::from_units(35000)));

        assert_eq!(txn.id.as_str(), "t1");
        assert_eq!(txn.kind, TransactionType::Income);
        assert_eq!(txn.amount, Money::from_units(35000));
        assert_eq!(txn.category, "Salary");
        assert_eq!(txn.date, date(2025, 11, 1));
        assert_eq!(txn.description.as_deref(), Some("Monthly salary"));
    }

    #[test]
    fn test_apply_can_clear_description() {
        let mut txn = salary();
        txn.apply(TransactionPatch::new().description(None));
        assert_eq!(txn.description, None);
    }

    #[test]
    fn test_empty_patch() {
        assert!(TransactionPatch::new().is_empty());
        assert!(!TransactionPatch::new().category("Rent").is_empty());
    }

    #[test]
    fn test_serialization_uses_type_key() {
        let json = serde_json::to_value(salary()).unwrap();
        assert_eq!(json["type"], "income");
        assert_eq!(json["amount"], 30000);
        assert_eq!(json["date"], "2025-11-01");
        assert_eq!(json["description"], "Monthly salary");
    }

    #[test]
    fn test_missing_description_is_omitted() {
        let mut txn = salary();
        txn.description = None;
        let json = serde_json::to_value(&txn).unwrap();
        assert!(json.get("description").is_none());
    }

    #[test]
    fn test_deserialize_without_description() {
        let json = r#"{"id":"x","type":"expense","amount":99,"category":"Other","date":"2025-01-31"}"#;
        let txn: Transaction = serde_json::from_str(json).unwrap();
        assert!(txn.is_expense());
        assert_eq!(txn.description, None);
    }

    #[test]
    fn test_validation() {
        let ok = NewTransaction::new(
            TransactionType::Expense,
            Money::from_units(10),
            "Groceries",
            date(2025, 1, 1),
        );
        assert!(ok.validate().is_ok());

        let mut zero = ok.clone();
        zero.amount = Money::zero();
        assert!(zero.validate().is_ok());

        let mut negative = ok.clone();
        negative.amount = Money::from_units(-10);
        assert_eq!(
            negative.validate(),
            Err(TransactionValidationError::NegativeAmount)
        );

        let mut blank_category = ok;
        blank_category.category = "  ".into();
        assert_eq!(
            blank_category.validate(),
            Err(TransactionValidationError::MissingCategory)
        );
    }

    #[test]
    fn test_patch_validation() {
        assert!(TransactionPatch::new().validate().is_ok());
        assert!(TransactionPatch::new()
            .amount(Money::from_units(-1))
            .validate()
            .is_err());
        assert!(TransactionPatch::new().category("").validate().is_err());
    }

    #[test]
    fn test_type_parse() {
        assert_eq!(TransactionType::parse("Income"), Some(TransactionType::Income));
        assert_eq!(TransactionType::parse("out"), Some(TransactionType::Expense));
        assert_eq!(TransactionType::parse("transfer"), None);
    }
}
