//! Core data models for fintrack
//!
//! This module contains the data structures that make up the finance document:
//! transactions, category budgets and the user profile.

pub mod budget;
pub mod document;
pub mod ids;
pub mod money;
pub mod profile;
pub mod transaction;

pub use budget::{Budget, BudgetValidationError};
pub use document::Document;
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError, MAX_UNITS};
pub use profile::{Profile, ProfilePatch, SUPPORTED_CURRENCIES};
pub use transaction::{
    NewTransaction, Transaction, TransactionPatch, TransactionType, TransactionValidationError,
};
