//! Budget model
//!
//! A spending limit for one category. The budget collection holds at most one
//! budget per category; the store enforces this when setting a limit.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::BudgetId;
use super::money::Money;

/// A spending limit for a category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Category this budget applies to (unique across budgets)
    pub category: String,

    /// Spending limit for the category
    pub limit: Money,
}

impl Budget {
    /// Create a new budget with a fresh id
    pub fn new(category: impl Into<String>, limit: Money) -> Self {
        Self {
            id: BudgetId::new(),
            category: category.into(),
            limit,
        }
    }

    /// Check whether the given spend is strictly over the limit
    pub fn is_exceeded_by(&self, spent: Money) -> bool {
        spent > self.limit
    }

    /// Remaining headroom (negative once overspent)
    pub fn remaining(&self, spent: Money) -> Money {
        self.limit - spent
    }

    /// Validate a prospective category/limit pair
    pub fn validate(category: &str, limit: Money) -> Result<(), BudgetValidationError> {
        if category.trim().is_empty() {
            return Err(BudgetValidationError::MissingCategory);
        }
        if limit.is_negative() {
            return Err(BudgetValidationError::NegativeLimit);
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (limit {})", self.category, self.limit)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    MissingCategory,
    NegativeLimit,
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingCategory => write!(f, "Category is required"),
            Self::NegativeLimit => write!(f, "Budget limit cannot be negative"),
        }
    }
}

impl std::error::Error for BudgetValidationError {}
