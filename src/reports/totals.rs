//! Headline totals and per-category spend
//!
//! Both views are recomputed from the document on every call.

use std::collections::BTreeMap;

use crate::models::{Budget, Document, Money, Transaction};

/// Aggregate figures shown on the dashboard and profile
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub total_income: Money,
    pub total_expenses: Money,
    pub total_budget: Money,
    /// `total_budget - total_expenses`
    pub remaining_budget: Money,
    /// `total_income - total_expenses`
    pub savings: Money,
}

impl Totals {
    /// Compute totals over a document
    pub fn compute(document: &Document) -> Self {
        Self::from_parts(&document.transactions, &document.budgets)
    }

    /// Compute totals over an arbitrary set of transactions and budgets
    pub fn from_parts<'a, I>(transactions: I, budgets: &[Budget]) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut total_income = Money::zero();
        let mut total_expenses = Money::zero();

        for txn in transactions {
            if txn.is_income() {
                total_income += txn.amount;
            } else {
                total_expenses += txn.amount;
            }
        }

        let total_budget: Money = budgets.iter().map(|b| b.limit).sum();

        Self {
            total_income,
            total_expenses,
            total_budget,
            remaining_budget: total_budget - total_expenses,
            savings: total_income - total_expenses,
        }
    }
}

/// Expense totals keyed by category, in category order
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CategorySpend(BTreeMap<String, Money>);

impl CategorySpend {
    /// Sum expense amounts per category; income never contributes
    pub fn compute<'a, I>(transactions: I) -> Self
    where
        I: IntoIterator<Item = &'a Transaction>,
    {
        let mut spend: BTreeMap<String, Money> = BTreeMap::new();
        for txn in transactions.into_iter().filter(|t| t.is_expense()) {
            *spend.entry(txn.category.clone()).or_default() += txn.amount;
        }
        Self(spend)
    }

    /// Spend for a category, zero when nothing was spent
    pub fn get(&self, category: &str) -> Money {
        self.0.get(category).copied().unwrap_or_default()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Money)> {
        self.0.iter().map(|(k, v)| (k.as_str(), *v))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of all category spend
    pub fn total(&self) -> Money {
        self.0.values().sum()
    }

    /// Categories ordered by spend, largest first
    pub fn ranked(&self) -> Vec<(&str, Money)> {
        let mut rows: Vec<_> = self.iter().collect();
        rows.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
        rows
    }

    pub fn as_map(&self) -> &BTreeMap<String, Money> {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{NewTransaction, TransactionType};
    use chrono::NaiveDate;

    fn expense(units: i64, category: &str) -> Transaction {
        Transaction::from_input(NewTransaction::new(
            TransactionType::Expense,
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2025, 11, 2).unwrap(),
        ))
    }

    #[test]
    fn test_sample_totals() {
        let totals = Totals::compute(&Document::sample());

        assert_eq!(totals.total_income, Money::from_units(35000));
        assert_eq!(totals.total_expenses, Money::from_units(5200));
        assert_eq!(totals.savings, Money::from_units(29800));
        assert_eq!(totals.total_budget, Money::from_units(18000));
        assert_eq!(totals.remaining_budget, Money::from_units(12800));
    }

    #[test]
    fn test_empty_totals() {
        let totals = Totals::from_parts(&[], &[]);
        assert_eq!(totals, Totals::default());
    }

    #[test]
    fn test_overspending_goes_negative() {
        let txns = vec![expense(500, "Fun")];
        let budgets = vec![Budget::new("Fun", Money::from_units(100))];
        let totals = Totals::from_parts(&txns, &budgets);

        assert_eq!(totals.remaining_budget, Money::from_units(-400));
        assert_eq!(totals.savings, Money::from_units(-500));
    }

    #[test]
    fn test_sample_category_spend() {
        let spend = CategorySpend::compute(&Document::sample().transactions);

        assert_eq!(spend.len(), 2);
        assert_eq!(spend.get("Groceries"), Money::from_units(4000));
        assert_eq!(spend.get("Transport"), Money::from_units(1200));
        assert_eq!(spend.get("Salary"), Money::zero());
        assert_eq!(spend.get("Entertainment"), Money::zero());
    }

    #[test]
    fn test_category_spend_accumulates() {
        let txns = vec![expense(10, "Fun"), expense(15, "Fun"), expense(1, "Rent")];
        let spend = CategorySpend::compute(&txns);

        assert_eq!(spend.get("Fun"), Money::from_units(25));
        assert_eq!(spend.total(), Money::from_units(26));
        assert_eq!(spend.ranked()[0], ("Fun", Money::from_units(25)));
    }
}
