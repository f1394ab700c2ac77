//! Store notifications
//!
//! Every successful mutation emits a [`FinanceEvent`]; budget checks emit
//! [`FinanceEvent::BudgetExceeded`]. Delivery is fire-and-forget.

use std::fmt;
use std::sync::mpsc::Sender;

use crate::models::{BudgetId, Money, TransactionId};

/// How prominent a notification should be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Success,
    Info,
    Error,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Success => write!(f, "success"),
            Severity::Info => write!(f, "info"),
            Severity::Error => write!(f, "error"),
        }
    }
}

/// Something that happened to the finance document
#[derive(Debug, Clone, PartialEq)]
pub enum FinanceEvent {
    TransactionAdded(TransactionId),
    TransactionUpdated(TransactionId),
    TransactionDeleted(TransactionId),
    BudgetAdded(BudgetId),
    BudgetUpdated(BudgetId),
    ProfileUpdated,
    /// Expense spend in a category went strictly over its budget
    BudgetExceeded {
        budget_id: BudgetId,
        category: String,
        spent: Money,
        limit: Money,
    },
}

impl FinanceEvent {
    pub fn severity(&self) -> Severity {
        match self {
            FinanceEvent::TransactionAdded(_)
            | FinanceEvent::BudgetAdded(_)
            | FinanceEvent::BudgetUpdated(_)
            | FinanceEvent::ProfileUpdated => Severity::Success,
            FinanceEvent::TransactionUpdated(_) | FinanceEvent::TransactionDeleted(_) => {
                Severity::Info
            }
            FinanceEvent::BudgetExceeded { .. } => Severity::Error,
        }
    }

    /// Short message suitable for a transient notification
    pub fn message(&self) -> String {
        match self {
            FinanceEvent::TransactionAdded(_) => "Transaction added".to_string(),
            FinanceEvent::TransactionUpdated(_) => "Transaction updated".to_string(),
            FinanceEvent::TransactionDeleted(_) => "Transaction deleted".to_string(),
            FinanceEvent::BudgetAdded(_) => "Budget added".to_string(),
            FinanceEvent::BudgetUpdated(_) => "Budget updated".to_string(),
            FinanceEvent::ProfileUpdated => "Profile updated".to_string(),
            FinanceEvent::BudgetExceeded { category, .. } => {
                format!("Budget exceeded for {}", category)
            }
        }
    }
}

impl fmt::Display for FinanceEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message())
    }
}

/// Receives store notifications
pub trait EventSink {
    fn notify(&self, event: &FinanceEvent);
}

impl<F> EventSink for F
where
    F: Fn(&FinanceEvent),
{
    fn notify(&self, event: &FinanceEvent) {
        self(event)
    }
}

impl EventSink for Sender<FinanceEvent> {
    fn notify(&self, event: &FinanceEvent) {
        // A dropped receiver just means nobody is listening any more
        let _ = self.send(event.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::sync::mpsc;

    fn exceeded() -> FinanceEvent {
        FinanceEvent::BudgetExceeded {
            budget_id: BudgetId::from("b2"),
            category: "Transport".into(),
            spent: Money::from_units(3200),
            limit: Money::from_units(3000),
        }
    }

    #[test]
    fn test_messages() {
        assert_eq!(
            FinanceEvent::TransactionAdded(TransactionId::from("t9")).message(),
            "Transaction added"
        );
        assert_eq!(FinanceEvent::ProfileUpdated.to_string(), "Profile updated");
        assert_eq!(exceeded().message(), "Budget exceeded for Transport");
    }

    #[test]
    fn test_severity() {
        assert_eq!(
            FinanceEvent::BudgetAdded(BudgetId::from("b4")).severity(),
            Severity::Success
        );
        assert_eq!(
            FinanceEvent::TransactionDeleted(TransactionId::from("t1")).severity(),
            Severity::Info
        );
        assert_eq!(exceeded().severity(), Severity::Error);
    }

    #[test]
    fn test_closure_sink() {
        let seen = RefCell::new(Vec::new());
        let sink = |event: &FinanceEvent| seen.borrow_mut().push(event.message());

        sink.notify(&exceeded());
        assert_eq!(seen.into_inner(), vec!["Budget exceeded for Transport"]);
    }

    #[test]
    fn test_channel_sink_ignores_dropped_receiver() {
        let (tx, rx) = mpsc::channel();
        tx.notify(&FinanceEvent::ProfileUpdated);
        assert_eq!(rx.recv().unwrap(), FinanceEvent::ProfileUpdated);

        drop(rx);
        tx.notify(&FinanceEvent::ProfileUpdated);
    }
}
