//! The finance store
//!
//! [`FinanceStore`] owns the document, persists it through a
//! [`KeyValueStorage`] after every successful mutation and notifies
//! subscribers. Derived views are recomputed on every call.
//!
//! A mutation builds the next document, writes it, and only then swaps it in,
//! so a failed write leaves the store untouched.

pub mod events;

pub use events::{EventSink, FinanceEvent, Severity};

use std::collections::HashSet;

use tracing::{debug, warn};

use crate::audit::{AuditEntry, AuditLog, Entity};
use crate::config::settings::DEFAULT_STORAGE_KEY;
use crate::error::FinanceResult;
use crate::models::{
    Budget, BudgetId, Document, Money, NewTransaction, Profile, ProfilePatch, Transaction,
    TransactionId, TransactionPatch,
};
use crate::reports::{CategorySpend, Totals};
use crate::storage::KeyValueStorage;

/// Holds the finance document and applies mutations to it
pub struct FinanceStore<S: KeyValueStorage> {
    storage: S,
    key: String,
    document: Document,
    audit: Option<AuditLog>,
    subscribers: Vec<Box<dyn EventSink>>,
    /// Budgets already reported as exceeded in this session
    exceeded: HashSet<BudgetId>,
}

impl<S: KeyValueStorage> FinanceStore<S> {
    /// Open the store on the default key
    pub fn open(storage: S) -> Self {
        Self::open_with_key(storage, DEFAULT_STORAGE_KEY)
    }

    /// Open the store on a specific key.
    ///
    /// Never fails: a missing, unreadable or unparsable slot yields the
    /// built-in sample document.
    pub fn open_with_key(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let document = load_document(&storage, &key);

        Self {
            storage,
            key,
            document,
            audit: None,
            subscribers: Vec::new(),
            exceeded: HashSet::new(),
        }
    }

    /// Record every mutation in an audit log
    pub fn with_audit(mut self, log: AuditLog) -> Self {
        self.audit = Some(log);
        self
    }

    /// Register a subscriber for notifications
    pub fn subscribe(&mut self, sink: impl EventSink + 'static) {
        self.subscribers.push(Box::new(sink));
    }

    // === Reads ===

    pub fn document(&self) -> &Document {
        &self.document
    }

    /// Transactions, newest-added first
    pub fn transactions(&self) -> &[Transaction] {
        &self.document.transactions
    }

    pub fn budgets(&self) -> &[Budget] {
        &self.document.budgets
    }

    pub fn profile(&self) -> &Profile {
        &self.document.profile
    }

    pub fn transaction(&self, id: &TransactionId) -> Option<&Transaction> {
        self.document.transaction(id)
    }

    pub fn budget_for(&self, category: &str) -> Option<&Budget> {
        self.document.budget_for(category)
    }

    pub fn totals(&self) -> Totals {
        Totals::compute(&self.document)
    }

    pub fn category_spend(&self) -> CategorySpend {
        CategorySpend::compute(&self.document.transactions)
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    // === Transactions ===

    /// Add a transaction with a fresh id at the front of the list
    pub fn add_transaction(&mut self, input: NewTransaction) -> FinanceResult<Transaction> {
        let txn = Transaction::from_input(input);

        let mut next = self.document.clone();
        next.transactions.insert(0, txn.clone());
        self.commit(next)?;

        debug!(id = %txn.id, category = %txn.category, "transaction added");
        self.record(AuditEntry::created(
            Entity::Transaction,
            txn.id.as_str(),
            &txn.category,
            &txn,
        ));
        self.emit(FinanceEvent::TransactionAdded(txn.id.clone()));
        self.check_budgets();

        Ok(txn)
    }

    /// Merge a patch into an existing transaction.
    ///
    /// Returns `Ok(None)` without persisting anything when the id is unknown.
    pub fn update_transaction(
        &mut self,
        id: &TransactionId,
        patch: TransactionPatch,
    ) -> FinanceResult<Option<Transaction>> {
        let Some(index) = self.document.transactions.iter().position(|t| &t.id == id) else {
            debug!(%id, "update of unknown transaction ignored");
            return Ok(None);
        };

        let mut next = self.document.clone();
        let before = next.transactions[index].clone();
        next.transactions[index].apply(patch);
        let after = next.transactions[index].clone();
        self.commit(next)?;

        debug!(%id, "transaction updated");
        self.record(AuditEntry::updated(
            Entity::Transaction,
            id.as_str(),
            &after.category,
            &before,
            &after,
        ));
        self.emit(FinanceEvent::TransactionUpdated(id.clone()));
        self.check_budgets();

        Ok(Some(after))
    }

    /// Remove a transaction; returns `Ok(false)` when the id is unknown
    pub fn delete_transaction(&mut self, id: &TransactionId) -> FinanceResult<bool> {
        let Some(index) = self.document.transactions.iter().position(|t| &t.id == id) else {
            debug!(%id, "delete of unknown transaction ignored");
            return Ok(false);
        };

        let mut next = self.document.clone();
        let removed = next.transactions.remove(index);
        self.commit(next)?;

        debug!(%id, "transaction deleted");
        self.record(AuditEntry::deleted(
            Entity::Transaction,
            id.as_str(),
            &removed.category,
            &removed,
        ));
        self.emit(FinanceEvent::TransactionDeleted(id.clone()));
        self.check_budgets();

        Ok(true)
    }

    // === Budgets ===

    /// Set the limit for a category, creating the budget if needed.
    ///
    /// An existing budget keeps its id and only its limit changes.
    pub fn set_budget(&mut self, category: &str, limit: Money) -> FinanceResult<Budget> {
        let mut next = self.document.clone();

        let existing = next.budgets.iter().position(|b| b.category == category);
        let (budget, before) = match existing {
            Some(index) => {
                let before = next.budgets[index].clone();
                next.budgets[index].limit = limit;
                (next.budgets[index].clone(), Some(before))
            }
            None => {
                let budget = Budget::new(category, limit);
                next.budgets.push(budget.clone());
                (budget, None)
            }
        };

        self.commit(next)?;

        match before {
            Some(before) => {
                debug!(id = %budget.id, category, "budget updated");
                self.record(AuditEntry::updated(
                    Entity::Budget,
                    budget.id.as_str(),
                    &budget.category,
                    &before,
                    &budget,
                ));
                self.emit(FinanceEvent::BudgetUpdated(budget.id.clone()));
            }
            None => {
                debug!(id = %budget.id, category, "budget added");
                self.record(AuditEntry::created(
                    Entity::Budget,
                    budget.id.as_str(),
                    &budget.category,
                    &budget,
                ));
                self.emit(FinanceEvent::BudgetAdded(budget.id.clone()));
            }
        }
        self.check_budgets();

        Ok(budget)
    }

    // === Profile ===

    /// Shallow-merge a patch into the profile
    pub fn update_profile(&mut self, patch: ProfilePatch) -> FinanceResult<Profile> {
        let mut next = self.document.clone();
        let before = next.profile.clone();
        next.profile.apply(patch);
        let after = next.profile.clone();
        self.commit(next)?;

        debug!("profile updated");
        self.record(AuditEntry::updated(
            Entity::Profile,
            "profile",
            &after.name,
            &before,
            &after,
        ));
        self.emit(FinanceEvent::ProfileUpdated);

        Ok(after)
    }

    // === Internals ===

    /// Persist the next document and make it current
    fn commit(&mut self, next: Document) -> FinanceResult<()> {
        let json = next.to_json()?;
        self.storage.set(&self.key, &json)?;
        self.document = next;
        Ok(())
    }

    fn record(&self, entry: AuditEntry) {
        if let Some(log) = &self.audit {
            if let Err(e) = log.append(&entry) {
                warn!(error = %e, "failed to write audit entry");
            }
        }
    }

    fn emit(&self, event: FinanceEvent) {
        for sink in &self.subscribers {
            sink.notify(&event);
        }
    }

    /// Report budgets that have newly gone over their limit and re-arm the
    /// ones that are back within it.
    fn check_budgets(&mut self) {
        let spend = self.category_spend();
        let mut newly_exceeded = Vec::new();

        for budget in &self.document.budgets {
            let spent = spend.get(&budget.category);
            if budget.is_exceeded_by(spent) {
                if self.exceeded.insert(budget.id.clone()) {
                    newly_exceeded.push(FinanceEvent::BudgetExceeded {
                        budget_id: budget.id.clone(),
                        category: budget.category.clone(),
                        spent,
                        limit: budget.limit,
                    });
                }
            } else {
                self.exceeded.remove(&budget.id);
            }
        }

        let budgets = &self.document.budgets;
        self.exceeded.retain(|id| budgets.iter().any(|b| &b.id == id));

        for event in newly_exceeded {
            warn!(%event, "budget exceeded");
            self.emit(event);
        }
    }
}

fn load_document<S: KeyValueStorage>(storage: &S, key: &str) -> Document {
    match storage.get(key) {
        Ok(Some(text)) => match Document::from_json(&text) {
            Ok(document) => {
                debug!(
                    key,
                    transactions = document.transactions.len(),
                    budgets = document.budgets.len(),
                    "loaded finance document"
                );
                document
            }
            Err(e) => {
                warn!(key, error = %e, "saved document is unreadable, using sample data");
                Document::sample()
            }
        },
        Ok(None) => {
            debug!(key, "no saved document, using sample data");
            Document::sample()
        }
        Err(e) => {
            warn!(key, error = %e, "failed to read saved document, using sample data");
            Document::sample()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audit::AuditAction;
    use crate::error::FinanceError;
    use crate::models::{TransactionType, MAX_UNITS};
    use crate::storage::MemoryStorage;
    use chrono::NaiveDate;
    use std::sync::mpsc::{self, Receiver};
    use tempfile::TempDir;

    fn open_sample() -> (FinanceStore<MemoryStorage>, Receiver<FinanceEvent>) {
        let mut store = FinanceStore::open(MemoryStorage::new());
        let (tx, rx) = mpsc::channel();
        store.subscribe(tx);
        (store, rx)
    }

    fn expense(units: i64, category: &str) -> NewTransaction {
        NewTransaction::new(
            TransactionType::Expense,
            Money::from_units(units),
            category,
            NaiveDate::from_ymd_opt(2025, 11, 10).unwrap(),
        )
    }

    fn persisted(store: &FinanceStore<MemoryStorage>) -> Document {
        let text = store.storage().get(DEFAULT_STORAGE_KEY).unwrap().unwrap();
        Document::from_json(&text).unwrap()
    }

    fn exceeded_ids(events: &[FinanceEvent]) -> Vec<String> {
        events
            .iter()
            .filter_map(|e| match e {
                FinanceEvent::BudgetExceeded { budget_id, .. } => Some(budget_id.to_string()),
                _ => None,
            })
            .collect()
    }

    struct FailingStorage;

    impl KeyValueStorage for FailingStorage {
        fn get(&self, _key: &str) -> FinanceResult<Option<String>> {
            Err(FinanceError::Storage("disk on fire".into()))
        }

        fn set(&self, _key: &str, _value: &str) -> FinanceResult<()> {
            Err(FinanceError::Storage("disk on fire".into()))
        }
    }

    #[test]
    fn test_empty_storage_yields_sample() {
        let store = FinanceStore::open(MemoryStorage::new());

        assert_eq!(store.transactions().len(), 4);
        assert_eq!(store.budgets().len(), 3);
        assert_eq!(store.profile().name, "Aarav Mehta");
        assert_eq!(store.profile().currency(), "₹");
        assert!(store.storage().is_empty());
    }

    #[test]
    fn test_unparsable_storage_yields_sample() {
        let storage = MemoryStorage::with_value(DEFAULT_STORAGE_KEY, "{not json");
        let store = FinanceStore::open(storage);
        assert_eq!(*store.document(), Document::sample());
    }

    #[test]
    fn test_unreadable_storage_yields_sample() {
        let store = FinanceStore::open(FailingStorage);
        assert_eq!(store.transactions().len(), 4);
    }

    #[test]
    fn test_reopen_reads_persisted_document() {
        let storage = MemoryStorage::new();
        {
            let mut store = FinanceStore::open(storage.clone());
            store.set_budget("Rent", Money::from_units(8000)).unwrap();
        }

        let store = FinanceStore::open(storage);
        assert_eq!(store.budgets().len(), 4);
        assert!(store.budget_for("Rent").is_some());
    }

    #[test]
    fn test_custom_key() {
        let storage = MemoryStorage::new();
        let mut store = FinanceStore::open_with_key(storage.clone(), "other");
        store.update_profile(ProfilePatch::new().name("Kiran")).unwrap();

        assert_eq!(store.key(), "other");
        assert!(storage.get("other").unwrap().is_some());
        assert!(storage.get(DEFAULT_STORAGE_KEY).unwrap().is_none());
    }

    #[test]
    fn test_add_prepends_and_persists() {
        let (mut store, rx) = open_sample();

        let txn = store.add_transaction(expense(250, "Entertainment")).unwrap();

        assert_eq!(store.transactions().len(), 5);
        assert_eq!(store.transactions()[0].id, txn.id);
        assert!(!["t1", "t2", "t3", "t4"].contains(&txn.id.as_str()));
        assert_eq!(persisted(&store), *store.document());
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FinanceEvent::TransactionAdded(txn.id)]
        );
    }

    #[test]
    fn test_add_assigns_unique_ids() {
        let (mut store, _rx) = open_sample();
        let a = store.add_transaction(expense(1, "Other")).unwrap();
        let b = store.add_transaction(expense(1, "Other")).unwrap();
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_update_merges_fields() {
        let (mut store, rx) = open_sample();
        let id = TransactionId::from("t1");

        let updated = store
            .update_transaction(&id, TransactionPatch::new().amount(Money::from_units(35000)))
            .unwrap()
            .unwrap();

        let mut expected = Document::sample().transactions[0].clone();
        expected.amount = Money::from_units(35000);
        assert_eq!(updated, expected);
        assert_eq!(store.transaction(&id), Some(&expected));
        assert_eq!(store.totals().total_income, Money::from_units(40000));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FinanceEvent::TransactionUpdated(id)]
        );
    }

    #[test]
    fn test_update_unknown_is_noop() {
        let (mut store, rx) = open_sample();

        let result = store
            .update_transaction(
                &TransactionId::from("nope"),
                TransactionPatch::new().amount(Money::from_units(1)),
            )
            .unwrap();

        assert!(result.is_none());
        assert!(store.storage().is_empty());
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_delete() {
        let (mut store, rx) = open_sample();
        let id = TransactionId::from("t3");

        assert!(store.delete_transaction(&id).unwrap());
        assert_eq!(store.transactions().len(), 3);
        assert!(store.transaction(&id).is_none());
        assert_eq!(persisted(&store).transactions.len(), 3);
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FinanceEvent::TransactionDeleted(id)]
        );
    }

    #[test]
    fn test_delete_unknown_is_noop() {
        let (mut store, rx) = open_sample();

        assert!(!store.delete_transaction(&TransactionId::from("t99")).unwrap());
        assert_eq!(store.transactions().len(), 4);
        assert!(store.storage().is_empty());
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_set_budget_overwrites_in_place() {
        let (mut store, rx) = open_sample();

        let budget = store.set_budget("Groceries", Money::from_units(12000)).unwrap();

        assert_eq!(budget.id.as_str(), "b1");
        assert_eq!(store.budgets().len(), 3);
        assert_eq!(store.budgets()[0].limit, Money::from_units(12000));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FinanceEvent::BudgetUpdated(BudgetId::from("b1"))]
        );
    }

    #[test]
    fn test_set_budget_creates_new() {
        let (mut store, rx) = open_sample();

        let budget = store.set_budget("Rent", Money::from_units(8000)).unwrap();

        assert_eq!(store.budgets().len(), 4);
        assert!(!["b1", "b2", "b3"].contains(&budget.id.as_str()));
        assert_eq!(store.budget_for("Rent"), Some(&budget));
        assert_eq!(store.totals().total_budget, Money::from_units(26000));
        assert_eq!(
            rx.try_iter().collect::<Vec<_>>(),
            vec![FinanceEvent::BudgetAdded(budget.id)]
        );
    }

    #[test]
    fn test_update_profile() {
        let (mut store, rx) = open_sample();

        let profile = store
            .update_profile(ProfilePatch::new().default_currency("$"))
            .unwrap();

        assert_eq!(profile.name, "Aarav Mehta");
        assert_eq!(profile.currency(), "$");
        assert_eq!(persisted(&store).profile.default_currency, "$");
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![FinanceEvent::ProfileUpdated]);
    }

    #[test]
    fn test_largest_amounts_keep_derived_views_exact() {
        let (mut store, rx) = open_sample();

        store.add_transaction(expense(MAX_UNITS, "Groceries")).unwrap();
        store.add_transaction(expense(MAX_UNITS, "Groceries")).unwrap();

        let expected = Money::from_units(2 * MAX_UNITS + 4000);
        assert_eq!(store.category_spend().get("Groceries"), expected);
        assert_eq!(
            store.totals().total_expenses,
            expected + Money::from_units(1200)
        );
        assert_eq!(persisted(&store).transactions.len(), 6);
        assert!(rx
            .try_iter()
            .any(|e| matches!(e, FinanceEvent::BudgetExceeded { .. })));
    }

    #[test]
    fn test_derived_views_on_sample() {
        let (store, _rx) = open_sample();

        let totals = store.totals();
        assert_eq!(totals.total_income, Money::from_units(35000));
        assert_eq!(totals.total_expenses, Money::from_units(5200));
        assert_eq!(totals.savings, Money::from_units(29800));

        let spend = store.category_spend();
        assert_eq!(spend.len(), 2);
        assert_eq!(spend.get("Groceries"), Money::from_units(4000));
        assert_eq!(spend.get("Transport"), Money::from_units(1200));
    }

    #[test]
    fn test_budget_exceeded_signal() {
        let (mut store, rx) = open_sample();

        store.add_transaction(expense(100, "Transport")).unwrap();
        assert!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()).is_empty());

        store.add_transaction(expense(2000, "Transport")).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(exceeded_ids(&events), vec!["b2"]);
        assert!(matches!(events[0], FinanceEvent::TransactionAdded(_)));
        assert_eq!(events[1].message(), "Budget exceeded for Transport");
    }

    #[test]
    fn test_budget_at_limit_is_not_exceeded() {
        let (mut store, rx) = open_sample();

        store.add_transaction(expense(1800, "Transport")).unwrap();
        assert!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()).is_empty());
    }

    #[test]
    fn test_budget_exceeded_reported_once_until_rearmed() {
        let (mut store, rx) = open_sample();

        let first = store.add_transaction(expense(2000, "Transport")).unwrap();
        store.add_transaction(expense(10, "Transport")).unwrap();
        assert_eq!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()), vec!["b2"]);

        // Raising the limit brings the budget back within it
        store.set_budget("Transport", Money::from_units(5000)).unwrap();
        assert!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()).is_empty());

        store.set_budget("Transport", Money::from_units(3000)).unwrap();
        assert_eq!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()), vec!["b2"]);

        store.delete_transaction(&first.id).unwrap();
        store
            .update_transaction(
                &TransactionId::from("t3"),
                TransactionPatch::new().amount(Money::from_units(3001)),
            )
            .unwrap();
        assert_eq!(exceeded_ids(&rx.try_iter().collect::<Vec<_>>()), vec!["b2"]);
    }

    #[test]
    fn test_lowering_a_limit_triggers_signal() {
        let (mut store, rx) = open_sample();

        store.set_budget("Groceries", Money::from_units(3999)).unwrap();
        let events: Vec<_> = rx.try_iter().collect();
        assert_eq!(events[0], FinanceEvent::BudgetUpdated(BudgetId::from("b1")));
        assert_eq!(exceeded_ids(&events), vec!["b1"]);
    }

    #[test]
    fn test_profile_update_does_not_check_budgets() {
        let (mut store, rx) = open_sample();
        store.set_budget("Groceries", Money::from_units(1)).unwrap();
        store.set_budget("Groceries", Money::from_units(10000)).unwrap();
        rx.try_iter().for_each(drop);

        store.update_profile(ProfilePatch::new().name("A")).unwrap();
        assert_eq!(rx.try_iter().collect::<Vec<_>>(), vec![FinanceEvent::ProfileUpdated]);
    }

    #[test]
    fn test_failed_write_leaves_store_unchanged() {
        let mut store = FinanceStore::open(FailingStorage);
        let (tx, rx) = mpsc::channel();
        store.subscribe(tx);

        let result = store.add_transaction(expense(5000, "Transport"));

        assert!(matches!(result, Err(FinanceError::Storage(_))));
        assert_eq!(store.transactions().len(), 4);
        assert!(store.set_budget("Rent", Money::zero()).is_err());
        assert_eq!(store.budgets().len(), 3);
        assert_eq!(rx.try_iter().count(), 0);
    }

    #[test]
    fn test_mutations_are_audited() {
        let temp = TempDir::new().unwrap();
        let log = AuditLog::new(temp.path().join("audit.log"));
        let mut store = FinanceStore::open(MemoryStorage::new()).with_audit(log.clone());

        let txn = store.add_transaction(expense(10, "Other")).unwrap();
        store.set_budget("Groceries", Money::from_units(11000)).unwrap();
        store.delete_transaction(&txn.id).unwrap();

        let entries = log.entries().unwrap();
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].id, txn.id.as_str());
        assert_eq!(entries[1].changes.as_deref(), Some("limit: 10000 -> 11000"));
        assert_eq!(entries[2].action, AuditAction::Deleted);
    }

    #[test]
    fn test_audit_failure_does_not_fail_mutation() {
        let temp = TempDir::new().unwrap();
        // A directory where the log file should be makes every append fail
        let blocked = temp.path().join("audit.log");
        std::fs::create_dir_all(&blocked).unwrap();

        let mut store =
            FinanceStore::open(MemoryStorage::new()).with_audit(AuditLog::new(blocked));
        assert!(store.add_transaction(expense(10, "Other")).is_ok());
        assert_eq!(store.transactions().len(), 5);
    }
}
