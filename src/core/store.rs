//! The authoritative, append-only transaction sequence.

use crate::{
    core::{
        services::{
            Aggregates, Derived, Distribution, SummaryService, TransactionDraft, TransactionService,
        },
        time::{Clock, SystemClock},
    },
    domain::{Transaction, TransactionKind},
    errors::Result,
    storage::{LoadReport, PersistStatus, PersistenceAdapter},
};

/// What a successful append hands back to the caller.
#[derive(Debug)]
pub struct AddOutcome {
    pub transaction: Transaction,
    /// Aggregates recomputed over the updated sequence.
    pub aggregates: Aggregates,
    /// Whether the updated sequence reached storage. Failure does not undo the append.
    pub persistence: PersistStatus,
}

/// Owns the transaction sequence (most-recent-first) and keeps storage in step with it.
pub struct TransactionStore {
    transactions: Vec<Transaction>,
    persistence: PersistenceAdapter,
    clock: Box<dyn Clock>,
    last_status: PersistStatus,
}

impl TransactionStore {
    /// Builds a store seeded from whatever the adapter can load.
    pub fn open(persistence: PersistenceAdapter) -> Self {
        Self::open_with_clock(persistence, Box::new(SystemClock))
    }

    pub fn open_with_clock(persistence: PersistenceAdapter, clock: Box<dyn Clock>) -> Self {
        let LoadReport {
            transactions,
            status,
            ..
        } = persistence.load();
        Self {
            transactions,
            persistence,
            clock,
            last_status: status,
        }
    }

    /// Validates and prepends a new entry, then persists the whole sequence.
    ///
    /// A rejected entry leaves both memory and storage untouched.
    pub fn add_transaction(
        &mut self,
        description: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<AddOutcome> {
        let draft = TransactionService::validate(description, amount, kind)?;
        Ok(self.append(draft))
    }

    /// Like [`add_transaction`](Self::add_transaction), with the amount still as typed.
    pub fn add_transaction_from_input(
        &mut self,
        description: &str,
        amount: &str,
        kind: TransactionKind,
    ) -> Result<AddOutcome> {
        let draft = TransactionService::validate_input(description, amount, kind)?;
        Ok(self.append(draft))
    }

    /// Replaces the sequence wholesale with what storage currently holds.
    pub fn reload(&mut self) -> &PersistStatus {
        let report = self.persistence.load();
        self.transactions = report.transactions;
        self.last_status = report.status;
        &self.last_status
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn len(&self) -> usize {
        self.transactions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty()
    }

    pub fn aggregates(&self) -> Aggregates {
        SummaryService::aggregates(&self.transactions)
    }

    pub fn derive_aggregates(&self) -> Derived<'_> {
        SummaryService::derive(&self.transactions)
    }

    pub fn filtered_by_kind(&self, kind: TransactionKind) -> Vec<&Transaction> {
        SummaryService::filter_by_kind(&self.transactions, kind)
    }

    pub fn distribution(&self) -> Distribution {
        SummaryService::distribution(&self.aggregates())
    }

    /// Status of the most recent load or save.
    pub fn last_persist_status(&self) -> &PersistStatus {
        &self.last_status
    }

    fn append(&mut self, draft: TransactionDraft) -> AddOutcome {
        let transaction = TransactionService::record(draft, self.clock.now());
        self.transactions.insert(0, transaction.clone());
        tracing::debug!(
            id = %transaction.id(),
            kind = transaction.kind().as_str(),
            count = self.transactions.len(),
            "transaction added"
        );

        let persistence = self.persistence.save(&self.transactions);
        self.last_status = persistence.clone();

        AddOutcome {
            transaction,
            aggregates: self.aggregates(),
            persistence,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{TrackerError, ValidationError};
    use crate::storage::MemorySlot;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::sync::atomic::{AtomicI64, Ordering};

    struct SteppingClock {
        start: DateTime<Utc>,
        ticks: AtomicI64,
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let tick = self.ticks.fetch_add(1, Ordering::SeqCst);
            self.start + Duration::seconds(tick)
        }
    }

    fn store_on(slot: &MemorySlot) -> TransactionStore {
        let clock = SteppingClock {
            start: Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 0).unwrap(),
            ticks: AtomicI64::new(0),
        };
        TransactionStore::open_with_clock(
            PersistenceAdapter::new(Box::new(slot.clone())),
            Box::new(clock),
        )
    }

    #[test]
    fn append_stamps_date_from_clock_and_prepends() {
        let slot = MemorySlot::new();
        let mut store = store_on(&slot);
        store.add_transaction("Salary", 3000.0, TransactionKind::Income).unwrap();
        let outcome = store.add_transaction("Coffee", 3.5, TransactionKind::Expense).unwrap();

        assert_eq!(store.len(), 2);
        assert_eq!(store.transactions()[0].id(), outcome.transaction.id());
        assert_eq!(
            outcome.transaction.date(),
            Utc.with_ymd_and_hms(2024, 6, 1, 8, 0, 1).unwrap()
        );
        assert_eq!(outcome.aggregates.savings, 2996.5);
        assert!(outcome.persistence.is_ok());
    }

    #[test]
    fn rejection_does_not_touch_storage() {
        let slot = MemorySlot::new();
        let mut store = store_on(&slot);
        let err = store.add_transaction("  ", 10.0, TransactionKind::Expense).unwrap_err();
        assert!(matches!(
            err,
            TrackerError::Validation(ValidationError::EmptyDescription)
        ));
        assert!(store.is_empty());
        assert_eq!(slot.contents(), None);
    }

    #[test]
    fn write_failure_keeps_the_in_memory_append() {
        let slot = MemorySlot::with_quota(16);
        let mut store = store_on(&slot);
        let outcome = store.add_transaction("Salary", 3000.0, TransactionKind::Income).unwrap();

        assert!(!outcome.persistence.is_ok());
        assert!(!store.last_persist_status().is_ok());
        assert_eq!(store.len(), 1);
        assert_eq!(store.aggregates().total_income, 3000.0);
    }

    #[test]
    fn reload_replaces_sequence_with_stored_one() {
        let slot = MemorySlot::new();
        let mut writer = store_on(&slot);
        writer.add_transaction("Salary", 3000.0, TransactionKind::Income).unwrap();

        let mut reader = store_on(&MemorySlot::new());
        assert!(reader.is_empty());
        let mut reader_on_slot = store_on(&slot);
        assert_eq!(reader_on_slot.transactions(), writer.transactions());

        writer.add_transaction("Rent", 900.0, TransactionKind::Expense).unwrap();
        assert!(reader_on_slot.reload().is_ok());
        assert_eq!(reader_on_slot.len(), 2);
        assert!(reader.reload().is_ok());
        assert!(reader.is_empty());
    }
}
