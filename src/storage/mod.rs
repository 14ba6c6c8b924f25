//! Persistence for the transaction sequence.
//!
//! A [`TransactionSlot`] stores one opaque string under a fixed key. The
//! [`PersistenceAdapter`] owns the JSON encoding on top of it and turns every
//! failure into a [`PersistStatus`] plus a log line, so callers never see a
//! panic or an `Err` from load or save.

pub mod json_backend;
pub mod memory;

use crate::{
    core::services::TransactionService,
    domain::Transaction,
    errors::{Result, TrackerError},
};

pub use json_backend::JsonFileSlot;
pub use memory::MemorySlot;

/// Fixed identifier of the single persistence slot.
pub const STORAGE_KEY: &str = "finance-tracker-transactions";

/// Raw storage for the serialized transaction sequence.
pub trait TransactionSlot: Send + Sync {
    /// Identifier of the slot, used in diagnostics.
    fn key(&self) -> &str;

    /// Returns the stored blob, or `None` when nothing has been stored yet.
    fn read(&self) -> Result<Option<String>>;

    /// Replaces the stored blob.
    fn write(&self, data: &str) -> Result<()>;
}

/// Outcome of a load or save, reported instead of raised.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum PersistStatus {
    #[default]
    Ok,
    ReadFailed(String),
    WriteFailed(String),
}

impl PersistStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, PersistStatus::Ok)
    }

    pub fn error(&self) -> Option<TrackerError> {
        match self {
            PersistStatus::Ok => None,
            PersistStatus::ReadFailed(reason) => Some(TrackerError::PersistenceRead(reason.clone())),
            PersistStatus::WriteFailed(reason) => {
                Some(TrackerError::PersistenceWrite(reason.clone()))
            }
        }
    }
}

/// Result of [`PersistenceAdapter::load`].
#[derive(Debug, Default)]
pub struct LoadReport {
    pub transactions: Vec<Transaction>,
    /// Whether the slot held any data, valid or not.
    pub found: bool,
    pub status: PersistStatus,
}

/// Loads and saves the whole sequence through a single slot.
pub struct PersistenceAdapter {
    slot: Box<dyn TransactionSlot>,
}

impl PersistenceAdapter {
    pub fn new(slot: Box<dyn TransactionSlot>) -> Self {
        Self { slot }
    }

    pub fn slot(&self) -> &dyn TransactionSlot {
        self.slot.as_ref()
    }

    /// Reads the stored sequence. Missing or corrupt data degrades to an empty list.
    pub fn load(&self) -> LoadReport {
        let raw = match self.slot.read() {
            Ok(Some(raw)) if !raw.trim().is_empty() => raw,
            Ok(_) => {
                tracing::debug!(key = self.slot.key(), "no stored transactions");
                return LoadReport::default();
            }
            Err(err) => return self.read_failure(false, err.to_string()),
        };

        match decode(&raw) {
            Ok(transactions) => {
                tracing::info!(
                    key = self.slot.key(),
                    count = transactions.len(),
                    "loaded stored transactions"
                );
                LoadReport {
                    transactions,
                    found: true,
                    status: PersistStatus::Ok,
                }
            }
            Err(reason) => self.read_failure(true, reason),
        }
    }

    /// Writes the full sequence, replacing whatever the slot held.
    pub fn save(&self, transactions: &[Transaction]) -> PersistStatus {
        let outcome = serde_json::to_string(transactions)
            .map_err(TrackerError::from)
            .and_then(|data| self.slot.write(&data));
        match outcome {
            Ok(()) => {
                tracing::debug!(
                    key = self.slot.key(),
                    count = transactions.len(),
                    "saved transactions"
                );
                PersistStatus::Ok
            }
            Err(err) => {
                tracing::error!(key = self.slot.key(), error = %err, "error writing transactions");
                PersistStatus::WriteFailed(err.to_string())
            }
        }
    }

    fn read_failure(&self, found: bool, reason: String) -> LoadReport {
        tracing::error!(key = self.slot.key(), error = %reason, "error reading stored transactions");
        LoadReport {
            transactions: Vec::new(),
            found,
            status: PersistStatus::ReadFailed(reason),
        }
    }
}

fn decode(raw: &str) -> std::result::Result<Vec<Transaction>, String> {
    let transactions: Vec<Transaction> =
        serde_json::from_str(raw).map_err(|err| err.to_string())?;
    let violations = TransactionService::sequence_violations(&transactions);
    if violations.is_empty() {
        Ok(transactions)
    } else {
        Err(violations.join("; "))
    }
}
