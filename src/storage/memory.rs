use std::sync::{Arc, Mutex, MutexGuard};

use super::{TransactionSlot, STORAGE_KEY};
use crate::errors::{Result, TrackerError};

/// In-process slot. Clones share the same contents.
///
/// An optional byte quota makes oversized writes fail the way a full quota-limited
/// store would.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    contents: Arc<Mutex<Option<String>>>,
    quota: Option<usize>,
}

impl MemorySlot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_contents(raw: impl Into<String>) -> Self {
        Self {
            contents: Arc::new(Mutex::new(Some(raw.into()))),
            quota: None,
        }
    }

    pub fn with_quota(bytes: usize) -> Self {
        Self {
            quota: Some(bytes),
            ..Self::default()
        }
    }

    /// Snapshot of the stored blob.
    pub fn contents(&self) -> Option<String> {
        self.lock().ok().and_then(|guard| guard.clone())
    }

    fn lock(&self) -> Result<MutexGuard<'_, Option<String>>> {
        self.contents
            .lock()
            .map_err(|_| TrackerError::PersistenceRead("memory slot poisoned".into()))
    }
}

impl TransactionSlot for MemorySlot {
    fn key(&self) -> &str {
        STORAGE_KEY
    }

    fn read(&self) -> Result<Option<String>> {
        Ok(self.lock()?.clone())
    }

    fn write(&self, data: &str) -> Result<()> {
        if let Some(quota) = self.quota {
            if data.len() > quota {
                return Err(TrackerError::PersistenceWrite(format!(
                    "quota of {quota} bytes exceeded ({} bytes)",
                    data.len()
                )));
            }
        }
        *self.lock()? = Some(data.to_string());
        Ok(())
    }
}
