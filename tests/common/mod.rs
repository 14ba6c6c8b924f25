#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Mutex;

use finance_tracker::{
    core::TransactionStore,
    storage::{JsonFileSlot, MemorySlot, PersistenceAdapter},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a unique data directory that outlives the calling test.
pub fn data_dir() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn memory_store(slot: &MemorySlot) -> TransactionStore {
    TransactionStore::open(PersistenceAdapter::new(Box::new(slot.clone())))
}

pub fn file_adapter(dir: &std::path::Path) -> PersistenceAdapter {
    PersistenceAdapter::new(Box::new(JsonFileSlot::in_dir(dir)))
}

pub fn file_store(dir: &std::path::Path) -> TransactionStore {
    TransactionStore::open(file_adapter(dir))
}
