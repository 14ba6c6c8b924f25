#![doc(test(attr(deny(warnings))))]

//! Finance Tracker records income and expense entries, keeps them in a single
//! local storage slot, and derives totals, savings, and an income breakdown.
//!
//! ```
//! use finance_tracker::{
//!     core::TransactionStore,
//!     domain::TransactionKind,
//!     storage::{MemorySlot, PersistenceAdapter},
//! };
//!
//! let mut store = TransactionStore::open(PersistenceAdapter::new(Box::new(MemorySlot::new())));
//! store.add_transaction("Salary", 3000.0, TransactionKind::Income).unwrap();
//! store.add_transaction("Groceries", 45.5, TransactionKind::Expense).unwrap();
//! assert_eq!(store.aggregates().savings, 2954.5);
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod errors;
pub mod storage;
pub mod utils;

pub use crate::core::{AddOutcome, TransactionStore};
pub use crate::errors::{TrackerError, ValidationError};

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Finance Tracker tracing initialized.");
    });
}

#[cfg(test)]
mod tests {
    #[test]
    fn init_does_not_panic() {
        super::init();
        super::init();
    }
}
