pub mod common;
pub mod transaction;

pub use common::Amounted;
pub use transaction::{Transaction, TransactionKind};
