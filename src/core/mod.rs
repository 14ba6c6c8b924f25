//! Store, aggregation, and validation logic. No terminal I/O lives here.

pub mod services;
pub mod store;
pub mod time;

pub use store::{AddOutcome, TransactionStore};
pub use time::{Clock, SystemClock};
