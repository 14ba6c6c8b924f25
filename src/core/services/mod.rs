pub mod summary_service;
pub mod transaction_service;

pub use summary_service::{Aggregates, Derived, Distribution, DistributionSlice, SummaryService};
pub use transaction_service::{TransactionDraft, TransactionService};
