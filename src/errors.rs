use thiserror::Error;

/// Error type shared by the store, the persistence adapter, and configuration.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("Invalid transaction: {0}")]
    Validation(#[from] ValidationError),
    #[error("Could not read stored transactions: {0}")]
    PersistenceRead(String),
    #[error("Could not write transactions: {0}")]
    PersistenceWrite(String),
    #[error("Configuration error: {0}")]
    Config(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl TrackerError {
    pub fn is_validation(&self) -> bool {
        matches!(self, TrackerError::Validation(_))
    }
}

/// Reasons a candidate entry is refused before it reaches the store.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("description must not be empty")]
    EmptyDescription,
    #[error("`{0}` is not a valid amount")]
    InvalidAmount(String),
    #[error("amount must be greater than zero (got {0})")]
    NonPositiveAmount(f64),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
