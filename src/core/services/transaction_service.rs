//! Validation rules for candidate entries and for stored sequences.

use std::collections::HashSet;

use chrono::{DateTime, Utc};

use crate::domain::{Transaction, TransactionKind};
use crate::errors::ValidationError;

/// A candidate entry that already passed validation.
///
/// Only [`TransactionService`] can build one, so holding a draft is proof that
/// the description is non-empty and the amount is finite and positive.
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionDraft {
    description: String,
    amount: f64,
    kind: TransactionKind,
}

impl TransactionDraft {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> f64 {
        self.amount
    }

    pub fn kind(&self) -> TransactionKind {
        self.kind
    }
}

/// Validation and minting helpers for transactions.
pub struct TransactionService;

impl TransactionService {
    /// Validates a candidate entry. The description is checked first.
    pub fn validate(
        description: &str,
        amount: f64,
        kind: TransactionKind,
    ) -> Result<TransactionDraft, ValidationError> {
        let description = Self::validate_description(description)?;
        let amount = Self::validate_amount(amount)?;
        Ok(TransactionDraft {
            description,
            amount,
            kind,
        })
    }

    /// Validates a candidate entry whose amount is still raw user text.
    pub fn validate_input(
        description: &str,
        amount: &str,
        kind: TransactionKind,
    ) -> Result<TransactionDraft, ValidationError> {
        let description = Self::validate_description(description)?;
        let amount = Self::parse_amount(amount)?;
        Self::validate(&description, amount, kind)
    }

    /// Parses user-supplied amount text into a finite, positive number.
    pub fn parse_amount(text: &str) -> Result<f64, ValidationError> {
        let trimmed = text.trim();
        let value = trimmed
            .parse::<f64>()
            .map_err(|_| ValidationError::InvalidAmount(trimmed.to_string()))?;
        Self::validate_amount(value)
    }

    /// Turns a draft into a stored transaction stamped with `at`.
    pub(crate) fn record(draft: TransactionDraft, at: DateTime<Utc>) -> Transaction {
        Transaction::new(draft.description, draft.amount, draft.kind, at)
    }

    /// Checks the invariants every stored sequence must hold.
    ///
    /// Returns one message per violation; an empty list means the sequence is sound.
    pub fn sequence_violations(transactions: &[Transaction]) -> Vec<String> {
        let mut seen = HashSet::with_capacity(transactions.len());
        let mut violations = Vec::new();
        for (index, txn) in transactions.iter().enumerate() {
            if !seen.insert(txn.id()) {
                violations.push(format!("entry {index} reuses id {}", txn.id()));
            }
            if !(txn.amount().is_finite() && txn.amount() > 0.0) {
                violations.push(format!(
                    "entry {index} has non-positive amount {}",
                    txn.amount()
                ));
            }
            if txn.description().trim().is_empty() {
                violations.push(format!("entry {index} has an empty description"));
            }
        }
        violations
    }

    fn validate_description(description: &str) -> Result<String, ValidationError> {
        let trimmed = description.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::EmptyDescription);
        }
        Ok(trimmed.to_string())
    }

    fn validate_amount(amount: f64) -> Result<f64, ValidationError> {
        if !amount.is_finite() {
            return Err(ValidationError::InvalidAmount(amount.to_string()));
        }
        if amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount(amount));
        }
        Ok(amount)
    }
}
