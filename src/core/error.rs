use thiserror::Error;

use crate::backend::BackendError;
use crate::core::transaction::Amount;

#[derive(Debug, Error)]
pub enum LedgerError {
    /// Occurs when a description is empty once surrounding
    /// whitespace is removed.
    #[error("description must not be empty")]
    EmptyDescription,
    /// Occurs when the amount text is not a number.
    #[error("not a valid amount: {0:?}")]
    InvalidAmount(String),
    /// Occurs when the amount is NaN or infinite.
    #[error("amount must be a finite number, got {0}")]
    NonFiniteAmount(Amount),
    /// Occurs when the ledger could not be written back to storage.
    /// The in-memory ledger is left as it was before the change.
    #[error("failed to persist ledger: {0}")]
    Storage(#[from] BackendError),
    /// Occurs when the ledger could not be turned into JSON.
    #[error("failed to encode ledger: {0}")]
    Encode(#[from] serde_json::Error),
    /// Occurs when no id is left above the largest one in use.
    #[error("no transaction ids left")]
    IdsExhausted
}

impl LedgerError {
    /// True for errors caused by user input rather than by storage.
    pub fn is_validation(&self) -> bool {
        matches!(self,
            LedgerError::EmptyDescription
            | LedgerError::InvalidAmount(_)
            | LedgerError::NonFiniteAmount(_))
    }
}

pub type LedgerResult<T> = Result<T, LedgerError>;
