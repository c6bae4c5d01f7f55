use thiserror::Error;
use uuid::Uuid;

use duebill_domain::{BillValidationError, ParseFrequencyError};

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Unrecognized frequency: {0}")]
    InvalidFrequency(String),
    #[error("Bill not found: {0}")]
    BillNotFound(Uuid),
    #[error("Account not found: {0}")]
    AccountNotFound(Uuid),
    #[error("Validation failed: {0}")]
    Validation(String),
    #[error("Storage error: {0}")]
    Storage(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serde(String),
}

impl From<ParseFrequencyError> for CoreError {
    fn from(err: ParseFrequencyError) -> Self {
        CoreError::InvalidFrequency(err.0)
    }
}

impl From<BillValidationError> for CoreError {
    fn from(err: BillValidationError) -> Self {
        CoreError::Validation(err.to_string())
    }
}
