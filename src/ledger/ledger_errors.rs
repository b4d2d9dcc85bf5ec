use rust_decimal::Decimal;
use thiserror::Error;

/// Custom error type for ledger-related operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Event amount must be positive, got {0}")]
    NonPositiveAmount(Decimal),
    #[error("Contributor id cannot be empty")]
    EmptyContributorId,
    #[error("Invalid timestamp '{0}'. Expected ISO 8601/RFC3339 with timezone offset")]
    InvalidTimestamp(String),
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<LedgerError> for String {
    fn from(error: LedgerError) -> Self {
        error.to_string()
    }
}
