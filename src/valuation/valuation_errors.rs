use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// Custom error type for valuation-feed operations
#[derive(Debug, Error)]
pub enum ValuationError {
    #[error("Valuation for {date} must be non-negative, got {value}")]
    NegativeValue { date: NaiveDate, value: Decimal },
    #[error("Invalid data: {0}")]
    InvalidData(String),
}

impl From<ValuationError> for String {
    fn from(error: ValuationError) -> Self {
        error.to_string()
    }
}
