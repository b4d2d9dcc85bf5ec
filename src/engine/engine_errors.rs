use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use thiserror::Error;

/// Errors raised by the replay engine.
///
/// These are the fatal, caller-bug cases; genuine data-quality
/// degradation (missing valuations, anomalous NAVs) is absorbed into the
/// audit trail instead.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Ledger events are not sorted: event {index} at {timestamp} precedes {previous}")]
    UnorderedLedger {
        index: usize,
        timestamp: DateTime<Utc>,
        previous: DateTime<Utc>,
    },

    #[error("Withdrawal for contributor {contributor_id} on {date} with no prior units")]
    UnknownContributor {
        contributor_id: String,
        date: NaiveDate,
    },

    #[error(
        "Insufficient units for contributor {contributor_id} on {date}: requested {requested}, held {held}"
    )]
    InsufficientUnits {
        contributor_id: String,
        date: NaiveDate,
        requested: Decimal,
        held: Decimal,
    },

    #[error("Invalid event data: {0}")]
    InvalidEvent(String),
}
