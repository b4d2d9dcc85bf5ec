pub(crate) mod ledger_errors;
pub(crate) mod ledger_model;

pub use ledger_errors::LedgerError;
pub use ledger_model::{ContributionEvent, ContributionLedger, EventKind, NewContributionEvent};
