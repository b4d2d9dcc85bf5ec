pub mod constants;
pub mod engine;
pub mod errors;
pub mod ledger;
pub mod reporting;
pub mod valuation;

pub use errors::{Error, Result};

pub use engine::*;
pub use ledger::*;
pub use reporting::*;
pub use valuation::*;
