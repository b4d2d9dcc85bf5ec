pub(crate) mod price_resolver;
pub(crate) mod valuation_errors;
pub(crate) mod valuation_model;
pub(crate) mod valuation_traits;

pub use price_resolver::DatePriceResolver;
pub use valuation_errors::ValuationError;
pub use valuation_model::{DailyValuationFeed, ValuationPoint};
pub use valuation_traits::ValuationFeed;
