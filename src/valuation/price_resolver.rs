use chrono::{Duration, NaiveDate};
use log::debug;
use rust_decimal::Decimal;

use crate::constants::DEFAULT_MAX_LOOKBACK_DAYS;

use super::valuation_traits::ValuationFeed;

/// Resolves the valuation to use for a date, scanning backwards over
/// calendar days when the exact date is missing from the feed.
///
/// The resolver makes no NAV decision itself; it only supplies the
/// valuation (and its effective date) for the caller to price against.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatePriceResolver {
    pub max_lookback_days: u32,
}

impl Default for DatePriceResolver {
    fn default() -> Self {
        DatePriceResolver {
            max_lookback_days: DEFAULT_MAX_LOOKBACK_DAYS,
        }
    }
}

impl DatePriceResolver {
    pub fn new(max_lookback_days: u32) -> Self {
        DatePriceResolver { max_lookback_days }
    }

    /// Returns `(effective_date, value)` for the first feed hit at `date`
    /// or within the lookback window, or `None` when the window is dry.
    pub fn resolve(
        &self,
        date: NaiveDate,
        feed: &dyn ValuationFeed,
    ) -> Option<(NaiveDate, Decimal)> {
        if let Some(value) = feed.get_value(date) {
            return Some((date, value));
        }
        for offset in 1..=i64::from(self.max_lookback_days) {
            let earlier = date - Duration::days(offset);
            if let Some(value) = feed.get_value(earlier) {
                debug!(
                    "No valuation for {}, using earlier valuation from {}",
                    date, earlier
                );
                return Some((earlier, value));
            }
        }
        None
    }
}
