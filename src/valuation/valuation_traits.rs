use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Contract consumed by the engine: date to aggregated fund value.
///
/// Values are non-negative, currency-normalized and already summed across
/// all holdings for the date; collapsing duplicate raw rows is the feed
/// loader's responsibility, not the engine's.
pub trait ValuationFeed {
    fn get_value(&self, date: NaiveDate) -> Option<Decimal>;
}

impl ValuationFeed for HashMap<NaiveDate, Decimal> {
    fn get_value(&self, date: NaiveDate) -> Option<Decimal> {
        self.get(&date).copied()
    }
}
