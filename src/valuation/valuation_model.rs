use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::valuation_errors::ValuationError;
use super::valuation_traits::ValuationFeed;

/// One day of aggregated fund valuation in the base currency.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValuationPoint {
    pub date: NaiveDate,
    pub total_value: Decimal,
}

impl ValuationPoint {
    pub fn new(date: NaiveDate, total_value: Decimal) -> Result<Self, ValuationError> {
        if total_value < Decimal::ZERO {
            return Err(ValuationError::NegativeValue {
                date,
                value: total_value,
            });
        }
        Ok(ValuationPoint { date, total_value })
    }
}

/// In-memory valuation feed built from validated points.
///
/// A later point for the same date overwrites the earlier one.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DailyValuationFeed {
    values: HashMap<NaiveDate, Decimal>,
}

impl DailyValuationFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<ValuationPoint>) -> Self {
        let mut feed = DailyValuationFeed::new();
        for point in points {
            feed.insert(point);
        }
        feed
    }

    /// Parses the boundary JSON contract: a `{"YYYY-MM-DD": value}` map,
    /// rejecting negative values before they enter the feed.
    pub fn from_json_str(json: &str) -> crate::errors::Result<Self> {
        let raw: HashMap<NaiveDate, Decimal> = serde_json::from_str(json)?;
        let mut feed = DailyValuationFeed::new();
        for (date, total_value) in raw {
            feed.insert(ValuationPoint::new(date, total_value)?);
        }
        Ok(feed)
    }

    pub fn insert(&mut self, point: ValuationPoint) {
        self.values.insert(point.date, point.total_value);
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl ValuationFeed for DailyValuationFeed {
    fn get_value(&self, date: NaiveDate) -> Option<Decimal> {
        self.values.get(&date).copied()
    }
}
