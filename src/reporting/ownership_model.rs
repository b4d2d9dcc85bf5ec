use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-contributor dollar view of the fund, derived from engine output
/// plus a current valuation. Consumed by the presentation layer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipReport {
    pub contributor_id: String,
    pub units: Decimal,
    pub net_contributed: Decimal,
    pub market_value: Decimal,
    pub gain_amount: Decimal,
    pub ownership_pct: Decimal,
    pub return_pct: Decimal,
}
