use std::collections::HashMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// How the NAV used for an audit-trail entry was derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavTag {
    /// First units issued into an empty fund, priced at the inception NAV.
    #[serde(rename = "FIRST")]
    First,
    /// Exact-date valuation hit.
    #[serde(rename = "HISTORICAL")]
    Historical,
    /// Earlier-date valuation (`Some(effective_date)`) or, when the whole
    /// lookback window was dry, the last valid NAV (`None`).
    #[serde(rename = "FALLBACK")]
    Fallback(Option<NaiveDate>),
    /// Candidate NAV rejected by the sanity guard; last valid NAV reused.
    #[serde(rename = "BLOCKED")]
    Blocked,
}

/// One audit-trail entry per processed event.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NavSample {
    pub date: NaiveDate,
    pub used_nav: Decimal,
    pub tag: NavTag,
    /// Set when a withdrawal was clamped to the contributor's balance.
    pub clamped: bool,
}

/// Result of a full ledger replay.
///
/// Produced fresh on every call; the engine holds no state between
/// replays. Invariant: the unit balances sum to `total_units` and no
/// balance is ever negative.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineState {
    pub total_units: Decimal,
    pub per_contributor_units: HashMap<String, Decimal>,
    pub audit_trail: Vec<NavSample>,
}

impl EngineState {
    pub fn units_for(&self, contributor_id: &str) -> Decimal {
        self.per_contributor_units
            .get(contributor_id)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// Policy for withdrawals that exceed the contributor's balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WithdrawalMode {
    /// Redeem the full balance and flag the audit entry.
    #[default]
    #[serde(rename = "CLAMP")]
    Clamp,
    /// Fail the replay with `EngineError::InsufficientUnits`.
    #[serde(rename = "STRICT")]
    Strict,
}

/// Unit divisor used when pricing a withdrawal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum RedemptionBasis {
    /// Price off the units outstanding at the start of the calendar date,
    /// keeping every same-day event on one NAV.
    #[default]
    #[serde(rename = "START_OF_DAY")]
    StartOfDay,
    /// Price off the current unit count, including same-day purchases.
    #[serde(rename = "CURRENT_UNITS")]
    CurrentUnits,
}
