use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::{DECIMAL_PRECISION, DISPLAY_DECIMAL_PRECISION};
use crate::engine::EngineState;
use crate::ledger::ContributionLedger;

use super::ownership_model::OwnershipReport;

/// NAV implied by a current valuation: total value over outstanding
/// units, or the inception price of 1.0 for an empty fund.
pub fn current_nav(state: &EngineState, current_value: Decimal) -> Decimal {
    if state.total_units.is_zero() {
        Decimal::ONE
    } else {
        current_value / state.total_units
    }
}

/// Derives per-contributor reports from engine output and a current
/// valuation. Pure: reads the state and ledger, touches nothing else.
///
/// This is the display boundary, so it is the only place values are
/// rounded. Reports are sorted by contributor id for stable output.
pub fn calculate_ownership_reports(
    state: &EngineState,
    ledger: &ContributionLedger,
    current_value: Decimal,
) -> Vec<OwnershipReport> {
    let nav = current_nav(state, current_value);
    let net_contributed = ledger.net_contributed();
    debug!(
        "Building ownership reports for {} contributors at NAV {}",
        state.per_contributor_units.len(),
        nav
    );

    let mut reports: Vec<OwnershipReport> = state
        .per_contributor_units
        .iter()
        .map(|(contributor_id, units)| {
            let net = net_contributed
                .get(contributor_id)
                .copied()
                .unwrap_or(Decimal::ZERO);
            let market_value = units * nav;
            let gain = market_value - net;
            let ownership_pct = if state.total_units.is_zero() {
                Decimal::ZERO
            } else {
                units / state.total_units * dec!(100)
            };
            // Zero by convention when nothing (net) was contributed
            let return_pct = if net > Decimal::ZERO {
                gain / net * dec!(100)
            } else {
                Decimal::ZERO
            };

            OwnershipReport {
                contributor_id: contributor_id.clone(),
                units: units.round_dp(DECIMAL_PRECISION),
                net_contributed: net.round_dp(DISPLAY_DECIMAL_PRECISION),
                market_value: market_value.round_dp(DISPLAY_DECIMAL_PRECISION),
                gain_amount: gain.round_dp(DISPLAY_DECIMAL_PRECISION),
                ownership_pct: ownership_pct.round_dp(DISPLAY_DECIMAL_PRECISION),
                return_pct: return_pct.round_dp(DISPLAY_DECIMAL_PRECISION),
            }
        })
        .collect();

    reports.sort_by(|a, b| a.contributor_id.cmp(&b.contributor_id));
    reports
}
