use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use chrono_tz::Tz;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::engine::engine_errors::EngineError;
use crate::engine::engine_model::{
    EngineState, NavSample, NavTag, RedemptionBasis, WithdrawalMode,
};
use crate::engine::sanity_guard::SanityGuard;
use crate::errors::Result;
use crate::ledger::{ContributionEvent, ContributionLedger, EventKind};
use crate::valuation::{DatePriceResolver, ValuationFeed};

/// Replays a contribution/withdrawal ledger against a daily valuation
/// feed, producing per-contributor unit balances and a NAV audit trail.
///
/// The engine is stateless between calls: every replay starts from an
/// empty fund, so identical inputs always produce identical output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavEngine {
    resolver: DatePriceResolver,
    guard: SanityGuard,
    withdrawal_mode: WithdrawalMode,
    redemption_basis: RedemptionBasis,
    /// Timezone used to map event timestamps to calendar-date keys.
    timezone: Tz,
}

impl Default for NavEngine {
    fn default() -> Self {
        NavEngine {
            resolver: DatePriceResolver::default(),
            guard: SanityGuard::default(),
            withdrawal_mode: WithdrawalMode::default(),
            redemption_basis: RedemptionBasis::default(),
            timezone: Tz::UTC,
        }
    }
}

impl NavEngine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_resolver(mut self, resolver: DatePriceResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn with_guard(mut self, guard: SanityGuard) -> Self {
        self.guard = guard;
        self
    }

    pub fn with_withdrawal_mode(mut self, mode: WithdrawalMode) -> Self {
        self.withdrawal_mode = mode;
        self
    }

    pub fn with_redemption_basis(mut self, basis: RedemptionBasis) -> Self {
        self.redemption_basis = basis;
        self
    }

    pub fn with_timezone(mut self, timezone: Tz) -> Self {
        self.timezone = timezone;
        self
    }

    /// Replays a ledger that already guarantees replay order.
    pub fn process(&self, ledger: &ContributionLedger, feed: &dyn ValuationFeed) -> Result<EngineState> {
        self.process_ledger(ledger.events(), feed)
    }

    /// Replays a slice of events sorted ascending by timestamp.
    ///
    /// Unordered events and withdrawals for contributors with no prior
    /// units fail loudly. Missing or implausible valuations never do:
    /// they are absorbed into the audit trail as Fallback/Blocked entries.
    pub fn process_ledger(
        &self,
        events: &[ContributionEvent],
        feed: &dyn ValuationFeed,
    ) -> Result<EngineState> {
        let mut total_units = Decimal::ZERO;
        let mut per_contributor_units: HashMap<String, Decimal> = HashMap::new();
        let mut audit_trail: Vec<NavSample> = Vec::with_capacity(events.len());

        let mut last_date: Option<NaiveDate> = None;
        let mut units_at_start_of_day = Decimal::ZERO;
        // Inception price: the first unit always costs 1.0
        let mut last_valid_nav = Decimal::ONE;

        for (index, event) in events.iter().enumerate() {
            if index > 0 {
                let previous = events[index - 1].timestamp;
                if event.timestamp < previous {
                    return Err(EngineError::UnorderedLedger {
                        index,
                        timestamp: event.timestamp,
                        previous,
                    }
                    .into());
                }
            }
            if event.amount <= Decimal::ZERO {
                return Err(EngineError::InvalidEvent(format!(
                    "non-positive amount {} for contributor {}",
                    event.amount, event.contributor_id
                ))
                .into());
            }

            let date = self.date_key(event.timestamp);
            // Snapshot the unit count before the first event of each
            // calendar date so every same-day event prices off one NAV.
            if last_date != Some(date) {
                units_at_start_of_day = total_units;
                last_date = Some(date);
            }

            match event.kind {
                EventKind::Contribution => {
                    let divisor = self.start_of_day_divisor(units_at_start_of_day, total_units);
                    let (candidate, tag) =
                        self.candidate_nav(date, total_units, divisor, last_valid_nav, feed);
                    let (used_nav, blocked) = self.guard.evaluate(candidate, last_valid_nav);
                    let tag = if blocked { NavTag::Blocked } else { tag };

                    let units_issued = event.amount / used_nav;
                    *per_contributor_units
                        .entry(event.contributor_id.clone())
                        .or_insert(Decimal::ZERO) += units_issued;
                    total_units += units_issued;
                    if !blocked {
                        last_valid_nav = used_nav;
                    }

                    debug!(
                        "{} contributed {} on {} at NAV {} ({} units)",
                        event.contributor_id, event.amount, date, used_nav, units_issued
                    );
                    audit_trail.push(NavSample {
                        date,
                        used_nav,
                        tag,
                        clamped: false,
                    });
                }
                EventKind::Withdrawal => {
                    let held = per_contributor_units
                        .get(&event.contributor_id)
                        .copied()
                        .unwrap_or(Decimal::ZERO);
                    if held <= Decimal::ZERO {
                        return Err(EngineError::UnknownContributor {
                            contributor_id: event.contributor_id.clone(),
                            date,
                        }
                        .into());
                    }

                    let divisor = match self.redemption_basis {
                        RedemptionBasis::StartOfDay => {
                            self.start_of_day_divisor(units_at_start_of_day, total_units)
                        }
                        RedemptionBasis::CurrentUnits => total_units,
                    };
                    let (candidate, tag) =
                        self.candidate_nav(date, total_units, divisor, last_valid_nav, feed);
                    let (used_nav, blocked) = self.guard.evaluate(candidate, last_valid_nav);
                    let tag = if blocked { NavTag::Blocked } else { tag };

                    let requested = event.amount / used_nav;
                    let clamped = requested > held;
                    if clamped && self.withdrawal_mode == WithdrawalMode::Strict {
                        return Err(EngineError::InsufficientUnits {
                            contributor_id: event.contributor_id.clone(),
                            date,
                            requested,
                            held,
                        }
                        .into());
                    }
                    let redeemed = if clamped {
                        warn!(
                            "Clamping withdrawal for {} on {}: requested {} units, held {}",
                            event.contributor_id, date, requested, held
                        );
                        held
                    } else {
                        requested
                    };

                    if let Some(balance) = per_contributor_units.get_mut(&event.contributor_id) {
                        *balance -= redeemed;
                    }
                    total_units -= redeemed;
                    if !blocked {
                        last_valid_nav = used_nav;
                    }

                    debug!(
                        "{} withdrew {} on {} at NAV {} ({} units)",
                        event.contributor_id, event.amount, date, used_nav, redeemed
                    );
                    audit_trail.push(NavSample {
                        date,
                        used_nav,
                        tag,
                        clamped,
                    });
                }
            }
        }

        Ok(EngineState {
            total_units,
            per_contributor_units,
            audit_trail,
        })
    }

    fn date_key(&self, timestamp: DateTime<Utc>) -> NaiveDate {
        timestamp.with_timezone(&self.timezone).date_naive()
    }

    /// Start-of-day unit count, falling back to the current count when the
    /// snapshot is zero (first trading day, or a fund drained to zero).
    fn start_of_day_divisor(&self, units_at_start_of_day: Decimal, total_units: Decimal) -> Decimal {
        if units_at_start_of_day > Decimal::ZERO {
            units_at_start_of_day
        } else {
            total_units
        }
    }

    /// Derives the candidate NAV and its audit tag for one event date.
    /// The caller still passes the result through the sanity guard.
    fn candidate_nav(
        &self,
        date: NaiveDate,
        total_units: Decimal,
        divisor_units: Decimal,
        last_valid_nav: Decimal,
        feed: &dyn ValuationFeed,
    ) -> (Decimal, NavTag) {
        if total_units.is_zero() {
            return (Decimal::ONE, NavTag::First);
        }
        match self.resolver.resolve(date, feed) {
            Some((effective_date, value)) => {
                let nav = value / divisor_units;
                if effective_date == date {
                    (nav, NavTag::Historical)
                } else {
                    (nav, NavTag::Fallback(Some(effective_date)))
                }
            }
            None => {
                warn!(
                    "No valuation within {} days of {}; reusing last valid NAV {}",
                    self.resolver.max_lookback_days, date, last_valid_nav
                );
                (last_valid_nav, NavTag::Fallback(None))
            }
        }
    }
}
