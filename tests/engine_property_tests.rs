//! Property-based tests for the NAV replay engine.
//!
//! These verify that the engine's universal properties (idempotence,
//! conservation of units, non-negativity, same-day NAV consistency and
//! the sanity-guard rule) hold across randomly generated ledgers and
//! feeds, using the `proptest` crate for test case generation.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use fundpool_core::engine::{EngineError, NavEngine, NavTag, SanityGuard};
use fundpool_core::errors::Error;
use fundpool_core::ledger::{ContributionEvent, ContributionLedger, EventKind};
use fundpool_core::reporting::calculate_ownership_reports;

// =============================================================================
// Generators
// =============================================================================

fn base_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
}

fn ts_for(day_offset: u32) -> DateTime<Utc> {
    let date = base_date() + Duration::days(i64::from(day_offset));
    Utc.from_utc_datetime(&date.and_hms_opt(12, 0, 0).unwrap())
}

fn arb_contributor() -> impl Strategy<Value = String> {
    prop::sample::select(vec![
        "alice".to_string(),
        "bob".to_string(),
        "carol".to_string(),
    ])
}

/// Cash amounts between 0.01 and 10,000.00, in cents.
fn arb_amount() -> impl Strategy<Value = Decimal> {
    (1i64..1_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn arb_contribution() -> impl Strategy<Value = ContributionEvent> {
    (arb_contributor(), 0u32..30, arb_amount()).prop_map(|(id, day, amount)| {
        ContributionEvent::new(id, ts_for(day), amount, EventKind::Contribution).unwrap()
    })
}

fn arb_event() -> impl Strategy<Value = ContributionEvent> {
    (arb_contributor(), 0u32..30, arb_amount(), any::<bool>()).prop_map(
        |(id, day, amount, is_withdrawal)| {
            let kind = if is_withdrawal {
                EventKind::Withdrawal
            } else {
                EventKind::Contribution
            };
            ContributionEvent::new(id, ts_for(day), amount, kind).unwrap()
        },
    )
}

fn arb_contribution_ledger() -> impl Strategy<Value = ContributionLedger> {
    prop::collection::vec(arb_contribution(), 1..40).prop_map(ContributionLedger::from_events)
}

fn arb_mixed_ledger() -> impl Strategy<Value = ContributionLedger> {
    prop::collection::vec(arb_event(), 1..40).prop_map(ContributionLedger::from_events)
}

/// Fund valuations between 500.00 and 5,000.00 on a random subset of days.
fn arb_feed() -> impl Strategy<Value = HashMap<NaiveDate, Decimal>> {
    prop::collection::hash_map(0u32..30, 50_000i64..500_000, 0..20).prop_map(|raw| {
        raw.into_iter()
            .map(|(day, cents)| (base_date() + Duration::days(i64::from(day)), Decimal::new(cents, 2)))
            .collect()
    })
}

fn assert_units_conserved(
    total_units: Decimal,
    per_contributor: &HashMap<String, Decimal>,
) -> Result<(), TestCaseError> {
    let sum: Decimal = per_contributor.values().copied().sum();
    prop_assert!(
        (sum - total_units).abs() <= dec!(0.000000001),
        "unit sum {} != total {}",
        sum,
        total_units
    );
    for (id, units) in per_contributor {
        prop_assert!(*units >= Decimal::ZERO, "negative balance for {}: {}", id, units);
    }
    Ok(())
}

// =============================================================================
// Property Tests
// =============================================================================

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Replaying identical inputs twice yields identical state and audit
    /// trail; the engine carries nothing between calls.
    #[test]
    fn prop_replay_is_idempotent(
        ledger in arb_contribution_ledger(),
        feed in arb_feed()
    ) {
        let engine = NavEngine::new();
        let first = engine.process(&ledger, &feed).unwrap();
        let second = engine.process(&ledger, &feed).unwrap();
        prop_assert_eq!(first, second);
    }

    /// Unit balances always sum to the total, and no balance ever goes
    /// negative, after any contributions-only replay.
    #[test]
    fn prop_units_are_conserved(
        ledger in arb_contribution_ledger(),
        feed in arb_feed()
    ) {
        let state = NavEngine::new().process(&ledger, &feed).unwrap();
        assert_units_conserved(state.total_units, &state.per_contributor_units)?;
        prop_assert_eq!(state.audit_trail.len(), ledger.len());
    }

    /// Every event on one calendar date prices off the same NAV. Dates
    /// that mint the first units (First tag) are excluded: their later
    /// same-day events price off the freshly issued units by design.
    #[test]
    fn prop_same_day_nav_is_consistent(
        ledger in arb_contribution_ledger(),
        feed in arb_feed()
    ) {
        let state = NavEngine::new().process(&ledger, &feed).unwrap();

        let inception_dates: HashSet<NaiveDate> = state
            .audit_trail
            .iter()
            .filter(|s| s.tag == NavTag::First)
            .map(|s| s.date)
            .collect();

        let mut nav_by_date: HashMap<NaiveDate, Decimal> = HashMap::new();
        for sample in &state.audit_trail {
            if inception_dates.contains(&sample.date) {
                continue;
            }
            let nav = nav_by_date.entry(sample.date).or_insert(sample.used_nav);
            prop_assert_eq!(*nav, sample.used_nav, "NAV diverged on {}", sample.date);
        }
    }

    /// The first contribution into an empty ledger always prices at 1.0.
    #[test]
    fn prop_inception_prices_at_one(
        ledger in arb_contribution_ledger(),
        feed in arb_feed()
    ) {
        let state = NavEngine::new().process(&ledger, &feed).unwrap();
        prop_assert_eq!(state.audit_trail[0].used_nav, dec!(1.0));
        prop_assert_eq!(state.audit_trail[0].tag, NavTag::First);
    }

    /// Mixed ledgers either replay cleanly (conserving units, clamping
    /// withdrawals to zero) or fail loudly on a withdrawal for a
    /// contributor holding nothing.
    #[test]
    fn prop_mixed_ledger_conserves_or_rejects(
        ledger in arb_mixed_ledger(),
        feed in arb_feed()
    ) {
        match NavEngine::new().process(&ledger, &feed) {
            Ok(state) => {
                assert_units_conserved(state.total_units, &state.per_contributor_units)?;
                prop_assert!(state.total_units >= Decimal::ZERO);
            }
            Err(Error::Engine(EngineError::UnknownContributor { .. })) => {}
            Err(other) => prop_assert!(false, "unexpected error: {}", other),
        }
    }

    /// The guard rule itself: a candidate below half the last valid NAV
    /// is blocked and replaced, anything else passes through untouched.
    #[test]
    fn prop_guard_blocks_below_ratio(
        candidate_raw in 1i64..10_000_000,
        last_valid_raw in 1i64..10_000_000
    ) {
        let candidate = Decimal::new(candidate_raw, 4);
        let last_valid = Decimal::new(last_valid_raw, 4);
        let (used, blocked) = SanityGuard::default().evaluate(candidate, last_valid);

        if candidate < last_valid * dec!(0.5) {
            prop_assert!(blocked);
            prop_assert_eq!(used, last_valid);
        } else {
            prop_assert!(!blocked);
            prop_assert_eq!(used, candidate);
        }
    }

    /// Ownership percentages across all contributors always add up to
    /// (rounded) 100% for a non-empty fund.
    #[test]
    fn prop_ownership_percentages_sum_to_hundred(
        ledger in arb_contribution_ledger(),
        feed in arb_feed(),
        value_cents in 100_000i64..1_000_000
    ) {
        let state = NavEngine::new().process(&ledger, &feed).unwrap();
        let reports = calculate_ownership_reports(&state, &ledger, Decimal::new(value_cents, 2));

        let pct_sum: Decimal = reports.iter().map(|r| r.ownership_pct).sum();
        prop_assert!(
            (pct_sum - dec!(100)).abs() <= dec!(0.05),
            "ownership percentages sum to {}",
            pct_sum
        );
    }
}
