use std::collections::HashMap;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::ledger_errors::LedgerError;

/// Direction of a cash flow into or out of the pooled fund.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventKind {
    #[serde(rename = "CONTRIBUTION")]
    Contribution,
    #[serde(rename = "WITHDRAWAL")]
    Withdrawal,
}

impl EventKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventKind::Contribution => "CONTRIBUTION",
            EventKind::Withdrawal => "WITHDRAWAL",
        }
    }
}

/// Domain model representing a contributor cash flow.
///
/// Events are immutable once constructed; replay order is by timestamp with
/// insertion order as the tie-break (see [`ContributionLedger`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContributionEvent {
    pub contributor_id: String,
    pub timestamp: DateTime<Utc>,
    pub amount: Decimal,
    pub kind: EventKind,
}

impl ContributionEvent {
    /// Builds a validated event. Rejects blank contributor ids and
    /// non-positive amounts before they can reach the replay algorithm.
    pub fn new(
        contributor_id: impl Into<String>,
        timestamp: DateTime<Utc>,
        amount: Decimal,
        kind: EventKind,
    ) -> Result<Self, LedgerError> {
        let contributor_id = contributor_id.into();
        if contributor_id.trim().is_empty() {
            return Err(LedgerError::EmptyContributorId);
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(amount));
        }
        Ok(ContributionEvent {
            contributor_id,
            timestamp,
            amount,
            kind,
        })
    }
}

/// Input model for events arriving at the import boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewContributionEvent {
    pub contributor_id: String,
    pub timestamp: String,
    pub amount: Decimal,
    pub kind: EventKind,
}

impl NewContributionEvent {
    /// Validates the raw input data without converting it.
    pub fn validate(&self) -> Result<(), LedgerError> {
        if self.contributor_id.trim().is_empty() {
            return Err(LedgerError::EmptyContributorId);
        }
        if self.amount <= Decimal::ZERO {
            return Err(LedgerError::NonPositiveAmount(self.amount));
        }
        if DateTime::parse_from_rfc3339(&self.timestamp).is_err() {
            return Err(LedgerError::InvalidTimestamp(self.timestamp.clone()));
        }
        Ok(())
    }

    /// Converts the validated input into a domain event.
    pub fn into_event(self) -> Result<ContributionEvent, LedgerError> {
        self.validate()?;
        let timestamp = DateTime::parse_from_rfc3339(&self.timestamp)
            .map_err(|_| LedgerError::InvalidTimestamp(self.timestamp.clone()))?
            .with_timezone(&Utc);
        ContributionEvent::new(self.contributor_id, timestamp, self.amount, self.kind)
    }
}

/// Ordered container of contribution/withdrawal events.
///
/// Keeps events in replay order: ascending by timestamp, with insertion
/// order preserved among events sharing a timestamp.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContributionLedger {
    events: Vec<ContributionEvent>,
}

impl ContributionLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a ledger from events in any order.
    pub fn from_events(events: Vec<ContributionEvent>) -> Self {
        let mut ledger = ContributionLedger { events };
        // Stable sort keeps insertion order for equal timestamps
        ledger.events.sort_by_key(|event| event.timestamp);
        ledger
    }

    /// Parses the boundary JSON contract: an array of raw events with
    /// RFC-3339 timestamps, validated before they enter the ledger.
    pub fn from_json_str(json: &str) -> crate::errors::Result<Self> {
        let raw: Vec<NewContributionEvent> = serde_json::from_str(json)?;
        let mut events = Vec::with_capacity(raw.len());
        for new_event in raw {
            events.push(new_event.into_event()?);
        }
        Ok(Self::from_events(events))
    }

    pub fn push(&mut self, event: ContributionEvent) {
        self.events.push(event);
        self.events.sort_by_key(|event| event.timestamp);
    }

    pub fn events(&self) -> &[ContributionEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Net cash flow per contributor: contributions minus withdrawals.
    /// Tracked independently of unit math; used for dollar-return display.
    pub fn net_contributed(&self) -> HashMap<String, Decimal> {
        let mut net: HashMap<String, Decimal> = HashMap::new();
        for event in &self.events {
            let entry = net
                .entry(event.contributor_id.clone())
                .or_insert(Decimal::ZERO);
            match event.kind {
                EventKind::Contribution => *entry += event.amount,
                EventKind::Withdrawal => *entry -= event.amount,
            }
        }
        net
    }
}
