use log::warn;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Blocks implausible NAV drops caused by upstream data defects.
///
/// A single-tick collapse of more than half is far more likely a bad
/// ingestion day (e.g. a valuation missing most positions) than genuine
/// fund performance. The threshold is configurable since legitimate
/// high-volatility funds may need a looser bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SanityGuard {
    pub min_ratio: Decimal,
}

impl Default for SanityGuard {
    fn default() -> Self {
        SanityGuard {
            min_ratio: dec!(0.5),
        }
    }
}

impl SanityGuard {
    pub fn new(min_ratio: Decimal) -> Self {
        SanityGuard { min_ratio }
    }

    /// Returns the NAV to use and whether the candidate was blocked.
    /// A non-positive candidate can never be a price, whatever the ratio.
    pub fn evaluate(&self, candidate_nav: Decimal, last_valid_nav: Decimal) -> (Decimal, bool) {
        if candidate_nav <= Decimal::ZERO || candidate_nav < last_valid_nav * self.min_ratio {
            warn!(
                "Blocking implausible NAV {} (last valid {}, min ratio {})",
                candidate_nav, last_valid_nav, self.min_ratio
            );
            (last_valid_nav, true)
        } else {
            (candidate_nav, false)
        }
    }
}
