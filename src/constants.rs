/// Decimal precision for unit balances
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default calendar-day lookback when a date is missing from the valuation feed.
/// Seven days covers a long weekend plus one holiday.
pub const DEFAULT_MAX_LOOKBACK_DAYS: u32 = 7;
