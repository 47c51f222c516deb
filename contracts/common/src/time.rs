//! Durations in ledger seconds.

pub const HOUR: u64 = 3_600;
pub const DAY: u64 = 24 * HOUR;
/// 365-day year used for annualised reward rates.
pub const YEAR: u64 = 365 * DAY;
