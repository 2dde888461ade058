// --- POOL METRICS CONSTANTS ---
/// Days used for linear (non-compounding) annualization
pub const DAYS_PER_YEAR: i64 = 365;

/// APR is reported in percent
pub const PERCENT: i64 = 100;

/// Accepted layout of a persisted calendar date
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Row durations are measured in milliseconds and rounded up to whole days
pub const MILLIS_PER_DAY: i64 = 86_400_000;
