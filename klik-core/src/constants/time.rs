//! Time-Related Constants
//!
//! Clock arithmetic used by the scheduler and the interval timers, plus the
//! cadences a node runs with when its configuration does not override them.

// ===== TIME UNIT CONVERSIONS =====

/// Seconds per minute.
pub const SECONDS_PER_MINUTE: u32 = 60;

/// Minutes per hour.
pub const MINUTES_PER_HOUR: u32 = 60;

/// Hours per day.
pub const HOURS_PER_DAY: u32 = 24;

/// Seconds per hour.
pub const SECONDS_PER_HOUR: u32 = SECONDS_PER_MINUTE * MINUTES_PER_HOUR;

/// Seconds per day.
pub const SECONDS_PER_DAY: u32 = SECONDS_PER_HOUR * HOURS_PER_DAY;

/// Largest valid seconds-since-midnight value (23:59:59).
pub const LAST_SECOND_OF_DAY: u32 = SECONDS_PER_DAY - 1;

/// Minutes per day, the upper bound for any configured interval.
pub const MINUTES_PER_DAY: u32 = MINUTES_PER_HOUR * HOURS_PER_DAY;

// ===== CADENCES =====

/// Default sensor sampling interval (minutes).
///
/// Ten minutes across a 15-sample history covers the last two and a half
/// hours, enough for a temperature trend on the status page.
pub const DEFAULT_SAMPLE_INTERVAL_MIN: u16 = 10;

/// Default scheduler tick interval (minutes).
///
/// Schedule times are honoured to within this many minutes. Polling faster
/// is correct but spends more time awake.
pub const DEFAULT_SWITCH_INTERVAL_MIN: u16 = 3;
