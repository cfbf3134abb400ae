//! Wall-clock time for the node
//!
//! The scheduler reasons in seconds since local midnight and detects day
//! boundaries from the calendar date, so the core works with a broken-down
//! `DateTime` snapshot instead of an epoch counter. Sources:
//! - `FixedClock` for tests and simulation
//! - `SystemClock` reading local time through `chrono` (std only)
//! - Board RTC drivers implementing `ClockSource` outside this crate

use core::fmt;
use core::fmt::Write as _;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use heapless::String;

use crate::constants::time::{SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE};
use crate::errors::{TimeError, TimeResult};
pub use crate::traits::time::ClockSource;

/// Seconds since local midnight, 0..=86399
pub type DaySeconds = u32;

/// Identifies a calendar day: `(year, day_of_year)`
pub type DayKey = (u16, u16);

/// Wall-clock snapshot
///
/// Immutable once built. `from_calendar` checks every field and derives the
/// weekday and day of year, so `seconds_since_midnight()` always equals
/// `hour * 3600 + min * 60 + sec`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DateTime {
    sec: u8,
    min: u8,
    hour: u8,
    day: u8,
    month: u8,
    year: u16,
    day_of_week: u8,
    day_of_year: u16,
}

impl DateTime {
    /// 1970-01-01T00:00:00, a Thursday
    pub const EPOCH: DateTime = DateTime {
        sec: 0,
        min: 0,
        hour: 0,
        day: 1,
        month: 1,
        year: 1970,
        day_of_week: 4,
        day_of_year: 1,
    };

    /// Build a snapshot from calendar fields
    ///
    /// `month` and `day` are 1-based. Years 1970 through 9999 are accepted.
    pub fn from_calendar(
        year: u16,
        month: u8,
        day: u8,
        hour: u8,
        min: u8,
        sec: u8,
    ) -> TimeResult<Self> {
        if !(1970..=9999).contains(&year) {
            return Err(TimeError::OutOfRange { field: "year", value: year.into() });
        }
        if !(1..=12).contains(&month) {
            return Err(TimeError::OutOfRange { field: "month", value: month.into() });
        }
        let date = NaiveDate::from_ymd_opt(year.into(), month.into(), day.into())
            .ok_or(TimeError::OutOfRange { field: "day", value: day.into() })?;
        if hour > 23 {
            return Err(TimeError::OutOfRange { field: "hour", value: hour.into() });
        }
        if min > 59 {
            return Err(TimeError::OutOfRange { field: "minute", value: min.into() });
        }
        if sec > 59 {
            return Err(TimeError::OutOfRange { field: "second", value: sec.into() });
        }

        Ok(Self {
            sec,
            min,
            hour,
            day,
            month,
            year,
            day_of_week: date.weekday().number_from_monday() as u8,
            day_of_year: date.ordinal() as u16,
        })
    }

    /// Build a snapshot for a date at a given number of seconds past midnight
    pub fn from_day_seconds(
        year: u16,
        month: u8,
        day: u8,
        seconds: DaySeconds,
    ) -> TimeResult<Self> {
        if seconds >= SECONDS_PER_DAY {
            return Err(TimeError::OutOfRange { field: "seconds", value: seconds });
        }
        Self::from_calendar(
            year,
            month,
            day,
            (seconds / SECONDS_PER_HOUR) as u8,
            (seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE) as u8,
            (seconds % SECONDS_PER_MINUTE) as u8,
        )
    }

    /// Seconds (0-59)
    pub fn sec(&self) -> u8 {
        self.sec
    }

    /// Minutes (0-59)
    pub fn min(&self) -> u8 {
        self.min
    }

    /// Hours (0-23)
    pub fn hour(&self) -> u8 {
        self.hour
    }

    /// Day of month (1-31)
    pub fn day(&self) -> u8 {
        self.day
    }

    /// Month (1-12)
    pub fn month(&self) -> u8 {
        self.month
    }

    /// Full year
    pub fn year(&self) -> u16 {
        self.year
    }

    /// ISO weekday, 1 = Monday through 7 = Sunday
    pub fn day_of_week(&self) -> u8 {
        self.day_of_week
    }

    /// Day of year (1-366)
    pub fn day_of_year(&self) -> u16 {
        self.day_of_year
    }

    /// Seconds since local midnight (0-86399)
    pub fn seconds_since_midnight(&self) -> DaySeconds {
        u32::from(self.hour) * SECONDS_PER_HOUR
            + u32::from(self.min) * SECONDS_PER_MINUTE
            + u32::from(self.sec)
    }

    /// Calendar day identity, changes exactly at local midnight
    pub fn day_key(&self) -> DayKey {
        (self.year, self.day_of_year)
    }

    /// Snapshot `seconds` later, rolling over days, months and years
    ///
    /// Returns `None` past the end of year 9999.
    pub fn checked_add_seconds(&self, seconds: u32) -> Option<Self> {
        let later = self
            .naive()?
            .checked_add_signed(TimeDelta::seconds(i64::from(seconds)))?;
        Self::try_from(later).ok()
    }

    fn naive(&self) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(self.year.into(), self.month.into(), self.day.into())?
            .and_hms_opt(self.hour.into(), self.min.into(), self.sec.into())
    }
}

impl fmt::Display for DateTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            self.year, self.month, self.day, self.hour, self.min, self.sec
        )
    }
}

impl TryFrom<NaiveDateTime> for DateTime {
    type Error = TimeError;

    fn try_from(value: NaiveDateTime) -> Result<Self, Self::Error> {
        let year = u16::try_from(value.year()).map_err(|_| TimeError::OutOfRange {
            field: "year",
            value: value.year().unsigned_abs(),
        })?;
        Self::from_calendar(
            year,
            value.month() as u8,
            value.day() as u8,
            value.hour() as u8,
            value.minute() as u8,
            value.second() as u8,
        )
    }
}

/// Parse an `HH:MM` or `HH:MM:SS` time of day into seconds since midnight
pub fn parse_time_of_day(text: &str) -> TimeResult<DaySeconds> {
    let text = text.trim();
    NaiveTime::parse_from_str(text, "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(text, "%H:%M"))
        .map(|time| time.num_seconds_from_midnight())
        .map_err(|_| TimeError::Malformed)
}

/// Render seconds since midnight as `HH:MM:SS`
///
/// Values of a day or more wrap around.
pub fn format_time_of_day(seconds: DaySeconds) -> String<8> {
    let seconds = seconds % SECONDS_PER_DAY;
    let mut out = String::new();
    // 8 bytes always fit "HH:MM:SS"
    let _ = write!(
        out,
        "{:02}:{:02}:{:02}",
        seconds / SECONDS_PER_HOUR,
        seconds % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
        seconds % SECONDS_PER_MINUTE
    );
    out
}

/// Settable clock for tests and simulation
#[derive(Debug, Clone)]
pub struct FixedClock {
    now: DateTime,
}

impl FixedClock {
    /// Clock frozen at `now`
    pub fn new(now: DateTime) -> Self {
        Self { now }
    }

    /// Jump to a new instant
    pub fn set(&mut self, now: DateTime) {
        self.now = now;
    }

    /// Move forward, rolling over midnight as a real clock would
    ///
    /// An advance past the end of year 9999 leaves the clock where it is.
    pub fn advance_seconds(&mut self, seconds: u32) {
        if let Some(next) = self.now.checked_add_seconds(seconds) {
            self.now = next;
        }
    }
}

impl ClockSource for FixedClock {
    fn now(&self) -> DateTime {
        self.now
    }
}

/// Local wall-clock time of the host
#[cfg(feature = "std")]
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

#[cfg(feature = "std")]
impl ClockSource for SystemClock {
    fn now(&self) -> DateTime {
        let local = chrono::Local::now().naive_local();
        DateTime::try_from(local).unwrap_or_else(|_err| {
            log_warn!("System clock out of range ({}), reporting epoch", _err);
            DateTime::EPOCH
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields() {
        // 2024-03-01 is a Friday, day 61 of a leap year
        let dt = DateTime::from_calendar(2024, 3, 1, 18, 30, 15).unwrap();
        assert_eq!(dt.day_of_week(), 5);
        assert_eq!(dt.day_of_year(), 61);
        assert_eq!(dt.seconds_since_midnight(), 18 * 3600 + 30 * 60 + 15);

        let epoch = DateTime::from_calendar(1970, 1, 1, 0, 0, 0).unwrap();
        assert_eq!(epoch, DateTime::EPOCH);
    }

    #[test]
    fn rejects_impossible_dates() {
        assert_eq!(
            DateTime::from_calendar(2023, 2, 29, 0, 0, 0),
            Err(TimeError::OutOfRange { field: "day", value: 29 })
        );
        assert!(DateTime::from_calendar(2024, 2, 29, 0, 0, 0).is_ok());
        assert!(DateTime::from_calendar(2024, 13, 1, 0, 0, 0).is_err());
        assert!(DateTime::from_calendar(2024, 1, 1, 24, 0, 0).is_err());
        assert!(DateTime::from_day_seconds(2024, 1, 1, 86_400).is_err());
    }

    #[test]
    fn add_seconds_rolls_over_year_end() {
        let dt = DateTime::from_calendar(2023, 12, 31, 23, 59, 0).unwrap();
        let next = dt.checked_add_seconds(120).unwrap();
        assert_eq!((next.year(), next.month(), next.day()), (2024, 1, 1));
        assert_eq!(next.seconds_since_midnight(), 60);
        assert_eq!(next.day_of_year(), 1);
        assert_ne!(dt.day_key(), next.day_key());
    }

    #[test]
    fn fixed_clock_advances() {
        let mut clock = FixedClock::new(DateTime::from_calendar(2024, 2, 28, 23, 0, 0).unwrap());
        clock.advance_seconds(2 * 3600);
        let now = clock.now();
        assert_eq!((now.month(), now.day(), now.hour()), (2, 29, 1));
    }

    #[test]
    fn advance_stops_at_year_9999() {
        let last = DateTime::from_calendar(9999, 12, 31, 23, 59, 0).unwrap();
        assert_eq!(last.checked_add_seconds(60), None);

        let mut clock = FixedClock::new(last);
        clock.advance_seconds(3600);
        assert_eq!(clock.now(), last);
        clock.advance_seconds(59);
        assert_eq!(clock.now().sec(), 59);
    }

    #[test]
    fn add_seconds_crosses_leap_day() {
        let dt = DateTime::from_calendar(2024, 2, 28, 12, 0, 0).unwrap();
        let next = dt.checked_add_seconds(2 * 86_400).unwrap();
        assert_eq!((next.month(), next.day(), next.day_of_year()), (3, 1, 61));
        assert_eq!(next.day_of_week(), 5);
    }

    #[test]
    fn time_of_day_text() {
        assert_eq!(parse_time_of_day("18:00"), Ok(64_800));
        assert_eq!(parse_time_of_day("06:00:30"), Ok(21_630));
        assert_eq!(parse_time_of_day("7:05"), Ok(7 * 3600 + 300));
        assert_eq!(parse_time_of_day("24:00"), Err(TimeError::Malformed));
        assert_eq!(parse_time_of_day("12:60"), Err(TimeError::Malformed));
        assert_eq!(parse_time_of_day("18"), Err(TimeError::Malformed));
        assert_eq!(parse_time_of_day("18:00:00:00"), Err(TimeError::Malformed));
        assert_eq!(parse_time_of_day("ab:cd"), Err(TimeError::Malformed));

        assert_eq!(format_time_of_day(79_200).as_str(), "22:00:00");
        assert_eq!(format_time_of_day(59).as_str(), "00:00:59");
    }

    #[cfg(feature = "std")]
    #[test]
    fn displays_iso8601() {
        let dt = DateTime::from_calendar(2024, 6, 1, 6, 5, 0).unwrap();
        assert_eq!(dt.to_string(), "2024-06-01T06:05:00");
    }

    #[test]
    fn converts_from_chrono() {
        let naive = chrono::NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(22, 0, 0)
            .unwrap();
        let dt = DateTime::try_from(naive).unwrap();
        assert_eq!(dt.seconds_since_midnight(), 79_200);
        assert_eq!(dt.day_of_week(), 6);
    }
}
