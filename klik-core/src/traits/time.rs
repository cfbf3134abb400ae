//! Clock Source Abstraction
//!
//! The node needs local wall-clock time: schedule rules are expressed in
//! seconds since midnight and latches re-arm when the calendar day changes.
//!
//! ## Implementation Requirements
//!
//! - Report local time, not UTC, so schedule times mean what users expect
//! - Change the calendar day exactly at local midnight
//! - Stay monotonic within a day; a clock that jumps backwards will make the
//!   scheduler re-evaluate earlier windows but never re-fire latched rules
//!
//! ## Example Implementation
//!
//! ```rust
//! use klik_core::traits::ClockSource;
//! use klik_core::time::DateTime;
//!
//! struct Ds3231 {
//!     // ... I2C handle
//! }
//!
//! impl ClockSource for Ds3231 {
//!     fn now(&self) -> DateTime {
//!         // Read BCD registers, convert, and build the snapshot
//!         DateTime::from_calendar(2024, 6, 1, 12, 0, 0).unwrap_or(DateTime::EPOCH)
//!     }
//! }
//! ```

use crate::time::DateTime;

/// Source of wall-clock time
pub trait ClockSource {
    /// Current local time
    fn now(&self) -> DateTime;
}
