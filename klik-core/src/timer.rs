//! Wall-clock interval timers for the cooperative loop
//!
//! A timer divides each day into slots of `period` seconds and fires once
//! per slot. Whether it is due is worked out from the clock reading, not
//! from a countdown, so a loop that stalls for a while fires once on
//! resuming and carries on aligned to the clock:
//!
//! ```text
//! period = 180 s
//! polls:   18:00:05  18:01:00  18:03:02  18:09:40  18:10:00
//! slot:       360       360       361       363       363
//! fires:      yes        no       yes       yes        no
//! ```

use crate::time::{DateTime, DayKey};

/// Fires once per wall-clock slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalTimer {
    period_secs: u32,
    last_slot: Option<(DayKey, u32)>,
}

impl IntervalTimer {
    /// Timer with a period in seconds (0 is treated as 1)
    pub fn new(period_secs: u32) -> Self {
        Self {
            period_secs: period_secs.max(1),
            last_slot: None,
        }
    }

    /// Whether the timer is due at `now`; marks the slot as handled if so
    ///
    /// Always due on the first call and on the first call of a new day.
    pub fn poll(&mut self, now: &DateTime) -> bool {
        let slot = (now.day_key(), now.seconds_since_midnight() / self.period_secs);
        if self.last_slot == Some(slot) {
            return false;
        }
        self.last_slot = Some(slot);
        true
    }

    /// Forget the last firing so the next poll is due
    pub fn reset(&mut self) {
        self.last_slot = None;
    }

    /// Period in seconds
    pub fn period_secs(&self) -> u32 {
        self.period_secs
    }
}
