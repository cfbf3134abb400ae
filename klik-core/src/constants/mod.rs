//! Constants for klik Core
//!
//! Centralised numeric values used throughout the node. Import from the
//! submodules or from the re-exports below instead of repeating magic numbers.
//!
//! ## Organization
//!
//! - **Time**: Clock arithmetic and the default scheduling cadences
//! - **Buffers**: Fixed capacities for the schedule table, names and history

/// Time-related constants for clock arithmetic and cadences.
pub mod time;

/// Buffer sizes and capacity limits for fixed-memory storage.
pub mod buffers;

pub use time::{
    SECONDS_PER_MINUTE, SECONDS_PER_HOUR, SECONDS_PER_DAY, LAST_SECOND_OF_DAY,
    DEFAULT_SAMPLE_INTERVAL_MIN, DEFAULT_SWITCH_INTERVAL_MIN,
};

pub use buffers::{
    MAX_SWITCHES, MAX_RULES_PER_SWITCH, DEFAULT_SAMPLE_COUNT,
    SWITCH_NAME_LEN, SITE_NAME_LEN, MAX_LED_PINS, SSID_LEN, PASSWORD_LEN,
};
