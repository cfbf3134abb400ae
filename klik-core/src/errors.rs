//! Error Types for the klik Node
//!
//! ## Error Domains
//!
//! The node has two independent fault domains, switching and sampling, plus
//! a startup gate:
//!
//! ### Startup
//! - `ConfigError`: the switch registry, schedule table or node settings are
//!   malformed. Fatal: a node must not start switching with a bad table.
//!
//! ### Switching
//! - `TransmitError`: the RF gateway could not send a command. Recoverable.
//!   The scheduler leaves the tracked state untouched, so the next tick asks
//!   for the same transition again. There is no retry counter and no backoff;
//!   a stuck gateway makes a switch lag, it never desynchronises it.
//!
//! ### Sampling
//! - `SensorError`: a driver read failed. Recoverable. Only that quantity is
//!   skipped for the cycle; nothing is appended to its history.
//!
//! `TimeError` covers calendar fields that do not form a valid date or time.
//!
//! ## Memory Layout
//!
//! All variants hold inline data only (`u8`, `u32`, `char`, `&'static str`),
//! so every error is `Copy` and fits in 12 bytes.

use thiserror_no_std::Error;

/// Result type for configuration loading
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Result type for calendar arithmetic
pub type TimeResult<T> = Result<T, TimeError>;

/// Malformed switch registry, schedule table or node settings
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Switch number outside the supported unit codes
    #[error("Switch number {no} outside [1, {max}]")]
    InvalidSwitchNumber {
        /// Offending switch number
        no: u8,
        /// Highest supported switch number
        max: u8,
    },

    /// RF group is not one of the house codes A-P
    #[error("Switch {no}: group '{group}' is not a house code A-P")]
    InvalidGroup {
        /// Switch the group belongs to
        no: u8,
        /// Offending group character
        group: char,
    },

    /// Display name does not fit the fixed-size name buffer
    #[error("Switch {no}: name longer than {max} bytes")]
    NameTooLong {
        /// Switch the name belongs to
        no: u8,
        /// Name capacity in bytes
        max: usize,
    },

    /// Two registry entries share a switch number
    #[error("Switch {no} registered twice")]
    DuplicateSwitch {
        /// Duplicated switch number
        no: u8,
    },

    /// More switches than the node is configured or built for
    #[error("{count} switches registered, at most {max} allowed")]
    TooManySwitches {
        /// Number of switches supplied
        count: usize,
        /// Allowed maximum
        max: usize,
    },

    /// Rule references a switch that is not in the registry
    #[error("Rule {rule} references unknown switch {no}")]
    UnknownSwitch {
        /// Referenced switch number
        no: u8,
        /// Index of the rule in the input table
        rule: usize,
    },

    /// Rule time is not a valid seconds-since-midnight value
    #[error("Switch {no}, rule {rule}: time {time} outside [0, 86399]")]
    TimeOutOfRange {
        /// Switch the rule belongs to
        no: u8,
        /// Index of the rule in the input table
        rule: usize,
        /// Offending time in seconds since midnight
        time: u32,
    },

    /// Paired rule switches on and off at the same instant
    #[error("Switch {no}, rule {rule}: whenOn equals whenOff")]
    EmptyWindow {
        /// Switch the rule belongs to
        no: u8,
        /// Index of the rule in the input table
        rule: usize,
    },

    /// Two rules of one switch trigger at the same time
    #[error("Switch {no}, rule {rule}: time {time} already used by another rule")]
    DuplicateTime {
        /// Switch the rule belongs to
        no: u8,
        /// Index of the rule in the input table
        rule: usize,
        /// Repeated time in seconds since midnight
        time: u32,
    },

    /// More rules for one switch than the table holds
    #[error("Switch {no}: more than {max} rules")]
    TooManyRules {
        /// Switch the rules belong to
        no: u8,
        /// Rule capacity per switch
        max: usize,
    },

    /// Node setting outside its allowed range
    #[error("Invalid setting {name}: {reason}")]
    InvalidSetting {
        /// Setting name as it appears in the configuration document
        name: &'static str,
        /// Short explanation
        reason: &'static str,
    },
}

impl ConfigError {
    /// Switch number the error points at, if any
    pub fn switch(&self) -> Option<u8> {
        match *self {
            Self::InvalidSwitchNumber { no, .. }
            | Self::InvalidGroup { no, .. }
            | Self::NameTooLong { no, .. }
            | Self::DuplicateSwitch { no }
            | Self::UnknownSwitch { no, .. }
            | Self::TimeOutOfRange { no, .. }
            | Self::EmptyWindow { no, .. }
            | Self::DuplicateTime { no, .. }
            | Self::TooManyRules { no, .. } => Some(no),
            Self::TooManySwitches { .. } | Self::InvalidSetting { .. } => None,
        }
    }

    /// Index of the offending rule in the input table, if any
    pub fn rule(&self) -> Option<usize> {
        match *self {
            Self::UnknownSwitch { rule, .. }
            | Self::TimeOutOfRange { rule, .. }
            | Self::EmptyWindow { rule, .. }
            | Self::DuplicateTime { rule, .. } => Some(rule),
            _ => None,
        }
    }
}

/// Gateway could not send a switch command
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitError {
    /// Gateway cannot address this switch (bad group or unit code)
    #[error("Switch {no} in group '{group}' is not addressable")]
    Unaddressable {
        /// Switch number
        no: u8,
        /// RF group
        group: char,
    },

    /// Radio hardware reported a fault
    #[error("Transmitter fault: {reason}")]
    Hardware {
        /// Driver-supplied description
        reason: &'static str,
    },
}

/// Sensor driver read failure
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SensorError {
    /// Sensor did not answer in time
    #[error("Sensor read timed out")]
    Timeout,

    /// Sensor frame failed its checksum
    #[error("Sensor checksum mismatch")]
    Checksum,

    /// Driver returned NaN or infinity
    #[error("Sensor returned a non-finite reading")]
    InvalidReading,

    /// Node has no sensor for this quantity
    #[error("No sensor fitted for this quantity")]
    NotFitted,
}

/// Calendar fields that do not form a valid date or time
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimeError {
    /// Field outside its calendar range
    #[error("{field} value {value} out of range")]
    OutOfRange {
        /// Field name (`month`, `day`, `hour`, ...)
        field: &'static str,
        /// Offending value
        value: u32,
    },

    /// Text is not an `HH:MM[:SS]` time of day
    #[error("Malformed time of day")]
    Malformed,
}

#[cfg(feature = "defmt")]
impl defmt::Format for ConfigError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::InvalidSwitchNumber { no, max } =>
                defmt::write!(fmt, "Switch {} outside [1, {}]", no, max),
            Self::InvalidGroup { no, group } =>
                defmt::write!(fmt, "Switch {}: bad group {}", no, group),
            Self::NameTooLong { no, max } =>
                defmt::write!(fmt, "Switch {}: name over {} bytes", no, max),
            Self::DuplicateSwitch { no } =>
                defmt::write!(fmt, "Switch {} registered twice", no),
            Self::TooManySwitches { count, max } =>
                defmt::write!(fmt, "{} switches, max {}", count, max),
            Self::UnknownSwitch { no, rule } =>
                defmt::write!(fmt, "Rule {} references unknown switch {}", rule, no),
            Self::TimeOutOfRange { no, rule, time } =>
                defmt::write!(fmt, "Switch {} rule {}: time {} out of range", no, rule, time),
            Self::EmptyWindow { no, rule } =>
                defmt::write!(fmt, "Switch {} rule {}: empty window", no, rule),
            Self::DuplicateTime { no, rule, time } =>
                defmt::write!(fmt, "Switch {} rule {}: duplicate time {}", no, rule, time),
            Self::TooManyRules { no, max } =>
                defmt::write!(fmt, "Switch {}: over {} rules", no, max),
            Self::InvalidSetting { name, reason } =>
                defmt::write!(fmt, "Setting {}: {}", name, reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TransmitError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Unaddressable { no, group } =>
                defmt::write!(fmt, "Switch {} group {} not addressable", no, group),
            Self::Hardware { reason } =>
                defmt::write!(fmt, "Transmitter fault: {}", reason),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SensorError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::Timeout => defmt::write!(fmt, "Sensor timeout"),
            Self::Checksum => defmt::write!(fmt, "Sensor checksum"),
            Self::InvalidReading => defmt::write!(fmt, "Non-finite reading"),
            Self::NotFitted => defmt::write!(fmt, "No sensor fitted"),
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for TimeError {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Self::OutOfRange { field, value } =>
                defmt::write!(fmt, "{} value {} out of range", field, value),
            Self::Malformed => defmt::write!(fmt, "Malformed time of day"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_point_at_switch_and_rule() {
        let err = ConfigError::DuplicateTime { no: 3, rule: 5, time: 3600 };
        assert_eq!(err.switch(), Some(3));
        assert_eq!(err.rule(), Some(5));

        let err = ConfigError::TooManySwitches { count: 20, max: 16 };
        assert_eq!(err.switch(), None);
        assert_eq!(err.rule(), None);
    }

    #[cfg(feature = "std")]
    #[test]
    fn messages_name_the_offender() {
        let err = ConfigError::UnknownSwitch { no: 9, rule: 2 };
        assert_eq!(err.to_string(), "Rule 2 references unknown switch 9");

        let err = TransmitError::Hardware { reason: "antenna" };
        assert_eq!(err.to_string(), "Transmitter fault: antenna");
    }
}
