//! Node configuration
//!
//! Built once at start-up, validated by [`Node::new`](crate::node::Node::new)
//! and then only ever read. Every component receives it by reference; there
//! is no global configuration state.
//!
//! With the `serde` feature every field is optional in a document and falls
//! back to the defaults below.

use core::fmt;

use heapless::{String, Vec};

use crate::constants::buffers::{
    DEFAULT_MAX_SWITCH, MAX_LED_PINS, MAX_SWITCHES, PASSWORD_LEN, SITE_NAME_LEN, SSID_LEN,
};
use crate::constants::time::{
    DEFAULT_SAMPLE_INTERVAL_MIN, DEFAULT_SWITCH_INTERVAL_MIN, MINUTES_PER_DAY, SECONDS_PER_MINUTE,
};
use crate::errors::{ConfigError, ConfigResult};

/// House code used for switches registered without one
pub const DEFAULT_GROUP: char = 'J';

/// WiFi credentials handed to the network driver
///
/// The core only carries these; joining the network happens outside it.
/// `Debug` masks the password.
#[derive(Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct NetworkSettings {
    /// Network name
    pub ssid: String<SSID_LEN>,
    /// WPA passphrase, empty for an open network
    pub password: String<PASSWORD_LEN>,
}

impl NetworkSettings {
    /// Whether an SSID has been set
    pub fn is_configured(&self) -> bool {
        !self.ssid.is_empty()
    }
}

impl fmt::Debug for NetworkSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NetworkSettings")
            .field("ssid", &self.ssid)
            .field("password", &if self.password.is_empty() { "" } else { "***" })
            .finish()
    }
}

/// GPIO assignments handed to the hardware drivers
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PinAssignments {
    /// Status LEDs
    pub leds: Vec<u8, MAX_LED_PINS>,
    /// RF transmitter data pin
    pub transmit: u8,
    /// DHT temperature/humidity sensor data pin
    pub temperature: u8,
    /// Analog pin of the light-dependent resistor
    pub light: u8,
}

impl Default for PinAssignments {
    fn default() -> Self {
        let mut leds = Vec::new();
        for pin in [0, 2, 14] {
            // Three pins always fit MAX_LED_PINS
            let _ = leds.push(pin);
        }
        Self {
            leds,
            transmit: 13,
            temperature: 12,
            light: 0,
        }
    }
}

/// Settings a node runs with for its whole lifetime
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, rename_all = "camelCase"))]
pub struct NodeConfig {
    /// Site name, used as the SensorThings `Thing` name
    pub site_name: String<SITE_NAME_LEN>,
    /// Minutes between sensor samples
    pub sample_interval_min: u16,
    /// Minutes between scheduler ticks
    pub switch_interval_min: u16,
    /// Number of switches this node drives
    pub max_switch: u8,
    /// House code for switches registered without one
    pub group: char,
    /// Hardware pin map
    pub pins: PinAssignments,
    /// WiFi credentials
    pub network: NetworkSettings,
}

impl Default for NodeConfig {
    fn default() -> Self {
        Self {
            site_name: String::try_from("klik").unwrap_or_default(),
            sample_interval_min: DEFAULT_SAMPLE_INTERVAL_MIN,
            switch_interval_min: DEFAULT_SWITCH_INTERVAL_MIN,
            max_switch: DEFAULT_MAX_SWITCH,
            group: DEFAULT_GROUP,
            pins: PinAssignments::default(),
            network: NetworkSettings::default(),
        }
    }
}

impl NodeConfig {
    /// Default settings for a named site
    pub fn for_site(name: &str) -> ConfigResult<Self> {
        let site_name = String::try_from(name).map_err(|_| ConfigError::InvalidSetting {
            name: "siteName",
            reason: "longer than 32 bytes",
        })?;
        Ok(Self { site_name, ..Self::default() })
    }

    /// Check every setting is within range
    pub fn validate(&self) -> ConfigResult<()> {
        check_interval("sampleIntervalMin", self.sample_interval_min)?;
        check_interval("switchIntervalMin", self.switch_interval_min)?;

        if self.max_switch == 0 || self.max_switch as usize > MAX_SWITCHES {
            return Err(ConfigError::InvalidSetting {
                name: "maxSwitch",
                reason: "must be between 1 and 16",
            });
        }
        if !('A'..='P').contains(&self.group) {
            return Err(ConfigError::InvalidSetting {
                name: "group",
                reason: "must be a house code A-P",
            });
        }
        if self.site_name.is_empty() {
            return Err(ConfigError::InvalidSetting {
                name: "siteName",
                reason: "must not be empty",
            });
        }
        Ok(())
    }

    /// Sampling period in seconds
    pub fn sample_period_secs(&self) -> u32 {
        self.sample_interval_min as u32 * SECONDS_PER_MINUTE
    }

    /// Scheduler period in seconds
    pub fn switch_period_secs(&self) -> u32 {
        self.switch_interval_min as u32 * SECONDS_PER_MINUTE
    }
}

fn check_interval(name: &'static str, minutes: u16) -> ConfigResult<()> {
    if minutes == 0 {
        return Err(ConfigError::InvalidSetting { name, reason: "must be at least one minute" });
    }
    if minutes as u32 > MINUTES_PER_DAY {
        return Err(ConfigError::InvalidSetting { name, reason: "must not exceed one day" });
    }
    Ok(())
}
