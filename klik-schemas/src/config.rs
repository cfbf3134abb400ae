//! Configuration documents
//!
//! A node is configured from a single JSON object. Node settings sit at
//! the top level next to the switch registry and the timetable:
//!
//! ```json
//! {
//!   "siteName": "cabin",
//!   "sampleIntervalMin": 10,
//!   "switchIntervalMin": 3,
//!   "maxSwitch": 8,
//!   "group": "J",
//!   "network": { "ssid": "cabin-wifi", "password": "secret" },
//!   "pins": { "leds": [0, 2, 14], "transmit": 13, "temperature": 12, "light": 0 },
//!   "switches": [
//!     { "no": 1, "group": "J", "name": "porch" },
//!     { "no": 2, "name": "hall heater" }
//!   ],
//!   "schedule": [
//!     { "no": 1, "whenOn": "18:00", "whenOff": "22:00" },
//!     { "no": 2, "when": 21600, "on": true }
//!   ]
//! }
//! ```
//!
//! Every setting is optional and falls back to [`NodeConfig::default`].
//! A switch without a `group` takes the node-level `group`.
//! Times are seconds since midnight or `"HH:MM[:SS]"` strings. Loading
//! runs the same validation as the core, so a document that loads is a
//! document a node will accept.

use serde::Deserialize;

use klik_core::{
    schedule::{RuleKind, ScheduleRule, ScheduleTable, Switch, ValidatedSchedule},
    time::{parse_time_of_day, DaySeconds},
    ConfigError, Node, NodeConfig, Power,
};

use crate::SchemaError;

/// Result of loading a configuration document
#[derive(Debug, Clone)]
pub struct LoadedConfig {
    /// Node settings
    pub config: NodeConfig,
    /// Validated timetable
    pub schedule: ValidatedSchedule,
}

impl LoadedConfig {
    /// Build a node with `N` samples of history per quantity
    pub fn into_node<const N: usize>(self) -> Result<Node<N>, ConfigError> {
        Node::new(self.config, self.schedule)
    }
}

#[derive(Debug, Deserialize)]
struct ConfigDocument {
    #[serde(flatten)]
    node: NodeConfig,
    #[serde(default)]
    switches: Vec<SwitchDocument>,
    #[serde(default)]
    schedule: Vec<RuleDocument>,
}

#[derive(Debug, Deserialize)]
struct SwitchDocument {
    no: u8,
    #[serde(default)]
    group: Option<char>,
    #[serde(default)]
    name: String,
}

/// Both rule shapes found in deployed configurations
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RuleDocument {
    Paired {
        no: u8,
        #[serde(rename = "whenOn")]
        when_on: TimeOfDay,
        #[serde(rename = "whenOff")]
        when_off: TimeOfDay,
    },
    SingleEdge {
        no: u8,
        when: TimeOfDay,
        on: bool,
    },
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum TimeOfDay {
    Seconds(DaySeconds),
    Text(String),
}

impl TimeOfDay {
    fn seconds(&self) -> Result<DaySeconds, SchemaError> {
        match self {
            TimeOfDay::Seconds(secs) => Ok(*secs),
            TimeOfDay::Text(text) => Ok(parse_time_of_day(text)?),
        }
    }
}

impl RuleDocument {
    fn to_rule(&self) -> Result<ScheduleRule, SchemaError> {
        let rule = match self {
            RuleDocument::Paired { no, when_on, when_off } => {
                ScheduleRule::new(*no, RuleKind::paired(when_on.seconds()?, when_off.seconds()?))
            }
            RuleDocument::SingleEdge { no, when, on } => {
                ScheduleRule::new(*no, RuleKind::single_edge(when.seconds()?, Power::from(*on)))
            }
        };
        Ok(rule)
    }
}

/// Parse and validate a configuration document
pub fn load_config(json: &str) -> Result<LoadedConfig, SchemaError> {
    parse_document(json).map_err(|err| {
        log::warn!("Rejected configuration document: {}", err);
        err
    })
}

fn parse_document(json: &str) -> Result<LoadedConfig, SchemaError> {
    let document: ConfigDocument = serde_json::from_str(json)?;
    document.node.validate()?;

    let switches = document
        .switches
        .iter()
        .map(|s| Switch::new(s.no, s.group.unwrap_or(document.node.group), &s.name))
        .collect::<Result<Vec<_>, _>>()?;
    let rules = document
        .schedule
        .iter()
        .map(RuleDocument::to_rule)
        .collect::<Result<Vec<_>, _>>()?;

    let schedule = ScheduleTable::load(&switches, &rules)?;
    log::debug!(
        "Loaded configuration for '{}': {} switches, {} rules",
        document.node.site_name,
        schedule.len(),
        schedule.rule_count()
    );

    Ok(LoadedConfig {
        config: document.node,
        schedule,
    })
}
