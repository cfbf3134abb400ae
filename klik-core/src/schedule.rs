//! Switch Registry and Schedule Table
//!
//! ## Overview
//!
//! A schedule maps each switch to a small set of daily rules. Two rule
//! shapes exist in deployed configurations and both are accepted:
//!
//! - **Paired**: `whenOn` and `whenOff`, "on at 18:00, off at 22:00". When
//!   `whenOff < whenOn` the window runs overnight.
//! - **Single-edge**: `when` plus a target state, "on at 06:00". The
//!   scheduler latches these so they fire once per day.
//!
//! Both become [`RuleKind`] variants, and the scheduler asks every rule the
//! same question through [`RuleKind::latest_edge`].
//!
//! ## Validation
//!
//! [`ScheduleTable::load`] fails fast. A rule that cannot be honoured is a
//! `ConfigError` naming the switch and the rule index. Rules are never
//! dropped:
//!
//! - every rule references a registered switch
//! - every time lies in 0..=86399
//! - paired rules have `whenOn != whenOff`
//! - times within one switch are pairwise distinct
//! - the registry has unique numbers and valid house codes
//!
//! ```rust
//! use klik_core::schedule::{ScheduleTable, ScheduleRule, RuleKind, Switch, Power};
//! use klik_core::ConfigError;
//!
//! let switches = [Switch::new(1, 'J', "porch")?, Switch::new(2, 'J', "hall")?];
//! let rules = [
//!     ScheduleRule::new(1, RuleKind::paired(64_800, 79_200)),
//!     ScheduleRule::new(2, RuleKind::single_edge(21_600, Power::On)),
//!     ScheduleRule::new(2, RuleKind::single_edge(21_600, Power::Off)),
//! ];
//!
//! let err = ScheduleTable::load(&switches, &rules).unwrap_err();
//! assert_eq!(err, ConfigError::DuplicateTime { no: 2, rule: 2, time: 21_600 });
//! # Ok::<(), ConfigError>(())
//! ```

use heapless::{String, Vec};

use crate::constants::buffers::{MAX_RULES_PER_SWITCH, MAX_SWITCHES, SWITCH_NAME_LEN};
use crate::constants::time::LAST_SECOND_OF_DAY;
use crate::errors::{ConfigError, ConfigResult};
use crate::time::DaySeconds;

/// Requested switch state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Power {
    /// Switched on
    On,
    /// Switched off
    Off,
}

impl Power {
    /// `true` for `On`
    pub fn is_on(self) -> bool {
        self == Power::On
    }
}

impl From<bool> for Power {
    fn from(on: bool) -> Self {
        if on {
            Power::On
        } else {
            Power::Off
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Power {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            Power::On => defmt::write!(fmt, "ON"),
            Power::Off => defmt::write!(fmt, "OFF"),
        }
    }
}

/// A remote-controlled power switch
///
/// Immutable once built. The live on/off state is tracked by the scheduler,
/// not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Switch {
    no: u8,
    group: char,
    name: String<SWITCH_NAME_LEN>,
}

impl Switch {
    /// Register a switch by unit code, house code and display name
    pub fn new(no: u8, group: char, name: &str) -> ConfigResult<Self> {
        if no == 0 || no as usize > MAX_SWITCHES {
            return Err(ConfigError::InvalidSwitchNumber { no, max: MAX_SWITCHES as u8 });
        }
        if !('A'..='P').contains(&group) {
            return Err(ConfigError::InvalidGroup { no, group });
        }
        let name = String::try_from(name)
            .map_err(|_| ConfigError::NameTooLong { no, max: SWITCH_NAME_LEN })?;
        Ok(Self { no, group, name })
    }

    /// Unit code (1-16)
    pub fn no(&self) -> u8 {
        self.no
    }

    /// House code (`A`-`P`)
    pub fn group(&self) -> char {
        self.group
    }

    /// Display name
    pub fn name(&self) -> &str {
        &self.name
    }
}

/// A state change a rule asks for, and when it became due today
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    /// Seconds since midnight the edge became due
    pub at: DaySeconds,
    /// State the edge asks for
    pub power: Power,
}

/// The two admissible rule shapes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleKind {
    /// On at `when_on`, off at `when_off`
    Paired {
        /// Seconds since midnight to switch on
        when_on: DaySeconds,
        /// Seconds since midnight to switch off
        when_off: DaySeconds,
    },
    /// Switch to `power` at `when`, once per day
    SingleEdge {
        /// Seconds since midnight to act
        when: DaySeconds,
        /// Target state
        power: Power,
    },
}

impl RuleKind {
    /// Paired on/off window
    pub const fn paired(when_on: DaySeconds, when_off: DaySeconds) -> Self {
        RuleKind::Paired { when_on, when_off }
    }

    /// Single edge to `power` at `when`
    pub const fn single_edge(when: DaySeconds, power: Power) -> Self {
        RuleKind::SingleEdge { when, power }
    }

    /// Time the rule first acts each day, used to order rules
    pub fn trigger_time(&self) -> DaySeconds {
        match *self {
            RuleKind::Paired { when_on, .. } => when_on,
            RuleKind::SingleEdge { when, .. } => when,
        }
    }

    /// Every time this rule references
    pub fn times(&self) -> impl Iterator<Item = DaySeconds> {
        let (first, second) = match *self {
            RuleKind::Paired { when_on, when_off } => (when_on, Some(when_off)),
            RuleKind::SingleEdge { when, .. } => (when, None),
        };
        core::iter::once(first).chain(second)
    }

    /// Whether this is a latched single-edge rule
    pub fn is_single_edge(&self) -> bool {
        matches!(self, RuleKind::SingleEdge { .. })
    }

    /// Most recent edge at or before `now` today
    ///
    /// A paired window reports `whenOff` once that has passed, else `whenOn`
    /// once that has passed. An overnight window (`whenOff < whenOn`) is
    /// still open after midnight, which it reports as an ON edge at 0.
    pub fn latest_edge(&self, now: DaySeconds) -> Option<Edge> {
        match *self {
            RuleKind::Paired { when_on, when_off } if when_on < when_off => {
                if now >= when_off {
                    Some(Edge { at: when_off, power: Power::Off })
                } else if now >= when_on {
                    Some(Edge { at: when_on, power: Power::On })
                } else {
                    None
                }
            }
            RuleKind::Paired { when_on, when_off } => {
                if now >= when_on {
                    Some(Edge { at: when_on, power: Power::On })
                } else if now >= when_off {
                    Some(Edge { at: when_off, power: Power::Off })
                } else {
                    Some(Edge { at: 0, power: Power::On })
                }
            }
            RuleKind::SingleEdge { when, power } => {
                (now >= when).then_some(Edge { at: when, power })
            }
        }
    }
}

/// One rule as read from configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleRule {
    /// Switch the rule drives
    pub no: u8,
    /// What the rule does
    pub kind: RuleKind,
}

impl ScheduleRule {
    /// Rule for switch `no`
    pub const fn new(no: u8, kind: RuleKind) -> Self {
        Self { no, kind }
    }
}

/// A switch and its rules, ordered by trigger time
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchSchedule {
    switch: Switch,
    rules: Vec<RuleKind, MAX_RULES_PER_SWITCH>,
}

impl SwitchSchedule {
    /// The switch
    pub fn switch(&self) -> &Switch {
        &self.switch
    }

    /// Its rules, earliest trigger first
    pub fn rules(&self) -> &[RuleKind] {
        &self.rules
    }
}

/// A schedule table that passed validation
///
/// Only [`ScheduleTable::load`] builds one, so holding a `ValidatedSchedule`
/// proves the table is consistent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidatedSchedule {
    entries: Vec<SwitchSchedule, MAX_SWITCHES>,
}

impl ValidatedSchedule {
    /// Schedules in ascending switch number
    pub fn iter(&self) -> impl Iterator<Item = &SwitchSchedule> {
        self.entries.iter()
    }

    /// Registered switches in ascending number
    pub fn switches(&self) -> impl Iterator<Item = &Switch> {
        self.entries.iter().map(|e| &e.switch)
    }

    /// Schedule of switch `no`
    pub fn get(&self, no: u8) -> Option<&SwitchSchedule> {
        self.entries.iter().find(|e| e.switch.no == no)
    }

    /// Number of registered switches
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no switch is registered
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of rules across all switches
    pub fn rule_count(&self) -> usize {
        self.entries.iter().map(|e| e.rules.len()).sum()
    }
}

/// Loader for schedule tables
pub struct ScheduleTable;

impl ScheduleTable {
    /// Validate a switch registry and its rules
    ///
    /// `rule` indices in errors refer to positions in `rules`.
    pub fn load(switches: &[Switch], rules: &[ScheduleRule]) -> ConfigResult<ValidatedSchedule> {
        if switches.len() > MAX_SWITCHES {
            return Err(ConfigError::TooManySwitches { count: switches.len(), max: MAX_SWITCHES });
        }

        let mut entries: Vec<SwitchSchedule, MAX_SWITCHES> = Vec::new();
        for switch in switches {
            if entries.iter().any(|e| e.switch.no == switch.no) {
                return Err(ConfigError::DuplicateSwitch { no: switch.no });
            }
            entries
                .push(SwitchSchedule { switch: switch.clone(), rules: Vec::new() })
                .map_err(|_| ConfigError::TooManySwitches {
                    count: switches.len(),
                    max: MAX_SWITCHES,
                })?;
        }
        entries.sort_unstable_by_key(|e| e.switch.no);

        for (index, rule) in rules.iter().enumerate() {
            let no = rule.no;
            let entry = entries
                .iter_mut()
                .find(|e| e.switch.no == no)
                .ok_or(ConfigError::UnknownSwitch { no, rule: index })?;

            if let Some(time) = rule.kind.times().find(|&t| t > LAST_SECOND_OF_DAY) {
                return Err(ConfigError::TimeOutOfRange { no, rule: index, time });
            }
            if let RuleKind::Paired { when_on, when_off } = rule.kind {
                if when_on == when_off {
                    return Err(ConfigError::EmptyWindow { no, rule: index });
                }
            }
            for time in rule.kind.times() {
                if entry.rules.iter().any(|existing| existing.times().any(|t| t == time)) {
                    return Err(ConfigError::DuplicateTime { no, rule: index, time });
                }
            }

            entry
                .rules
                .push(rule.kind)
                .map_err(|_| ConfigError::TooManyRules { no, max: MAX_RULES_PER_SWITCH })?;
        }

        for entry in entries.iter_mut() {
            entry.rules.sort_unstable_by_key(|r| r.trigger_time());
        }

        log_debug!(
            "Schedule loaded: {} switches, {} rules",
            entries.len(),
            rules.len()
        );
        Ok(ValidatedSchedule { entries })
    }
}
