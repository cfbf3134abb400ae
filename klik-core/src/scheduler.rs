//! Time-Triggered Switch Scheduler
//!
//! ## Overview
//!
//! Once per tick the scheduler compares the wall clock against the schedule
//! table and decides, per switch, whether a transmission is needed. The
//! decision is derived from `now` alone, never from the time since the last
//! tick, so a missed or late tick is repaired by the next one.
//!
//! ## Tick Contract
//!
//! 1. **Daily re-arm.** When the calendar day differs from the last evaluated
//!    day, every `done` latch is cleared and every tracked state becomes
//!    `Unknown`.
//! 2. **Edge resolution.** Each rule of a switch reports its most recent edge
//!    at or before `now` (see [`RuleKind::latest_edge`]). The latest edge
//!    wins; an exact tie goes to OFF, so a switch is never left on past the
//!    end of its window.
//! 3. **Transmit on change only.** If the winning state differs from the
//!    tracked state, the gateway is called once. The tracked state moves
//!    only when the gateway reports success.
//! 4. **Latching.** A single-edge rule is latched once its request is
//!    satisfied (sent, or already in effect). A latched rule still shadows
//!    older edges but never initiates another transmission that day.
//!
//! Switches are processed in ascending switch number.
//!
//! ## Failure Handling
//!
//! A busy or failing gateway leaves both the tracked state and the latches
//! untouched. The following tick sees the same desired state and asks again.
//! There is no retry counter and no backoff.
//!
//! ```text
//! 18:00 ──── ON window ──── 22:00
//!   │  tick 18:03: Unknown → ON  (transmit)
//!   │  tick 18:06: ON == ON      (nothing)
//!   │  tick 22:00: ON → OFF      (transmit, OFF wins the boundary)
//! ```

use heapless::Vec;

use crate::constants::buffers::{MAX_RULES_PER_SWITCH, MAX_SWITCHES};
use crate::errors::TransmitError;
use crate::schedule::{RuleKind, Switch, ValidatedSchedule};
use crate::time::{DateTime, DayKey, DaySeconds};
use crate::traits::gateway::{SwitchCommand, TransmitGateway};

pub use crate::schedule::Power;

/// Tracked state of a switch
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SwitchState {
    /// Last successful command was ON
    On,
    /// Last successful command was OFF
    Off,
    /// Nothing sent since start-up or since the last daily re-arm
    #[default]
    Unknown,
}

impl SwitchState {
    /// Whether the switch is known to be in `power`
    pub fn is(self, power: Power) -> bool {
        matches!(
            (self, power),
            (SwitchState::On, Power::On) | (SwitchState::Off, Power::Off)
        )
    }
}

impl From<Power> for SwitchState {
    fn from(power: Power) -> Self {
        match power {
            Power::On => SwitchState::On,
            Power::Off => SwitchState::Off,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for SwitchState {
    fn format(&self, fmt: defmt::Formatter) {
        match self {
            SwitchState::On => defmt::write!(fmt, "ON"),
            SwitchState::Off => defmt::write!(fmt, "OFF"),
            SwitchState::Unknown => defmt::write!(fmt, "UNKNOWN"),
        }
    }
}

/// What happened to one transmission attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransmitOutcome {
    /// Gateway accepted the command; tracked state updated
    Sent,
    /// Gateway was busy; nothing sent, retried next tick
    Busy,
    /// Gateway failed; nothing applied, retried next tick
    Failed(TransmitError),
}

/// One transmission attempt made during a tick
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    /// Switch unit code
    pub no: u8,
    /// Switch house code
    pub group: char,
    /// Requested state
    pub power: Power,
    /// Gateway result
    pub outcome: TransmitOutcome,
}

/// Result of one scheduler tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TickReport {
    /// This tick crossed midnight and re-armed the day
    pub rolled_over: bool,
    /// Transmission attempts, ascending switch number
    pub transitions: Vec<Transition, MAX_SWITCHES>,
}

impl TickReport {
    /// Attempts the gateway accepted
    pub fn sent(&self) -> impl Iterator<Item = &Transition> {
        self.transitions.iter().filter(|t| t.outcome == TransmitOutcome::Sent)
    }

    /// Whether any attempt was busy or failed
    pub fn has_failures(&self) -> bool {
        self.transitions.iter().any(|t| t.outcome != TransmitOutcome::Sent)
    }
}

/// Per-switch runtime state, index-aligned with the schedule entries
#[derive(Debug, Clone, Default)]
struct SlotState {
    state: SwitchState,
    done: Vec<bool, MAX_RULES_PER_SWITCH>,
}

impl SlotState {
    fn armed(rule_count: usize) -> Self {
        let mut done = Vec::new();
        for _ in 0..rule_count {
            // rule_count never exceeds the validated per-switch capacity
            let _ = done.push(false);
        }
        Self { state: SwitchState::Unknown, done }
    }
}

/// Winning request for one switch in one tick
#[derive(Debug, Clone, Copy)]
struct Decision {
    at: DaySeconds,
    power: Power,
    /// `false` when the winner is an already-latched single-edge rule
    initiating: bool,
}

impl Decision {
    fn beats(&self, other: &Decision) -> bool {
        (self.at, self.power == Power::Off) > (other.at, other.power == Power::Off)
    }
}

/// Evaluates the schedule table once per tick
#[derive(Debug, Clone)]
pub struct SwitchScheduler {
    schedule: ValidatedSchedule,
    slots: Vec<SlotState, MAX_SWITCHES>,
    last_day: Option<DayKey>,
}

impl SwitchScheduler {
    /// Scheduler with every switch `Unknown` and every rule armed
    pub fn new(schedule: ValidatedSchedule) -> Self {
        let slots = Self::armed_slots(&schedule);
        Self { schedule, slots, last_day: None }
    }

    fn armed_slots(schedule: &ValidatedSchedule) -> Vec<SlotState, MAX_SWITCHES> {
        let mut slots = Vec::new();
        for entry in schedule.iter() {
            // A validated schedule holds at most MAX_SWITCHES entries
            let _ = slots.push(SlotState::armed(entry.rules().len()));
        }
        slots
    }

    /// Evaluate the schedule at `now` and transmit what is due
    pub fn tick<G: TransmitGateway + ?Sized>(
        &mut self,
        now: &DateTime,
        gateway: &mut G,
    ) -> TickReport {
        let mut report = TickReport::default();

        let today = now.day_key();
        if self.last_day != Some(today) {
            report.rolled_over = self.last_day.is_some();
            if report.rolled_over {
                log_info!("New day {}: re-arming {} switches", now, self.slots.len());
            }
            self.rearm();
            self.last_day = Some(today);
        }

        let seconds = now.seconds_since_midnight();
        for (entry, slot) in self.schedule.iter().zip(self.slots.iter_mut()) {
            let Some(decision) = Self::resolve(entry.rules(), &slot.done, seconds) else {
                continue;
            };

            if slot.state.is(decision.power) {
                Self::latch_due(entry.rules(), &mut slot.done, seconds);
                continue;
            }
            if !decision.initiating {
                continue;
            }

            let switch = entry.switch();
            let command = SwitchCommand {
                no: switch.no(),
                group: switch.group(),
                power: decision.power,
            };
            let outcome = match gateway.transmit(command) {
                Ok(()) => {
                    log_info!(
                        "Switch {}{} ({}) -> {:?}",
                        switch.group(),
                        switch.no(),
                        switch.name(),
                        decision.power
                    );
                    slot.state = decision.power.into();
                    Self::latch_due(entry.rules(), &mut slot.done, seconds);
                    TransmitOutcome::Sent
                }
                Err(nb::Error::WouldBlock) => {
                    log_warn!(
                        "Switch {}{}: gateway busy, retrying next tick",
                        switch.group(),
                        switch.no()
                    );
                    TransmitOutcome::Busy
                }
                Err(nb::Error::Other(_err)) => {
                    log_warn!("Switch {}{}: {}", switch.group(), switch.no(), _err);
                    TransmitOutcome::Failed(_err)
                }
            };

            // One attempt per switch, and there are at most MAX_SWITCHES switches
            let _ = report.transitions.push(Transition {
                no: command.no,
                group: command.group,
                power: command.power,
                outcome,
            });
        }

        report
    }

    /// Latest edge across all rules of one switch; ties go to OFF
    fn resolve(rules: &[RuleKind], done: &[bool], now: DaySeconds) -> Option<Decision> {
        let mut winner: Option<Decision> = None;
        for (rule, &latched) in rules.iter().zip(done) {
            let Some(edge) = rule.latest_edge(now) else {
                continue;
            };
            let candidate = Decision {
                at: edge.at,
                power: edge.power,
                initiating: !(rule.is_single_edge() && latched),
            };
            if winner.map_or(true, |w| candidate.beats(&w)) {
                winner = Some(candidate);
            }
        }
        winner
    }

    /// Latch every single-edge rule whose time has come
    fn latch_due(rules: &[RuleKind], done: &mut [bool], now: DaySeconds) {
        for (rule, latched) in rules.iter().zip(done.iter_mut()) {
            if let RuleKind::SingleEdge { when, .. } = *rule {
                if now >= when {
                    *latched = true;
                }
            }
        }
    }

    fn rearm(&mut self) {
        for slot in self.slots.iter_mut() {
            slot.state = SwitchState::Unknown;
            slot.done.iter_mut().for_each(|d| *d = false);
        }
    }

    /// Swap in a new schedule table
    ///
    /// Tracked states carry over for switch numbers present in both tables.
    /// All latches of the new table start clear.
    pub fn replace_schedule(&mut self, schedule: ValidatedSchedule) {
        let mut slots = Self::armed_slots(&schedule);
        for (entry, slot) in schedule.iter().zip(slots.iter_mut()) {
            if let Some(previous) = self.state(entry.switch().no()) {
                slot.state = previous;
            }
        }
        log_info!(
            "Schedule replaced: {} switches, {} rules",
            schedule.len(),
            schedule.rule_count()
        );
        self.schedule = schedule;
        self.slots = slots;
    }

    /// Tracked state of switch `no`
    pub fn state(&self, no: u8) -> Option<SwitchState> {
        self.schedule
            .iter()
            .position(|e| e.switch().no() == no)
            .map(|i| self.slots[i].state)
    }

    /// Every switch with its tracked state, ascending switch number
    pub fn states(&self) -> impl Iterator<Item = (&Switch, SwitchState)> {
        self.schedule
            .iter()
            .zip(self.slots.iter())
            .map(|(entry, slot)| (entry.switch(), slot.state))
    }

    /// Whether rule `rule` of switch `no` has fired today
    ///
    /// `rule` indexes [`SwitchSchedule::rules`](crate::schedule::SwitchSchedule::rules).
    /// Paired rules are never latched.
    pub fn is_latched(&self, no: u8, rule: usize) -> Option<bool> {
        let index = self.schedule.iter().position(|e| e.switch().no() == no)?;
        self.slots[index].done.get(rule).copied()
    }

    /// The schedule table in force
    pub fn schedule(&self) -> &ValidatedSchedule {
        &self.schedule
    }

    /// Calendar day of the most recent tick
    pub fn last_evaluated_day(&self) -> Option<DayKey> {
        self.last_day
    }
}
