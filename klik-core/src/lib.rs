//! Core engine for klik home-automation nodes
//!
//! A klik node samples environmental sensors on a schedule, keeps a short
//! rolling history of each quantity, and drives RF power switches from a
//! daily timetable. This crate holds the parts that carry the consistency
//! logic; radio encoding, sensor drivers and networking sit behind traits.
//!
//! Key constraints:
//! - Runs single-threaded on a small microcontroller
//! - No heap allocation anywhere in the crate
//! - Every schedule transition fires at most once per day
//!
//! ```no_run
//! use klik_core::{Node, NodeConfig, ScheduleTable, Switch, ScheduleRule, RuleKind};
//! use klik_core::time::DateTime;
//! # use klik_core::traits::{TransmitGateway, EnvironmentSensors, SwitchCommand};
//! # use klik_core::errors::{TransmitError, SensorError};
//! # struct Radio;
//! # impl TransmitGateway for Radio {
//! #     fn transmit(&mut self, _: SwitchCommand) -> nb::Result<(), TransmitError> { Ok(()) }
//! # }
//! # struct Dht;
//! # impl EnvironmentSensors for Dht {
//! #     fn read_temperature(&mut self) -> Result<f32, SensorError> { Ok(21.0) }
//! #     fn read_humidity(&mut self) -> Result<f32, SensorError> { Ok(50.0) }
//! #     fn read_light(&mut self) -> f32 { 300.0 }
//! # }
//!
//! let switches = [Switch::new(1, 'J', "porch")?];
//! let rules = [ScheduleRule::new(1, RuleKind::paired(18 * 3600, 22 * 3600))];
//! let schedule = ScheduleTable::load(&switches, &rules)?;
//!
//! let mut node: Node<15> = Node::new(NodeConfig::default(), schedule)?;
//! let now = DateTime::from_calendar(2024, 6, 1, 18, 3, 0)?;
//! let report = node.poll_at(&now, &mut Radio, &mut Dht);
//! assert_eq!(report.tick.map(|t| t.transitions.len()), Some(1));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![deny(unsafe_code)]
#![warn(missing_docs)]

#[macro_use]
mod macros;

pub mod buffer;
pub mod config;
pub mod constants;
pub mod errors;
pub mod node;
pub mod sampler;
pub mod schedule;
pub mod scheduler;
pub mod store;
pub mod things;
pub mod time;
pub mod timer;
pub mod traits;

// Public API
pub use config::{NetworkSettings, NodeConfig, PinAssignments, DEFAULT_GROUP};
pub use errors::{ConfigError, SensorError, TimeError, TransmitError};
pub use node::{DefaultNode, Node, PollReport};
pub use sampler::{SampleReport, Sampler};
pub use schedule::{RuleKind, ScheduleRule, ScheduleTable, Switch, ValidatedSchedule};
pub use scheduler::{Power, SwitchScheduler, SwitchState, TickReport, Transition, TransmitOutcome};
pub use store::{Quantity, Sample, SampleStore};
pub use things::{Datastream, Observation, ReportingView, Thing, UnitOfMeasurement};
pub use timer::IntervalTimer;

/// Crate version, as reported in the SensorThings `Thing` properties
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
