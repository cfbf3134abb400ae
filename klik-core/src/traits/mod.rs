//! Collaborator Traits for the klik Core
//!
//! The core decides *when* things happen; the hardware behind these traits
//! decides *how*. Each trait is the whole interface the core needs from one
//! external collaborator.
//!
//! ## Module Organization
//!
//! - [`time`] - Wall-clock source
//! - [`gateway`] - RF transmitter for switch commands
//! - [`sensors`] - Environmental sensor drivers
//!
//! ## Usage Example
//!
//! ```rust
//! use klik_core::traits::{TransmitGateway, SwitchCommand};
//! use klik_core::errors::TransmitError;
//!
//! struct Logger;
//!
//! impl TransmitGateway for Logger {
//!     fn transmit(&mut self, command: SwitchCommand) -> nb::Result<(), TransmitError> {
//!         println!("{}{} -> {:?}", command.group, command.no, command.power);
//!         Ok(())
//!     }
//! }
//! ```

pub mod gateway;
pub mod sensors;
pub mod time;

pub use gateway::{SwitchCommand, TransmitGateway};
pub use sensors::EnvironmentSensors;
pub use time::ClockSource;
