//! RF Transmit Gateway
//!
//! Sending a KlikAanKlikUit frame means bit-banging the transmitter pin for
//! tens of milliseconds per repeat. The gateway owns that work. The core only
//! says which switch and which state.
//!
//! The contract is non-blocking, in the `nb` style:
//! - `Ok(())`: the command was sent
//! - `Err(nb::Error::WouldBlock)`: the radio is busy; nothing was sent
//! - `Err(nb::Error::Other(e))`: the send failed
//!
//! The scheduler never spins on `WouldBlock`. Both error forms mean "not
//! applied"; the next tick asks again because the tracked state did not move.

use crate::errors::TransmitError;
use crate::schedule::Power;

/// One switch command handed to the gateway
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwitchCommand {
    /// Unit code of the switch (1-16)
    pub no: u8,
    /// House code of the switch (`A`-`P`)
    pub group: char,
    /// State to switch to
    pub power: Power,
}

/// Physical transmitter for switch commands
pub trait TransmitGateway {
    /// Send one command without blocking the caller
    fn transmit(&mut self, command: SwitchCommand) -> nb::Result<(), TransmitError>;
}

impl<G: TransmitGateway + ?Sized> TransmitGateway for &mut G {
    fn transmit(&mut self, command: SwitchCommand) -> nb::Result<(), TransmitError> {
        (**self).transmit(command)
    }
}
