//! Environmental Sensor Drivers
//!
//! A node typically carries a DHT-family temperature/humidity sensor and a
//! light-dependent resistor on an analog pin. Some boards add a barometer.
//!
//! ## Implementation Notes
//!
//! - Return the value in the datastream unit: °C, %RH, hPa, lux
//! - Report driver failures as `SensorError`; do not return a sentinel value
//! - A NaN from a driver library is caught by the sampler and treated as
//!   `SensorError::InvalidReading`, so passing it through is harmless
//! - Boards without a barometer keep the default `read_pressure`

use crate::errors::SensorError;

/// Sensor drivers the sampler reads once per sampling cycle
pub trait EnvironmentSensors {
    /// Air temperature in °C
    fn read_temperature(&mut self) -> Result<f32, SensorError>;

    /// Relative humidity in %
    fn read_humidity(&mut self) -> Result<f32, SensorError>;

    /// Barometric pressure in hPa
    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        Err(SensorError::NotFitted)
    }

    /// Illuminance in lux (analog reading, cannot fail)
    fn read_light(&mut self) -> f32;
}
