//! Sampling Cycle
//!
//! Reads every sensor once and records the results. Each quantity is its
//! own fault domain: a failed read skips that quantity only, and nothing is
//! appended to its history for the cycle.

use crate::errors::SensorError;
use crate::store::{Quantity, SampleStore};
use crate::time::DateTime;
use crate::traits::sensors::EnvironmentSensors;

/// Outcome of one sampling cycle, per quantity
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SampleReport {
    /// Recorded value or read error, indexed like [`Quantity::ALL`]
    pub results: [Result<f32, SensorError>; Quantity::COUNT],
}

impl SampleReport {
    /// Result for one quantity
    pub fn result(&self, quantity: Quantity) -> Result<f32, SensorError> {
        self.results[quantity.index()]
    }

    /// Number of quantities recorded this cycle
    pub fn recorded(&self) -> usize {
        self.results.iter().filter(|r| r.is_ok()).count()
    }

    /// Quantities whose fitted sensor failed
    pub fn failures(&self) -> impl Iterator<Item = (Quantity, SensorError)> + '_ {
        Quantity::ALL.into_iter().filter_map(move |q| match self.results[q.index()] {
            Err(SensorError::NotFitted) | Ok(_) => None,
            Err(err) => Some((q, err)),
        })
    }
}

/// Reads sensors into a [`SampleStore`]
#[derive(Debug, Clone, Copy, Default)]
pub struct Sampler;

impl Sampler {
    /// Run one sampling cycle at `now`
    pub fn sample<S, const N: usize>(
        sensors: &mut S,
        store: &mut SampleStore<N>,
        now: DateTime,
    ) -> SampleReport
    where
        S: EnvironmentSensors + ?Sized,
    {
        let results = Quantity::ALL.map(|quantity| {
            let reading = Self::read(sensors, quantity).and_then(|value| {
                if value.is_finite() {
                    Ok(value)
                } else {
                    Err(SensorError::InvalidReading)
                }
            });

            match reading {
                Ok(value) => {
                    store.record(quantity, value, now);
                }
                Err(SensorError::NotFitted) => {}
                Err(_err) => {
                    log_warn!("Skipping {} sample: {}", quantity.name(), _err);
                }
            }
            reading
        });

        let report = SampleReport { results };
        log_debug!("Sampled {} quantities at {}", report.recorded(), now);
        report
    }

    fn read<S: EnvironmentSensors + ?Sized>(
        sensors: &mut S,
        quantity: Quantity,
    ) -> Result<f32, SensorError> {
        match quantity {
            Quantity::Temperature => sensors.read_temperature(),
            Quantity::Humidity => sensors.read_humidity(),
            Quantity::Pressure => sensors.read_pressure(),
            Quantity::Light => Ok(sensors.read_light()),
        }
    }
}
