//! Shared fakes and fixtures for integration tests
//!
//! - `RecordingGateway` records every command and can be scripted to fail
//! - `ScriptedSensors` replays readings and errors per quantity
//! - `scenarios` builds the schedule tables the tests run against

#![allow(dead_code)]

use std::collections::VecDeque;

use klik_core::{
    errors::{SensorError, TransmitError},
    time::DateTime,
    traits::{EnvironmentSensors, SwitchCommand, TransmitGateway},
    Power,
};

pub mod scenarios;

/// What the gateway should do with the next command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GatewayStep {
    Accept,
    Busy,
    Fail,
}

/// Gateway fake that records accepted commands
#[derive(Debug, Default)]
pub struct RecordingGateway {
    pub sent: Vec<SwitchCommand>,
    pub attempts: usize,
    script: VecDeque<GatewayStep>,
}

impl RecordingGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue outcomes for the next attempts; unscripted attempts succeed
    pub fn script(mut self, steps: &[GatewayStep]) -> Self {
        self.script.extend(steps.iter().copied());
        self
    }

    pub fn push_step(&mut self, step: GatewayStep) {
        self.script.push_back(step);
    }

    /// Accepted commands as `(no, power)`
    pub fn history(&self) -> Vec<(u8, Power)> {
        self.sent.iter().map(|c| (c.no, c.power)).collect()
    }

    pub fn clear(&mut self) {
        self.sent.clear();
        self.attempts = 0;
    }
}

impl TransmitGateway for RecordingGateway {
    fn transmit(&mut self, command: SwitchCommand) -> nb::Result<(), TransmitError> {
        self.attempts += 1;
        match self.script.pop_front().unwrap_or(GatewayStep::Accept) {
            GatewayStep::Accept => {
                self.sent.push(command);
                Ok(())
            }
            GatewayStep::Busy => Err(nb::Error::WouldBlock),
            GatewayStep::Fail => {
                Err(nb::Error::Other(TransmitError::Hardware { reason: "no ack" }))
            }
        }
    }
}

/// Sensor fake replaying queued readings
///
/// An empty queue repeats the quantity's steady value.
#[derive(Debug)]
pub struct ScriptedSensors {
    pub temperature: VecDeque<Result<f32, SensorError>>,
    pub humidity: VecDeque<Result<f32, SensorError>>,
    pub pressure: Option<VecDeque<Result<f32, SensorError>>>,
    pub light: VecDeque<f32>,
    steady: [f32; 4],
}

impl ScriptedSensors {
    /// Healthy sensors reading constant values; no barometer fitted
    pub fn steady(temperature: f32, humidity: f32, light: f32) -> Self {
        Self {
            temperature: VecDeque::new(),
            humidity: VecDeque::new(),
            pressure: None,
            light: VecDeque::new(),
            steady: [temperature, humidity, 1013.25, light],
        }
    }

    /// Fit a barometer reading a constant value
    pub fn with_pressure(mut self, hpa: f32) -> Self {
        self.steady[2] = hpa;
        self.pressure = Some(VecDeque::new());
        self
    }
}

impl EnvironmentSensors for ScriptedSensors {
    fn read_temperature(&mut self) -> Result<f32, SensorError> {
        self.temperature.pop_front().unwrap_or(Ok(self.steady[0]))
    }

    fn read_humidity(&mut self) -> Result<f32, SensorError> {
        self.humidity.pop_front().unwrap_or(Ok(self.steady[1]))
    }

    fn read_pressure(&mut self) -> Result<f32, SensorError> {
        match self.pressure.as_mut() {
            Some(queue) => queue.pop_front().unwrap_or(Ok(self.steady[2])),
            None => Err(SensorError::NotFitted),
        }
    }

    fn read_light(&mut self) -> f32 {
        self.light.pop_front().unwrap_or(self.steady[3])
    }
}

/// 2024-06-01 at the given time of day
pub fn at(hour: u8, min: u8, sec: u8) -> DateTime {
    DateTime::from_calendar(2024, 6, 1, hour, min, sec).unwrap()
}

/// Given date at a number of seconds since midnight
pub fn on_day(day: u8, seconds: u32) -> DateTime {
    DateTime::from_day_seconds(2024, 6, day, seconds).unwrap()
}

pub fn hms(hour: u32, min: u32, sec: u32) -> u32 {
    hour * 3600 + min * 60 + sec
}
