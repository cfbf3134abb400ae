//! SensorThings-shaped read model
//!
//! One [`Thing`] per node, one [`Datastream`] per [`Quantity`], and
//! [`Observation`]s projected from the sample history. Everything here is
//! borrowed or static; the view has no path back into the node.

use heapless::Vec;

use crate::config::NodeConfig;
use crate::schedule::Switch;
use crate::scheduler::{SwitchScheduler, SwitchState};
use crate::store::{Quantity, Sample, SampleStore};
use crate::time::DateTime;

/// OGC observation type for a single numeric measurement
pub const OM_MEASUREMENT: &str =
    "http://www.opengis.net/def/observationType/OGC-OM/2.0/OM_Measurement";

/// The node as a SensorThings `Thing`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Thing<'a> {
    /// Site name from the node configuration
    pub name: &'a str,
    /// Fixed description
    pub description: &'static str,
}

impl Thing<'_> {
    /// Entity id, always 1 on a single-node server
    pub const fn id(&self) -> u32 {
        1
    }
}

/// Unit of a datastream
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitOfMeasurement {
    /// Unit name
    pub name: &'static str,
    /// Unit symbol
    pub symbol: &'static str,
    /// Reference definition
    pub definition: &'static str,
}

impl UnitOfMeasurement {
    /// Unit a quantity is recorded in
    pub const fn of(quantity: Quantity) -> Self {
        match quantity {
            Quantity::Temperature => Self {
                name: "degree Celsius",
                symbol: "°C",
                definition: "http://www.qudt.org/qudt/owl/1.0.0/unit/Instances.html#DegreeCelsius",
            },
            Quantity::Humidity => Self {
                name: "percent",
                symbol: "%",
                definition: "http://www.qudt.org/qudt/owl/1.0.0/unit/Instances.html#Percent",
            },
            Quantity::Pressure => Self {
                name: "hectopascal",
                symbol: "hPa",
                definition: "http://www.qudt.org/qudt/owl/1.0.0/unit/Instances.html#HectoPascal",
            },
            Quantity::Light => Self {
                name: "lux",
                symbol: "lx",
                definition: "http://www.qudt.org/qudt/owl/1.0.0/unit/Instances.html#Lux",
            },
        }
    }
}

/// One measured quantity of the node
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Datastream {
    /// Quantity carried
    pub quantity: Quantity,
    /// Display name
    pub name: &'static str,
    /// Fixed description
    pub description: &'static str,
    /// Always [`OM_MEASUREMENT`]
    pub observation_type: &'static str,
    /// Recording unit
    pub unit: UnitOfMeasurement,
}

impl Datastream {
    /// Datastream for a quantity
    pub const fn of(quantity: Quantity) -> Self {
        let (name, description) = match quantity {
            Quantity::Temperature => ("Temperature", "Air temperature at the node"),
            Quantity::Humidity => ("Humidity", "Relative humidity at the node"),
            Quantity::Pressure => ("Pressure", "Barometric pressure at the node"),
            Quantity::Light => ("Light", "Ambient light level at the node"),
        };
        Self {
            quantity,
            name,
            description,
            observation_type: OM_MEASUREMENT,
            unit: UnitOfMeasurement::of(quantity),
        }
    }

    /// Entity id, 1-based in [`Quantity::ALL`] order
    pub const fn id(&self) -> u32 {
        self.quantity.index() as u32 + 1
    }
}

/// One recorded value as a SensorThings observation
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Observation {
    /// Measured value
    pub result: f32,
    /// Capture time
    pub phenomenon_time: DateTime,
}

impl From<Sample> for Observation {
    fn from(sample: Sample) -> Self {
        Self {
            result: sample.value,
            phenomenon_time: sample.captured_at,
        }
    }
}

/// Read-only query surface over a running node
#[derive(Debug, Clone, Copy)]
pub struct ReportingView<'a, const N: usize> {
    config: &'a NodeConfig,
    store: &'a SampleStore<N>,
    scheduler: &'a SwitchScheduler,
}

impl<'a, const N: usize> ReportingView<'a, N> {
    /// Bundle the parts a report reads from
    pub fn new(
        config: &'a NodeConfig,
        store: &'a SampleStore<N>,
        scheduler: &'a SwitchScheduler,
    ) -> Self {
        Self { config, store, scheduler }
    }

    /// The node itself
    pub fn list_things(&self) -> [Thing<'a>; 1] {
        [Thing {
            name: self.config.site_name.as_str(),
            description: "klik home-automation node",
        }]
    }

    /// Every datastream, in [`Quantity::ALL`] order
    pub fn list_datastreams(&self) -> [Datastream; Quantity::COUNT] {
        Quantity::ALL.map(Datastream::of)
    }

    /// Datastream for one quantity
    pub fn datastream(&self, quantity: Quantity) -> Datastream {
        Datastream::of(quantity)
    }

    /// Most recent observation, `None` before the first successful read
    pub fn latest_observation(&self, quantity: Quantity) -> Option<Observation> {
        self.store.latest(quantity).copied().map(Observation::from)
    }

    /// Number of observations held for a quantity
    pub fn len(&self, quantity: Quantity) -> usize {
        self.store.len(quantity)
    }

    /// Oldest-first copy of a quantity's history
    pub fn history(&self, quantity: Quantity) -> Vec<Sample, N> {
        self.store.snapshot(quantity)
    }

    /// Observations of a quantity, oldest first
    pub fn observations(&self, quantity: Quantity) -> impl Iterator<Item = Observation> + 'a {
        self.store.iter(quantity).copied().map(Observation::from)
    }

    /// Registered switches with their tracked state
    pub fn switches(&self) -> impl Iterator<Item = (&'a Switch, SwitchState)> + 'a {
        self.scheduler.states()
    }

    /// Node configuration
    pub fn config(&self) -> &'a NodeConfig {
        self.config
    }
}
