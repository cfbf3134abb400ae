//! Sample Store: bounded history per measured quantity
//!
//! Each quantity gets its own [`CircularBuffer`] of `N` samples. Recording
//! never fails; once a ring is full the oldest sample is evicted. Read-out is
//! always oldest first.
//!
//! The store does not know the sampling cadence. The [`Sampler`] or any
//! other caller decides when to record.
//!
//! ## Concurrency
//!
//! `record` takes `&mut self` and `snapshot` takes `&self`, so within one
//! thread of control the borrow checker already keeps them apart. A firmware
//! that records from an interrupt must wrap the store in its own
//! critical-section mutex around each call, and never hold it across a
//! sensor or gateway call.
//!
//! [`Sampler`]: crate::sampler::Sampler

use heapless::Vec;

use crate::buffer::CircularBuffer;
use crate::time::DateTime;

/// Measured quantities, one ring each
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Quantity {
    /// Air temperature, °C
    Temperature,
    /// Relative humidity, %
    Humidity,
    /// Barometric pressure, hPa
    Pressure,
    /// Illuminance, lux
    Light,
}

impl Quantity {
    /// Number of quantities
    pub const COUNT: usize = 4;

    /// Every quantity in datastream order
    pub const ALL: [Quantity; Quantity::COUNT] = [
        Quantity::Temperature,
        Quantity::Humidity,
        Quantity::Pressure,
        Quantity::Light,
    ];

    /// Position in [`Quantity::ALL`]
    pub const fn index(self) -> usize {
        match self {
            Quantity::Temperature => 0,
            Quantity::Humidity => 1,
            Quantity::Pressure => 2,
            Quantity::Light => 3,
        }
    }

    /// Lowercase name
    pub const fn name(self) -> &'static str {
        match self {
            Quantity::Temperature => "temperature",
            Quantity::Humidity => "humidity",
            Quantity::Pressure => "pressure",
            Quantity::Light => "light",
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Quantity {
    fn format(&self, fmt: defmt::Formatter) {
        defmt::write!(fmt, "{}", self.name())
    }
}

/// One recorded reading
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// Reading in the quantity's unit
    pub value: f32,
    /// Clock time of capture
    pub captured_at: DateTime,
}

/// Fixed-capacity history for every [`Quantity`]
///
/// ```rust
/// use klik_core::store::{SampleStore, Quantity};
/// use klik_core::time::DateTime;
///
/// let mut store: SampleStore<3> = SampleStore::new();
/// let at = DateTime::from_calendar(2024, 6, 1, 12, 0, 0)?;
/// for v in [20.0, 20.5, 21.0, 21.5] {
///     store.record(Quantity::Temperature, v, at);
/// }
/// let values: Vec<f32> = store.snapshot(Quantity::Temperature).iter().map(|s| s.value).collect();
/// assert_eq!(values, vec![20.5, 21.0, 21.5]);
/// assert!(store.snapshot(Quantity::Humidity).is_empty());
/// # Ok::<(), klik_core::TimeError>(())
/// ```
#[derive(Debug, Clone)]
pub struct SampleStore<const N: usize> {
    rings: [CircularBuffer<Sample, N>; Quantity::COUNT],
}

impl<const N: usize> SampleStore<N> {
    /// Empty store
    pub const fn new() -> Self {
        Self {
            rings: [
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
                CircularBuffer::new(),
            ],
        }
    }

    /// Append a reading, evicting the oldest one if the ring is full
    ///
    /// Returns the evicted sample, if any.
    pub fn record(&mut self, quantity: Quantity, value: f32, at: DateTime) -> Option<Sample> {
        self.rings[quantity.index()].push(Sample { value, captured_at: at })
    }

    /// Copy of a quantity's history, oldest first
    pub fn snapshot(&self, quantity: Quantity) -> Vec<Sample, N> {
        self.rings[quantity.index()].snapshot()
    }

    /// Iterate a quantity's history without copying, oldest first
    pub fn iter(&self, quantity: Quantity) -> impl Iterator<Item = &Sample> {
        self.rings[quantity.index()].iter()
    }

    /// Most recent sample of a quantity
    pub fn latest(&self, quantity: Quantity) -> Option<&Sample> {
        self.rings[quantity.index()].last()
    }

    /// Number of samples held for a quantity
    pub fn len(&self, quantity: Quantity) -> usize {
        self.rings[quantity.index()].len()
    }

    /// Whether a quantity has no samples
    pub fn is_empty(&self, quantity: Quantity) -> bool {
        self.rings[quantity.index()].is_empty()
    }

    /// Samples per quantity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Forget a quantity's history
    pub fn clear(&mut self, quantity: Quantity) {
        self.rings[quantity.index()].clear();
    }
}

impl<const N: usize> Default for SampleStore<N> {
    fn default() -> Self {
        Self::new()
    }
}
