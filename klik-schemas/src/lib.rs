//! JSON surfaces of a klik node
//!
//! Two directions, both plain `serde` documents:
//!
//! - [`config`]: a JSON configuration document in, a validated
//!   [`NodeConfig`](klik_core::NodeConfig) and schedule table out
//! - [`sensorthings`]: the node's reporting view out, as OGC SensorThings
//!   entity documents
//!
//! Nothing here opens files or sockets. The firmware or a host tool
//! supplies the text and decides where the rendered JSON goes.
//!
//! ```rust
//! use klik_schemas::{config::load_config, sensorthings};
//!
//! let loaded = load_config(r#"{
//!     "siteName": "cabin",
//!     "switches": [{ "no": 1, "group": "J", "name": "porch" }],
//!     "schedule": [{ "no": 1, "whenOn": "18:00", "whenOff": "22:00" }]
//! }"#)?;
//!
//! let node = loaded.into_node::<15>()?;
//! let thing = serde_json::to_value(sensorthings::thing_document(&node.reporting()))?;
//! assert_eq!(thing["name"], "cabin");
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod config;
pub mod sensorthings;

use klik_core::{ConfigError, TimeError};

pub use config::{load_config, LoadedConfig};

/// Errors turning a document into node configuration
#[derive(Debug, PartialEq, thiserror_no_std::Error)]
pub enum SchemaError {
    /// Not valid JSON, or the wrong shape
    #[error("Failed to parse document: {0}")]
    Parse(String),

    /// Well-formed but rejected by validation
    #[error("Invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// A time of day string that does not parse
    #[error("Invalid time of day: {0}")]
    Time(#[from] TimeError),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Parse(err.to_string())
    }
}
