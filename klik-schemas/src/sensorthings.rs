//! OGC SensorThings entity documents
//!
//! Renders a node's [`ReportingView`] as the JSON a SensorThings client
//! expects. Links are relative to [`API_ROOT`] on the node itself:
//!
//! ```text
//! /v1.0/Things(1)
//! /v1.0/Things(1)/Datastreams
//! /v1.0/Datastreams(2)
//! /v1.0/Datastreams(2)/Observations
//! /v1.0/Datastreams(2)/Observations(7)
//! ```
//!
//! Observation ids count from 1 within a datastream, oldest first, so they
//! shift as the history rolls over.

use serde::Serialize;

use klik_core::{
    things::{Datastream, Observation, ReportingView, UnitOfMeasurement},
    Quantity, SwitchState,
};

/// Path prefix of every self link
pub const API_ROOT: &str = "/v1.0";

/// `{"@iot.count": n, "value": [...]}`
#[derive(Debug, Clone, Serialize)]
pub struct Collection<T> {
    /// Number of entities in `value`
    #[serde(rename = "@iot.count")]
    pub count: usize,
    /// The entities
    pub value: Vec<T>,
}

impl<T> From<Vec<T>> for Collection<T> {
    fn from(value: Vec<T>) -> Self {
        Self { count: value.len(), value }
    }
}

/// A `Thing` entity
#[derive(Debug, Clone, Serialize)]
pub struct ThingDocument {
    #[serde(rename = "@iot.id")]
    pub id: u32,
    #[serde(rename = "@iot.selfLink")]
    pub self_link: String,
    pub name: String,
    pub description: String,
    pub properties: ThingProperties,
    #[serde(rename = "Datastreams@iot.navigationLink")]
    pub datastreams_link: String,
}

/// Free-form `properties` of the node's `Thing`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThingProperties {
    pub firmware: &'static str,
    pub sample_interval_min: u16,
    pub switch_interval_min: u16,
    pub switches: Vec<SwitchProperty>,
}

/// A switch and its tracked state
#[derive(Debug, Clone, Serialize)]
pub struct SwitchProperty {
    pub no: u8,
    pub group: char,
    pub name: String,
    /// `"on"`, `"off"` or `"unknown"`
    pub state: &'static str,
}

/// A `Datastream` entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatastreamDocument {
    #[serde(rename = "@iot.id")]
    pub id: u32,
    #[serde(rename = "@iot.selfLink")]
    pub self_link: String,
    pub name: &'static str,
    pub description: &'static str,
    pub observation_type: &'static str,
    pub unit_of_measurement: UnitDocument,
    #[serde(rename = "Thing@iot.navigationLink")]
    pub thing_link: String,
    #[serde(rename = "Observations@iot.navigationLink")]
    pub observations_link: String,
}

/// `unitOfMeasurement` of a datastream
#[derive(Debug, Clone, Copy, Serialize)]
pub struct UnitDocument {
    pub name: &'static str,
    pub symbol: &'static str,
    pub definition: &'static str,
}

impl From<UnitOfMeasurement> for UnitDocument {
    fn from(unit: UnitOfMeasurement) -> Self {
        Self {
            name: unit.name,
            symbol: unit.symbol,
            definition: unit.definition,
        }
    }
}

/// An `Observation` entity
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservationDocument {
    #[serde(rename = "@iot.id")]
    pub id: usize,
    #[serde(rename = "@iot.selfLink")]
    pub self_link: String,
    /// ISO-8601 local time of capture
    pub phenomenon_time: String,
    pub result: f32,
    #[serde(rename = "Datastream@iot.navigationLink")]
    pub datastream_link: String,
}

fn thing_link(id: u32) -> String {
    format!("{API_ROOT}/Things({id})")
}

fn datastream_link(id: u32) -> String {
    format!("{API_ROOT}/Datastreams({id})")
}

fn state_name(state: SwitchState) -> &'static str {
    match state {
        SwitchState::On => "on",
        SwitchState::Off => "off",
        SwitchState::Unknown => "unknown",
    }
}

/// The node as a `Thing`
pub fn thing_document<const N: usize>(view: &ReportingView<'_, N>) -> ThingDocument {
    let [thing] = view.list_things();
    let config = view.config();
    let self_link = thing_link(thing.id());

    ThingDocument {
        id: thing.id(),
        datastreams_link: format!("{self_link}/Datastreams"),
        self_link,
        name: thing.name.to_owned(),
        description: thing.description.to_owned(),
        properties: ThingProperties {
            firmware: klik_core::VERSION,
            sample_interval_min: config.sample_interval_min,
            switch_interval_min: config.switch_interval_min,
            switches: view
                .switches()
                .map(|(switch, state)| SwitchProperty {
                    no: switch.no(),
                    group: switch.group(),
                    name: switch.name().to_owned(),
                    state: state_name(state),
                })
                .collect(),
        },
    }
}

/// One `Datastream`
pub fn datastream_document<const N: usize>(
    view: &ReportingView<'_, N>,
    quantity: Quantity,
) -> DatastreamDocument {
    render_datastream(view, view.datastream(quantity))
}

/// Every `Datastream` of the node
pub fn datastream_documents<const N: usize>(
    view: &ReportingView<'_, N>,
) -> Collection<DatastreamDocument> {
    view.list_datastreams()
        .into_iter()
        .map(|ds| render_datastream(view, ds))
        .collect::<Vec<_>>()
        .into()
}

fn render_datastream<const N: usize>(
    view: &ReportingView<'_, N>,
    ds: Datastream,
) -> DatastreamDocument {
    let [thing] = view.list_things();
    let self_link = datastream_link(ds.id());
    DatastreamDocument {
        id: ds.id(),
        observations_link: format!("{self_link}/Observations"),
        self_link,
        name: ds.name,
        description: ds.description,
        observation_type: ds.observation_type,
        unit_of_measurement: ds.unit.into(),
        thing_link: thing_link(thing.id()),
    }
}

/// Observation history of one quantity, oldest first
pub fn observation_collection<const N: usize>(
    view: &ReportingView<'_, N>,
    quantity: Quantity,
) -> Collection<ObservationDocument> {
    let ds_link = datastream_link(view.datastream(quantity).id());
    view.observations(quantity)
        .enumerate()
        .map(|(i, obs)| render_observation(&ds_link, i + 1, obs))
        .collect::<Vec<_>>()
        .into()
}

/// Most recent observation of one quantity
pub fn latest_observation_document<const N: usize>(
    view: &ReportingView<'_, N>,
    quantity: Quantity,
) -> Option<ObservationDocument> {
    let ds_link = datastream_link(view.datastream(quantity).id());
    let id = view.len(quantity);
    view.latest_observation(quantity)
        .map(|obs| render_observation(&ds_link, id, obs))
}

fn render_observation(ds_link: &str, id: usize, obs: Observation) -> ObservationDocument {
    ObservationDocument {
        id,
        self_link: format!("{ds_link}/Observations({id})"),
        phenomenon_time: obs.phenomenon_time.to_string(),
        result: obs.result,
        datastream_link: ds_link.to_owned(),
    }
}
