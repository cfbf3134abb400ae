//! End-to-end tests of the cooperative node loop
//!
//! Drives a node through a simulated day with a fixed clock and checks
//! that sampling and switching run at their own cadence and fail apart.

#![cfg(test)]

mod common;

use klik_core::{
    errors::SensorError,
    time::{ClockSource, FixedClock},
    DefaultNode, Node, NodeConfig, Power, Quantity, SwitchState,
};

use common::{at, scenarios, GatewayStep, RecordingGateway, ScriptedSensors};

fn node() -> DefaultNode {
    Node::new(NodeConfig::for_site("cabin").unwrap(), scenarios::evening_and_morning()).unwrap()
}

#[test]
fn full_day_at_one_minute_polls() {
    let mut node = node();
    let mut clock = FixedClock::new(at(0, 0, 0));
    let mut radio = RecordingGateway::new();
    let mut sensors = ScriptedSensors::steady(21.5, 48.0, 250.0);

    let mut samples = 0;
    let mut ticks = 0;
    for _ in 0..1_440 {
        let report = node.poll(&clock, &mut radio, &mut sensors);
        samples += usize::from(report.sample.is_some());
        ticks += usize::from(report.tick.is_some());
        clock.advance_seconds(60);
    }

    assert_eq!(samples, 144);
    assert_eq!(ticks, 480);
    assert_eq!(radio.history(), vec![(2, Power::On), (1, Power::On), (1, Power::Off)]);
    assert_eq!(node.store().len(Quantity::Temperature), 15);
    assert!(node.store().is_empty(Quantity::Pressure));
}

#[test]
fn stalled_loop_catches_up_once() {
    let mut node = node();
    let mut radio = RecordingGateway::new();
    let mut sensors = ScriptedSensors::steady(20.0, 50.0, 0.0);

    node.poll_at(&at(17, 0, 0), &mut radio, &mut sensors);
    // Nothing polls for over five hours
    let report = node.poll_at(&at(22, 30, 0), &mut radio, &mut sensors);
    assert!(report.sample.is_some());
    let tick = report.tick.unwrap();
    assert_eq!(tick.transitions.len(), 1);
    assert_eq!(tick.transitions[0].power, Power::Off);
    assert_eq!(node.store().len(Quantity::Humidity), 2);
}

#[test]
fn failing_sensor_and_radio_stay_independent() {
    let mut node = node();
    let mut radio = RecordingGateway::new().script(&[GatewayStep::Fail]);
    let mut sensors = ScriptedSensors::steady(19.0, 55.0, 10.0).with_pressure(1008.0);
    sensors.temperature.push_back(Err(SensorError::Checksum));

    let report = node.poll_at(&at(18, 0, 0), &mut radio, &mut sensors);
    let sample = report.sample.unwrap();
    assert_eq!(sample.result(Quantity::Temperature), Err(SensorError::Checksum));
    assert_eq!(sample.recorded(), 3);
    assert!(report.tick.unwrap().has_failures());

    let report = node.poll_at(&at(18, 3, 0), &mut radio, &mut sensors);
    assert!(report.sample.is_none());
    assert_eq!(report.tick.unwrap().sent().count(), 1);

    let view = node.reporting();
    assert!(view.latest_observation(Quantity::Temperature).is_none());
    assert_eq!(view.latest_observation(Quantity::Pressure).map(|o| o.result), Some(1008.0));
    let states: Vec<(u8, SwitchState)> = view.switches().map(|(s, st)| (s.no(), st)).collect();
    assert_eq!(states, vec![(1, SwitchState::On), (2, SwitchState::On)]);
}

#[test]
fn reporting_view_reflects_history() {
    let mut node = node();
    let mut radio = RecordingGateway::new();
    let mut sensors = ScriptedSensors::steady(0.0, 0.0, 0.0);
    let mut clock = FixedClock::new(at(12, 0, 0));

    for i in 0..20 {
        sensors.temperature.push_back(Ok(i as f32));
        node.poll(&clock, &mut radio, &mut sensors);
        clock.advance_seconds(600);
    }

    let view = node.reporting();
    assert_eq!(view.list_things()[0].name, "cabin");
    let history: Vec<f32> = view.history(Quantity::Temperature).iter().map(|s| s.value).collect();
    assert_eq!(history, (5..20).map(|v| v as f32).collect::<Vec<_>>());
    let latest = view.latest_observation(Quantity::Temperature).unwrap();
    assert_eq!(latest.result, 19.0);
    assert_eq!(latest.phenomenon_time, at(15, 10, 0));
    assert_eq!(clock.now(), at(15, 20, 0));
}
