//! The node's cooperative main loop
//!
//! [`Node`] owns everything that changes at runtime and is driven by
//! repeated calls to [`Node::poll_at`] from the firmware loop. Each call
//! checks the two interval timers and runs whichever task is due:
//!
//! - sampling reads the sensors into the store
//! - a scheduler tick evaluates the timetable and drives the radio
//!
//! The two never share a failure: a dead sensor does not delay a switch,
//! and a busy radio does not stop sampling.

use crate::config::NodeConfig;
use crate::constants::buffers::DEFAULT_SAMPLE_COUNT;
use crate::errors::{ConfigError, ConfigResult};
use crate::sampler::{SampleReport, Sampler};
use crate::schedule::ValidatedSchedule;
use crate::scheduler::{SwitchScheduler, TickReport};
use crate::store::SampleStore;
use crate::things::ReportingView;
use crate::time::DateTime;
use crate::timer::IntervalTimer;
use crate::traits::{ClockSource, EnvironmentSensors, TransmitGateway};

/// What ran during one poll
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PollReport {
    /// Present when a sampling cycle ran
    pub sample: Option<SampleReport>,
    /// Present when a scheduler tick ran
    pub tick: Option<TickReport>,
}

impl PollReport {
    /// Whether neither task was due
    pub fn is_idle(&self) -> bool {
        self.sample.is_none() && self.tick.is_none()
    }
}

/// Node with the stock history depth
pub type DefaultNode = Node<DEFAULT_SAMPLE_COUNT>;

/// A running node with `N` samples of history per quantity
#[derive(Debug, Clone)]
pub struct Node<const N: usize> {
    config: NodeConfig,
    scheduler: SwitchScheduler,
    store: SampleStore<N>,
    sample_timer: IntervalTimer,
    switch_timer: IntervalTimer,
}

impl<const N: usize> Node<N> {
    /// Validate the configuration and take ownership of the schedule
    pub fn new(config: NodeConfig, schedule: ValidatedSchedule) -> ConfigResult<Self> {
        config.validate()?;
        check_capacity(&config, &schedule)?;

        log_info!(
            "Node '{}' up: {} switches, sampling every {} min, switching every {} min",
            config.site_name,
            schedule.len(),
            config.sample_interval_min,
            config.switch_interval_min
        );

        Ok(Self {
            sample_timer: IntervalTimer::new(config.sample_period_secs()),
            switch_timer: IntervalTimer::new(config.switch_period_secs()),
            scheduler: SwitchScheduler::new(schedule),
            store: SampleStore::new(),
            config,
        })
    }

    /// Run whatever is due at `now`
    pub fn poll_at<G, S>(&mut self, now: &DateTime, gateway: &mut G, sensors: &mut S) -> PollReport
    where
        G: TransmitGateway + ?Sized,
        S: EnvironmentSensors + ?Sized,
    {
        let mut report = PollReport::default();

        if self.sample_timer.poll(now) {
            report.sample = Some(Sampler::sample(sensors, &mut self.store, *now));
        }
        if self.switch_timer.poll(now) {
            let tick = self.scheduler.tick(now, gateway);
            if tick.has_failures() {
                log_debug!(
                    "Tick at {} left {} switches pending",
                    now,
                    tick.transitions.len() - tick.sent().count()
                );
            }
            report.tick = Some(tick);
        }

        report
    }

    /// Run whatever is due at the clock's current time
    pub fn poll<C, G, S>(&mut self, clock: &C, gateway: &mut G, sensors: &mut S) -> PollReport
    where
        C: ClockSource + ?Sized,
        G: TransmitGateway + ?Sized,
        S: EnvironmentSensors + ?Sized,
    {
        let now = clock.now();
        self.poll_at(&now, gateway, sensors)
    }

    /// Read-only view for the reporting side
    pub fn reporting(&self) -> ReportingView<'_, N> {
        ReportingView::new(&self.config, &self.store, &self.scheduler)
    }

    /// Swap the schedule table at runtime
    ///
    /// The next poll runs a tick regardless of the switch timer.
    pub fn replace_schedule(&mut self, schedule: ValidatedSchedule) -> ConfigResult<()> {
        check_capacity(&self.config, &schedule)?;
        self.scheduler.replace_schedule(schedule);
        self.switch_timer.reset();
        Ok(())
    }

    /// Settings in force
    pub fn config(&self) -> &NodeConfig {
        &self.config
    }

    /// The switch scheduler
    pub fn scheduler(&self) -> &SwitchScheduler {
        &self.scheduler
    }

    /// Sample history
    pub fn store(&self) -> &SampleStore<N> {
        &self.store
    }
}

fn check_capacity(config: &NodeConfig, schedule: &ValidatedSchedule) -> ConfigResult<()> {
    if schedule.len() > config.max_switch as usize {
        return Err(ConfigError::TooManySwitches {
            count: schedule.len(),
            max: config.max_switch as usize,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{SensorError, TransmitError};
    use crate::schedule::{Power, RuleKind, ScheduleRule, ScheduleTable, Switch};
    use crate::store::Quantity;
    use crate::time::FixedClock;
    use crate::traits::SwitchCommand;

    struct Radio {
        busy: bool,
        sent: usize,
    }

    impl TransmitGateway for Radio {
        fn transmit(&mut self, _: SwitchCommand) -> nb::Result<(), TransmitError> {
            if self.busy {
                return Err(nb::Error::WouldBlock);
            }
            self.sent += 1;
            Ok(())
        }
    }

    struct Broken;

    impl EnvironmentSensors for Broken {
        fn read_temperature(&mut self) -> Result<f32, SensorError> {
            Err(SensorError::Timeout)
        }
        fn read_humidity(&mut self) -> Result<f32, SensorError> {
            Err(SensorError::Checksum)
        }
        fn read_light(&mut self) -> f32 {
            120.0
        }
    }

    fn schedule(count: u8) -> ValidatedSchedule {
        let switches: heapless::Vec<Switch, 16> =
            (1..=count).map(|no| Switch::new(no, 'J', "s").unwrap()).collect();
        let rules = [ScheduleRule::new(1, RuleKind::single_edge(3_600, Power::On))];
        ScheduleTable::load(&switches, &rules).unwrap()
    }

    fn at(hour: u8, min: u8) -> DateTime {
        DateTime::from_calendar(2024, 6, 1, hour, min, 0).unwrap()
    }

    #[test]
    fn rejects_more_switches_than_configured() {
        let config = NodeConfig { max_switch: 2, ..NodeConfig::default() };
        let err = Node::<4>::new(config, schedule(3)).unwrap_err();
        assert_eq!(err, ConfigError::TooManySwitches { count: 3, max: 2 });
    }

    #[test]
    fn rejects_invalid_config() {
        let config = NodeConfig { sample_interval_min: 0, ..NodeConfig::default() };
        assert!(matches!(
            Node::<4>::new(config, schedule(1)),
            Err(ConfigError::InvalidSetting { name: "sampleIntervalMin", .. })
        ));
    }

    #[test]
    fn sensor_failures_do_not_block_switching() {
        let mut node: Node<4> = Node::new(NodeConfig::default(), schedule(1)).unwrap();
        let mut radio = Radio { busy: false, sent: 0 };

        let report = node.poll_at(&at(1, 0), &mut radio, &mut Broken);
        let sample = report.sample.unwrap();
        assert_eq!(sample.result(Quantity::Temperature), Err(SensorError::Timeout));
        assert_eq!(sample.result(Quantity::Light), Ok(120.0));
        assert_eq!(report.tick.unwrap().sent().count(), 1);
        assert_eq!(radio.sent, 1);
        assert_eq!(node.store().len(Quantity::Light), 1);
        assert!(node.store().is_empty(Quantity::Temperature));
    }

    #[test]
    fn timers_gate_each_task() {
        let mut node: Node<4> = Node::new(NodeConfig::default(), schedule(1)).unwrap();
        let mut radio = Radio { busy: true, sent: 0 };

        assert!(!node.poll_at(&at(0, 0), &mut radio, &mut Broken).is_idle());
        assert!(node.poll_at(&at(0, 1), &mut radio, &mut Broken).is_idle());

        let report = node.poll_at(&at(0, 3), &mut radio, &mut Broken);
        assert!(report.sample.is_none());
        assert!(report.tick.is_some());

        let report = node.poll_at(&at(0, 10), &mut radio, &mut Broken);
        assert!(report.sample.is_some());
    }

    #[test]
    fn busy_radio_retries_on_next_tick() {
        let mut node: Node<4> = Node::new(NodeConfig::default(), schedule(1)).unwrap();
        let mut radio = Radio { busy: true, sent: 0 };

        let tick = node.poll_at(&at(1, 0), &mut radio, &mut Broken).tick.unwrap();
        assert!(tick.has_failures());
        assert_eq!(node.scheduler().is_latched(1, 0), Some(false));

        radio.busy = false;
        let tick = node.poll_at(&at(1, 3), &mut radio, &mut Broken).tick.unwrap();
        assert_eq!(tick.sent().count(), 1);
        assert_eq!(node.scheduler().is_latched(1, 0), Some(true));
    }

    #[test]
    fn poll_reads_the_clock() {
        let mut node: Node<4> = Node::new(NodeConfig::default(), schedule(1)).unwrap();
        let mut radio = Radio { busy: false, sent: 0 };
        let mut clock = FixedClock::new(at(0, 30));

        assert!(node.poll(&clock, &mut radio, &mut Broken).tick.unwrap().transitions.is_empty());
        clock.advance_seconds(3_600);
        assert_eq!(node.poll(&clock, &mut radio, &mut Broken).tick.unwrap().sent().count(), 1);
    }

    #[test]
    fn replace_schedule_forces_a_tick() {
        let mut node: Node<4> = Node::new(NodeConfig::default(), schedule(1)).unwrap();
        let mut radio = Radio { busy: false, sent: 0 };
        node.poll_at(&at(0, 0), &mut radio, &mut Broken);

        node.replace_schedule(schedule(2)).unwrap();
        assert!(node.poll_at(&at(0, 1), &mut radio, &mut Broken).tick.is_some());

        let too_many = schedule(9);
        assert!(node.replace_schedule(too_many).is_err());
        assert_eq!(node.scheduler().schedule().len(), 2);
    }
}
