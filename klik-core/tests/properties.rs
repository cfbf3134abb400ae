//! Property tests for the sample store and scheduler invariants

#![cfg(test)]

mod common;

use proptest::prelude::*;

use klik_core::{
    schedule::{RuleKind, ScheduleRule, ScheduleTable, Switch},
    Power, Quantity, SampleStore, SwitchScheduler, SwitchState,
};

use common::{on_day, RecordingGateway};

const CAPACITY: usize = 15;

proptest! {
    #[test]
    fn store_keeps_the_newest_capacity_values(
        values in prop::collection::vec(-40.0f32..85.0, 0..60),
    ) {
        let mut store: SampleStore<CAPACITY> = SampleStore::new();
        let at = on_day(1, 0);
        for &v in &values {
            store.record(Quantity::Temperature, v, at);
        }

        let snapshot: Vec<f32> =
            store.snapshot(Quantity::Temperature).iter().map(|s| s.value).collect();
        let skip = values.len().saturating_sub(CAPACITY);
        prop_assert_eq!(snapshot.len(), values.len().min(CAPACITY));
        prop_assert_eq!(&snapshot[..], &values[skip..]);
        prop_assert!(store.is_empty(Quantity::Humidity));
    }

    #[test]
    fn record_evicts_at_most_one(count in 0usize..40) {
        let mut store: SampleStore<CAPACITY> = SampleStore::new();
        let at = on_day(1, 0);
        for i in 0..count {
            let evicted = store.record(Quantity::Light, i as f32, at);
            prop_assert_eq!(evicted.is_some(), i >= CAPACITY);
            if let Some(old) = evicted {
                prop_assert_eq!(old.value, (i - CAPACITY) as f32);
            }
        }
    }

    #[test]
    fn paired_switch_never_on_before_when_on(
        when_on in 1u32..86_399,
        span in 1u32..43_200,
        ticks in prop::collection::vec(0u32..86_400, 1..40),
    ) {
        let when_off = when_on.saturating_add(span).min(86_399);
        prop_assume!(when_off > when_on);

        let switches = [Switch::new(1, 'A', "lamp").unwrap()];
        let rules = [ScheduleRule::new(1, RuleKind::paired(when_on, when_off))];
        let mut scheduler = SwitchScheduler::new(ScheduleTable::load(&switches, &rules).unwrap());
        let mut radio = RecordingGateway::new();

        let mut ticks = ticks;
        ticks.sort_unstable();
        for now in ticks {
            let report = scheduler.tick(&on_day(1, now), &mut radio);
            for t in report.transitions.iter() {
                if now < when_on {
                    prop_assert_ne!(t.power, Power::On);
                }
                if now >= when_off {
                    prop_assert_eq!(t.power, Power::Off);
                }
            }
        }
    }

    #[test]
    fn overnight_window_is_on_after_midnight(
        when_off in 1u32..43_200,
        span in 1u32..43_200,
        first_day in prop::collection::vec(0u32..86_400, 1..20),
        second_day in prop::collection::vec(0u32..86_400, 1..20),
    ) {
        let when_on = when_off + span;

        let switches = [Switch::new(2, 'C', "heater").unwrap()];
        let rules = [ScheduleRule::new(2, RuleKind::paired(when_on, when_off))];
        let mut scheduler = SwitchScheduler::new(ScheduleTable::load(&switches, &rules).unwrap());
        let mut radio = RecordingGateway::new();

        for (day, mut ticks) in [(1, first_day), (2, second_day)] {
            ticks.sort_unstable();
            for now in ticks {
                scheduler.tick(&on_day(day, now), &mut radio);
                let expected = if now < when_off || now >= when_on {
                    SwitchState::On
                } else {
                    SwitchState::Off
                };
                prop_assert_eq!(scheduler.state(2), Some(expected));
            }
        }
    }

    #[test]
    fn single_edge_transmits_at_most_once_per_day(
        when in 0u32..86_400,
        on in any::<bool>(),
        ticks in prop::collection::vec(0u32..86_400, 1..40),
    ) {
        let switches = [Switch::new(5, 'D', "pump").unwrap()];
        let rules = [ScheduleRule::new(5, RuleKind::single_edge(when, Power::from(on)))];
        let mut scheduler = SwitchScheduler::new(ScheduleTable::load(&switches, &rules).unwrap());
        let mut radio = RecordingGateway::new();

        let mut ticks = ticks;
        ticks.sort_unstable();
        let fired = ticks.iter().any(|&t| t >= when);
        for &now in &ticks {
            scheduler.tick(&on_day(1, now), &mut radio);
        }
        prop_assert_eq!(radio.sent.len(), usize::from(fired));

        // Next day everything is armed again
        let report = scheduler.tick(&on_day(2, 0), &mut radio);
        prop_assert!(report.rolled_over);
        prop_assert_eq!(scheduler.is_latched(5, 0), Some(when == 0));
    }
}
