//! Schedule tables used across the integration tests

use klik_core::{Power, RuleKind, ScheduleRule, ScheduleTable, Switch, ValidatedSchedule};

use super::hms;

/// Porch light on 18:00 to 22:00, hall heater on at 06:00
pub fn evening_and_morning() -> ValidatedSchedule {
    let switches = [
        Switch::new(1, 'J', "porch").unwrap(),
        Switch::new(2, 'J', "hall heater").unwrap(),
    ];
    let rules = [
        ScheduleRule::new(1, RuleKind::paired(hms(18, 0, 0), hms(22, 0, 0))),
        ScheduleRule::new(2, RuleKind::single_edge(hms(6, 0, 0), Power::On)),
    ];
    ScheduleTable::load(&switches, &rules).unwrap()
}

/// Garden lights on 23:00 to 01:00
pub fn overnight() -> ValidatedSchedule {
    let switches = [Switch::new(3, 'B', "garden").unwrap()];
    let rules = [ScheduleRule::new(3, RuleKind::paired(hms(23, 0, 0), hms(1, 0, 0)))];
    ScheduleTable::load(&switches, &rules).unwrap()
}

/// One switch with a single-edge ON at 07:00 and OFF at 08:00
pub fn morning_pulse() -> ValidatedSchedule {
    let switches = [Switch::new(4, 'C', "kettle").unwrap()];
    let rules = [
        ScheduleRule::new(4, RuleKind::single_edge(hms(7, 0, 0), Power::On)),
        ScheduleRule::new(4, RuleKind::single_edge(hms(8, 0, 0), Power::Off)),
    ];
    ScheduleTable::load(&switches, &rules).unwrap()
}
