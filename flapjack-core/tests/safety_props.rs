//! Heater safety under random button, fault and timing schedules

mod common;

use common::{Harness, MockRelay};
use flapjack_core::{MachineConfig, Status};
use proptest::prelude::*;

#[derive(Debug, Clone, Copy)]
enum Action {
    Confirm(bool),
    Cancel(bool),
    Stall(u8),
    Wait,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        4 => any::<bool>().prop_map(Action::Confirm),
        3 => any::<bool>().prop_map(Action::Cancel),
        1 => (0u8..3).prop_map(Action::Stall),
        4 => Just(Action::Wait),
    ]
}

fn apply(h: &mut Harness, action: Action) {
    match action {
        Action::Confirm(pressed) => h.set_confirm(pressed),
        Action::Cancel(pressed) => h.set_cancel(pressed),
        Action::Stall(axis) => {
            let axes = h.cycle.axes_mut();
            let axis = match axis {
                0 => &mut axes.conveyor,
                1 => &mut axes.dispenser,
                _ => &mut axes.cooling,
            };
            axis.stalled = true;
        }
        Action::Wait => {}
    }
}

fn assert_heater_safe(h: &Harness) -> Result<(), TestCaseError> {
    let status = h.cycle.status();
    if matches!(status, Status::Empty | Status::Cancelled) {
        prop_assert!(!h.heater_on(), "heater commanded in {:?} at {}", status, h.now);
        prop_assert!(!h.cycle.griddle().output().on, "relay on in {:?}", status);
    }
    if h.heater_on() {
        prop_assert!(status.heater_allowed(), "heater commanded in {:?}", status);
    }
    Ok(())
}

proptest! {
    #[test]
    fn heater_off_whenever_idle_or_cancelled(
        schedule in prop::collection::vec((action(), 1u32..3_000), 1..100),
        stuck_relay in any::<bool>(),
    ) {
        let relay = MockRelay { stuck: stuck_relay, ..MockRelay::default() };
        let mut h = Harness::with_parts(MachineConfig::new(), relay);

        for (action, wait_ms) in schedule {
            apply(&mut h, action);
            let mut left = wait_ms;
            while left > 0 {
                let dt = left.min(25);
                h.step(dt);
                left -= dt;
                assert_heater_safe(&h)?;
            }
        }
    }

    #[test]
    fn status_stays_empty_without_confirm(
        schedule in prop::collection::vec((any::<bool>(), 1u32..10_000), 1..50),
    ) {
        let mut h = Harness::new();
        for (cancel, wait_ms) in schedule {
            h.set_cancel(cancel);
            h.run(wait_ms);
            prop_assert_eq!(h.cycle.status(), Status::Empty);
            prop_assert!(!h.heater_on());
        }
    }
}
