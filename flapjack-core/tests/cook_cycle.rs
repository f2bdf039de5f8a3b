//! Full cook cycle behaviour against mock hardware

mod common;

use common::{Harness, MockRelay, TICK_MS};
use flapjack_core::cycle::DispensePhase;
use flapjack_core::motion::AxisId;
use flapjack_core::traits::StepperAxis;
use flapjack_core::{Event, FaultKind, MachineConfig, Status};

/// Request a pancake and return the time the heater came on
fn request(h: &mut Harness) -> u32 {
    let events = h.press_confirm();
    assert_eq!(events, vec![Event::Confirm]);
    assert_eq!(h.cycle.status(), Status::Requested);
    h.cycle.status_since_ms()
}

/// Drive a fresh harness into `Baking`, returning the entry time
fn bake(h: &mut Harness) -> u32 {
    request(h);
    h.run_until(10_000, |c| c.status() == Status::Baking)
        .expect("reaches Baking")
}

/// Drive a fresh harness into `Ready`, returning the entry time
fn finish(h: &mut Harness) -> u32 {
    bake(h);
    h.run_until(20_000, |c| c.status() == Status::Ready)
        .expect("reaches Ready")
}

#[test]
fn test_idle_without_buttons() {
    let mut h = Harness::new();
    for _ in 0..2_000 {
        assert_eq!(h.step(100), None);
    }
    assert_eq!(h.cycle.status(), Status::Empty);
    assert!(!h.heater_on());
    assert!(!h.cycle.axes().conveyor.is_enabled());
}

#[test]
fn test_confirm_requests_and_starts_dispense() {
    let mut h = Harness::new();
    let heater_on_at = request(&mut h);

    assert!(h.heater_on());
    assert!(h.cycle.griddle().output().on);
    assert_eq!(h.cycle.axes().conveyor.target, 1600);
    assert_ne!(h.cycle.dispense_phase(), DispensePhase::Idle);

    let baking_at = h
        .run_until(10_000, |c| c.status() == Status::Baking)
        .expect("reaches Baking");
    assert_eq!(baking_at, heater_on_at + 2000);
    assert_eq!(h.cycle.dispense_phase(), DispensePhase::Done);
    assert!(!h.cycle.axes().dispenser.is_enabled());
}

#[test]
fn test_never_baking_before_heatup() {
    let mut h = Harness::new();
    let heater_on_at = request(&mut h);

    while h.now < heater_on_at + 1990 {
        h.step(TICK_MS);
        assert_eq!(h.cycle.status(), Status::Requested, "at {}", h.now);
        assert!(!h.cycle.griddle().is_ready(h.now));
    }
}

#[test]
fn test_waits_for_conveyor_even_when_hot() {
    let mut h = Harness::new();
    request(&mut h);
    // Belt lagging behind
    let conveyor = &mut h.cycle.axes_mut().conveyor;
    conveyor.enabled = false;
    conveyor.position = 800;
    conveyor.target = 800;

    h.run(5_000);
    assert_eq!(h.cycle.status(), Status::Requested);
    assert!(h.cycle.griddle().is_ready(h.now));

    let conveyor = &mut h.cycle.axes_mut().conveyor;
    conveyor.position = 1600;
    conveyor.target = 1600;
    assert_eq!(h.step(TICK_MS), Some(Event::ReadyToBake));
}

#[test]
fn test_baking_to_ready_exactly_at_cook_time() {
    let mut h = Harness::new();
    let baking_at = bake(&mut h);

    h.step(baking_at + 9_999 - h.now);
    assert_eq!(h.cycle.status(), Status::Baking);
    assert!(h.heater_on());

    assert_eq!(h.step(1), Some(Event::CookTimeElapsed));
    assert_eq!(h.now, baking_at + 10_000);
    assert_eq!(h.cycle.status(), Status::Ready);
    assert!(!h.heater_on());
    assert_eq!(h.cycle.axes().conveyor.target, 3200);
    assert_eq!(h.cycle.axes().cooling.target, 1600);
    assert_eq!(h.cycle.completed_cycles(), 1);
}

#[test]
fn test_view_follows_cycle() {
    let mut h = Harness::new();
    let baking_at = bake(&mut h);

    let view = h.cycle.view(baking_at + 2_500);
    assert_eq!(view.status, Status::Baking);
    assert_eq!(view.progress_permille, 250);
    assert_eq!(view.seconds_left, 8);
    assert!(view.heater_ready);

    let ready_at = h
        .run_until(20_000, |c| c.status() == Status::Ready)
        .expect("reaches Ready");
    let view = h.cycle.view(ready_at);
    assert!(view.is_cooling());
    assert!(!h.cycle.view(ready_at + 2_000).is_cooling());
}

#[test]
fn test_cancel_in_each_active_status() {
    let drivers: [fn(&mut Harness) -> u32; 3] = [request, bake, finish];

    for drive in drivers {
        let mut h = Harness::new();
        drive(&mut h);
        let from = h.cycle.status();

        h.set_cancel(true);
        let mut cancelled_at = None;
        for _ in 0..10 {
            if h.step(TICK_MS) == Some(Event::Cancel) {
                cancelled_at = Some(h.now);
                break;
            }
            assert_eq!(h.cycle.status(), from);
        }

        assert!(cancelled_at.is_some(), "cancel not accepted in {:?}", from);
        assert_eq!(h.cycle.status(), Status::Cancelled);
        assert!(!h.heater_on());
        assert!(!h.cycle.griddle().output().on);
        assert!(!h.cycle.axes().dispenser.is_enabled());
        assert!(!h.cycle.axes().cooling.is_enabled());
    }
}

#[test]
fn test_cancel_purges_conveyor_then_releases_it() {
    let mut h = Harness::new();
    bake(&mut h);
    assert_eq!(h.cycle.axes().conveyor.position, 1600);

    h.press_cancel();
    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert_eq!(h.cycle.axes().conveyor.position, 0);
    assert!(!h.cycle.axes().conveyor.is_enabled());
}

#[test]
fn test_stall_during_purge_releases_conveyor() {
    let mut h = Harness::new();
    bake(&mut h);

    h.set_cancel(true);
    h.run_until(200, |c| c.status() == Status::Cancelled)
        .expect("cancelled");
    h.set_cancel(false);
    assert_eq!(h.cycle.axes().conveyor.target, 0);

    // Belt jams before it gets back to the origin
    h.cycle.axes_mut().conveyor.stalled = true;
    h.step(TICK_MS);

    let conveyor = &h.cycle.axes().conveyor;
    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert_eq!(conveyor.position, 1600);
    assert!(!conveyor.is_enabled());
    assert!(!h.heater_on());

    // Still released for the rest of the kill window
    h.run(59_000);
    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert!(!h.cycle.axes().conveyor.is_enabled());
}

#[test]
fn test_cancelled_to_empty_exactly_at_kill_timeout() {
    let mut h = Harness::new();
    request(&mut h);

    h.set_cancel(true);
    let cancelled_at = h
        .run_until(200, |c| c.status() == Status::Cancelled)
        .expect("cancelled");
    h.set_cancel(false);

    h.step(cancelled_at + 59_999 - h.now);
    assert_eq!(h.cycle.status(), Status::Cancelled);

    assert_eq!(h.step(1), Some(Event::Fault(FaultKind::StuckCancel)));
    assert_eq!(h.now, cancelled_at + 60_000);
    assert_eq!(h.cycle.status(), Status::Empty);
    assert_eq!(h.cycle.last_fault(), None);
    assert!(!h.heater_on());
    for axis in AxisId::ALL {
        assert!(!h.cycle.axes().get(axis).is_enabled());
    }
}

#[test]
fn test_buttons_ignored_while_cancelled() {
    let mut h = Harness::new();
    request(&mut h);
    h.press_cancel();
    let cancelled_at = h.cycle.status_since_ms();

    h.run(10_000);
    assert!(h.press_cancel().is_empty());
    assert!(h.press_confirm().is_empty());
    assert_eq!(h.cycle.status(), Status::Cancelled);

    // Kill timer still counts from the first cancel
    let empty_at = h
        .run_until(60_000, |c| c.status() == Status::Empty)
        .expect("returns to Empty");
    assert_eq!(empty_at, cancelled_at + 60_000);
}

#[test]
fn test_repeated_confirm_ignored() {
    let mut h = Harness::new();
    request(&mut h);
    assert!(h.press_confirm().is_empty());
    assert_eq!(h.cycle.status(), Status::Requested);

    h.run_until(10_000, |c| c.status() == Status::Baking)
        .expect("reaches Baking");
    assert!(h.press_confirm().is_empty());
    assert_eq!(h.cycle.status(), Status::Baking);
}

#[test]
fn test_confirm_collects_pancake() {
    let mut h = Harness::new();
    finish(&mut h);

    assert_eq!(h.press_confirm(), vec![Event::Confirm]);
    assert_eq!(h.cycle.status(), Status::Empty);
    for axis in AxisId::ALL {
        assert!(!h.cycle.axes().get(axis).is_enabled());
    }
}

#[test]
fn test_pickup_timeout() {
    let mut h = Harness::new();
    let ready_at = finish(&mut h);

    h.step(ready_at + 29_999 - h.now);
    assert_eq!(h.cycle.status(), Status::Ready);
    assert_eq!(h.step(1), Some(Event::PickupTimeout));
    assert_eq!(h.cycle.status(), Status::Empty);
}

#[test]
fn test_next_cycle_starts_from_new_origin() {
    let mut h = Harness::new();
    finish(&mut h);
    h.press_confirm();
    assert_eq!(h.cycle.axes().conveyor.position, 3200);

    request(&mut h);
    assert_eq!(h.cycle.origin(), 3200);
    assert_eq!(h.cycle.axes().conveyor.target, 4800);
}

#[test]
fn test_cancel_beats_confirm_in_same_tick() {
    let mut h = Harness::new();
    h.set_confirm(true);
    h.set_cancel(true);
    let events = h.run(200);
    assert!(events.is_empty());
    assert_eq!(h.cycle.status(), Status::Empty);
}

#[test]
fn test_motor_stall_cancels_without_purge() {
    let mut h = Harness::new();
    bake(&mut h);

    h.cycle.axes_mut().conveyor.stalled = true;
    assert_eq!(
        h.step(TICK_MS),
        Some(Event::Fault(FaultKind::MotorStall(AxisId::Conveyor)))
    );
    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert!(!h.heater_on());
    assert!(!h.cycle.axes().conveyor.is_enabled());
    assert_eq!(h.cycle.axes().conveyor.target, 1600);
    assert_eq!(
        h.cycle.last_fault(),
        Some(FaultKind::MotorStall(AxisId::Conveyor))
    );

    // Faults clear once the kill timeout returns the machine to Empty
    h.run(60_000);
    assert_eq!(h.cycle.status(), Status::Empty);
    assert!(!h.cycle.axes().conveyor.stalled);
    // The idle screen still names the stall
    assert_eq!(
        h.cycle.last_fault(),
        Some(FaultKind::MotorStall(AxisId::Conveyor))
    );
}

#[test]
fn test_refused_move_cancels_next_tick() {
    let mut h = Harness::new();
    h.cycle.axes_mut().dispenser.refuse_moves = true;

    let events = h.press_confirm();
    assert_eq!(
        events,
        vec![
            Event::Confirm,
            Event::Fault(FaultKind::MotorStall(AxisId::Dispenser))
        ]
    );
    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert!(!h.heater_on());
}

#[test]
fn test_heater_watchdog() {
    // Relay welded open: commanded on but never switches
    let relay = MockRelay {
        stuck: true,
        ..MockRelay::default()
    };
    let mut h = Harness::with_parts(MachineConfig::new(), relay);

    let heater_on_at = request(&mut h);
    let cancelled_at = h
        .run_until(10_000, |c| c.status() != Status::Requested)
        .expect("watchdog fires");

    assert_eq!(h.cycle.status(), Status::Cancelled);
    assert_eq!(cancelled_at, heater_on_at + 6_000);
    assert_eq!(h.cycle.last_fault(), Some(FaultKind::HeaterTimeout));
    assert!(!h.heater_on());
}
