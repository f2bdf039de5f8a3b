//! Host mocks and a stepping harness for cook cycle tests

#![allow(dead_code)]

use flapjack_core::cycle::Axes;
use flapjack_core::traits::{ButtonInput, HeaterOutput, StepperAxis, StepperError};
use flapjack_core::{CookCycle, Event, MachineConfig};

/// Relay mock; a stuck relay ignores commands
#[derive(Debug, Default)]
pub struct MockRelay {
    pub on: bool,
    pub stuck: bool,
    pub switches: u32,
}

impl HeaterOutput for MockRelay {
    fn set_on(&mut self, on: bool) {
        if !self.stuck && self.on != on {
            self.on = on;
            self.switches += 1;
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

/// Button level mock
#[derive(Debug, Default)]
pub struct MockButton {
    pub pressed: bool,
}

impl ButtonInput for MockButton {
    fn is_pressed(&mut self) -> bool {
        self.pressed
    }
}

/// Axis mock that reaches its target on the next update while enabled
#[derive(Debug, Default)]
pub struct MockAxis {
    pub position: i32,
    pub target: i32,
    pub enabled: bool,
    pub stalled: bool,
    pub refuse_moves: bool,
    pub moves: u32,
}

impl StepperAxis for MockAxis {
    fn move_to(&mut self, target: i32) -> Result<(), StepperError> {
        if self.refuse_moves {
            return Err(StepperError::CommunicationError);
        }
        self.enabled = true;
        self.target = target;
        self.moves += 1;
        Ok(())
    }

    fn stop(&mut self) {
        self.target = self.position;
    }

    fn disable(&mut self) {
        self.stop();
        self.enabled = false;
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn position(&self) -> i32 {
        self.position
    }

    fn is_moving(&self) -> bool {
        self.position != self.target
    }

    fn update(&mut self, _now_us: u64) {
        if self.enabled && !self.stalled {
            self.position = self.target;
        }
    }

    fn fault(&self) -> Option<StepperError> {
        self.stalled.then_some(StepperError::StallDetected)
    }

    fn clear_fault(&mut self) {
        self.stalled = false;
    }
}

pub type TestCycle = CookCycle<MockRelay, MockAxis, MockButton>;

/// Tick period used by [`Harness::run`]
pub const TICK_MS: u32 = 10;

/// Cook cycle plus a simulated clock
pub struct Harness {
    pub cycle: TestCycle,
    pub now: u32,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(MachineConfig::new())
    }

    pub fn with_config(config: MachineConfig) -> Self {
        Self::with_parts(config, MockRelay::default())
    }

    pub fn with_parts(config: MachineConfig, relay: MockRelay) -> Self {
        let axes = Axes::new(
            MockAxis::default(),
            MockAxis::default(),
            MockAxis::default(),
        );
        let mut cycle = CookCycle::new(
            config,
            relay,
            axes,
            MockButton::default(),
            MockButton::default(),
        )
        .expect("default config is valid");
        // Prime the debouncers
        cycle.tick(0);
        Self { cycle, now: 0 }
    }

    /// Advance the clock by `ms` and run one loop iteration
    pub fn step(&mut self, ms: u32) -> Option<Event> {
        self.now += ms;
        self.cycle.poll_motion(self.now as u64 * 1000);
        self.cycle.tick(self.now)
    }

    /// Run loop iterations every [`TICK_MS`] for `ms`, collecting events
    pub fn run(&mut self, ms: u32) -> Vec<Event> {
        let mut events = Vec::new();
        let end = self.now + ms;
        while self.now < end {
            if let Some(event) = self.step(TICK_MS.min(end - self.now)) {
                events.push(event);
            }
        }
        events
    }

    /// Step until `pred` holds, returning the time it first held
    pub fn run_until(&mut self, max_ms: u32, pred: impl Fn(&TestCycle) -> bool) -> Option<u32> {
        let end = self.now + max_ms;
        while self.now < end {
            self.step(TICK_MS);
            if pred(&self.cycle) {
                return Some(self.now);
            }
        }
        None
    }

    pub fn set_confirm(&mut self, pressed: bool) {
        self.cycle.buttons_mut().inputs_mut().0.pressed = pressed;
    }

    pub fn set_cancel(&mut self, pressed: bool) {
        self.cycle.buttons_mut().inputs_mut().1.pressed = pressed;
    }

    /// Press confirm until the debouncer accepts it, then release
    pub fn press_confirm(&mut self) -> Vec<Event> {
        self.set_confirm(true);
        let mut events = self.run(60);
        self.set_confirm(false);
        events.extend(self.run(60));
        events
    }

    /// Press cancel until the debouncer accepts it, then release
    pub fn press_cancel(&mut self) -> Vec<Event> {
        self.set_cancel(true);
        let mut events = self.run(60);
        self.set_cancel(false);
        events.extend(self.run(60));
        events
    }

    pub fn heater_on(&self) -> bool {
        self.cycle.griddle().is_commanded()
    }
}
