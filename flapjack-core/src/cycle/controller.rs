//! Cook cycle controller
//!
//! Owns every actuator and input and is the only place where status changes
//! turn into hardware commands:
//! - Polls the buttons and turns press edges into events
//! - Feeds the safety monitor and acts on the faults it reports
//! - Detects the time and position conditions that end each phase
//! - Applies the entry and exit side effects of each status

use crate::config::{ConfigError, MachineConfig};
use crate::heater::Griddle;
use crate::input::{ButtonEvents, Buttons};
use crate::motion::AxisId;
use crate::safety::{SafetyMonitor, SafetyStatus};
use crate::state::{Event, FaultKind, Status};
use crate::timer::CycleTimer;
use crate::traits::{ButtonInput, HeaterOutput, StepperAxis};

use super::dispense::{DispensePhase, DispenseSequence};
use super::view::StatusView;

/// The three stepper channels of the machine
pub struct Axes<A> {
    /// Belt from the dispenser over the griddle to the output tray
    pub conveyor: A,
    /// Batter valve
    pub dispenser: A,
    /// Cooling fan
    pub cooling: A,
}

impl<A: StepperAxis> Axes<A> {
    /// Group the three axes
    pub fn new(conveyor: A, dispenser: A, cooling: A) -> Self {
        Self {
            conveyor,
            dispenser,
            cooling,
        }
    }

    /// Get an axis by id
    pub fn get(&self, axis: AxisId) -> &A {
        match axis {
            AxisId::Conveyor => &self.conveyor,
            AxisId::Dispenser => &self.dispenser,
            AxisId::Cooling => &self.cooling,
        }
    }

    /// Get an axis by id, mutably
    pub fn get_mut(&mut self, axis: AxisId) -> &mut A {
        match axis {
            AxisId::Conveyor => &mut self.conveyor,
            AxisId::Dispenser => &mut self.dispenser,
            AxisId::Cooling => &mut self.cooling,
        }
    }

    /// Stop and de-energize every axis
    pub fn disable_all(&mut self) {
        for axis in AxisId::ALL {
            self.get_mut(axis).disable();
        }
    }
}

/// Cook cycle state and the hardware it commands
pub struct CookCycle<H, A, B> {
    /// Validated configuration, fixed after construction
    config: MachineConfig,
    /// Current status
    status: Status,
    /// When the current status was entered
    status_since_ms: u32,
    /// Griddle relay
    griddle: Griddle<H>,
    /// Stepper channels
    axes: Axes<A>,
    /// Confirm and cancel buttons
    buttons: Buttons<B>,
    /// Fault detection
    safety: SafetyMonitor,
    /// Valve open/dwell/close sequence
    dispense: DispenseSequence,
    /// Conveyor position when the current cycle was requested
    origin: i32,
    /// Running while `Baking`
    cook_timer: Option<CycleTimer>,
    /// Running while `Ready`
    pickup_timer: Option<CycleTimer>,
    /// Running while `Cancelled`
    kill_timer: Option<CycleTimer>,
    /// Most recent fault
    last_fault: Option<FaultKind>,
    /// Cycles that reached `Ready`
    completed: u32,
}

impl<H, A, B> CookCycle<H, A, B>
where
    H: HeaterOutput,
    A: StepperAxis,
    B: ButtonInput,
{
    /// Create the cook cycle in `Empty` with the heater off and axes released
    pub fn new(
        config: MachineConfig,
        heater: H,
        mut axes: Axes<A>,
        confirm: B,
        cancel: B,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        axes.disable_all();

        Ok(Self {
            status: Status::Empty,
            status_since_ms: 0,
            griddle: Griddle::new(heater, &config.timing),
            axes,
            buttons: Buttons::new(confirm, cancel, config.timing.debounce_ms),
            safety: SafetyMonitor::new(),
            dispense: DispenseSequence::new(&config.motion, config.timing.dispense_dwell_ms),
            origin: 0,
            cook_timer: None,
            pickup_timer: None,
            kill_timer: None,
            last_fault: None,
            completed: 0,
            config,
        })
    }

    /// Advance the cycle by one tick
    ///
    /// Returns the event that changed the status, if any. Faults are
    /// handled first, then buttons (cancel before confirm), then the
    /// completion condition of the current phase.
    pub fn tick(&mut self, now_ms: u32) -> Option<Event> {
        let buttons = self.buttons.poll(now_ms);
        self.refresh_safety(now_ms);

        if let SafetyStatus::Fault(kind) = self.safety.check(self.status) {
            let event = Event::Fault(kind);
            if self.apply(event, now_ms) {
                return Some(event);
            }
        }

        if let Some(event) = button_event(buttons) {
            if self.apply(event, now_ms) {
                return Some(event);
            }
        }

        let event = self.advance(now_ms)?;
        self.apply(event, now_ms).then_some(event)
    }

    /// Emit the step pulses due at `now_us` on every axis
    pub fn poll_motion(&mut self, now_us: u64) {
        for axis in AxisId::ALL {
            self.axes.get_mut(axis).update(now_us);
        }
    }

    /// Inject an event directly, bypassing the buttons
    ///
    /// Returns true if the status changed.
    pub fn handle_event(&mut self, event: Event, now_ms: u32) -> bool {
        self.apply(event, now_ms)
    }

    /// Snapshot for the display
    pub fn view(&self, now_ms: u32) -> StatusView {
        let (progress_permille, remaining_ms) = match self.status {
            Status::Empty => (0, 0),
            Status::Requested => {
                let elapsed = self.griddle.elapsed(now_ms).unwrap_or(0);
                (
                    self.griddle.heat_progress_permille(now_ms),
                    self.config.timing.heatup_ms.saturating_sub(elapsed),
                )
            }
            Status::Baking => timer_progress(self.cook_timer, now_ms),
            Status::Ready => timer_progress(self.pickup_timer, now_ms),
            Status::Cancelled => timer_progress(self.kill_timer, now_ms),
        };

        StatusView {
            status: self.status,
            progress_permille,
            seconds_left: remaining_ms.div_ceil(1000),
            heater_on: self.griddle.is_commanded(),
            heater_ready: self.griddle.is_ready(now_ms),
            griddle_cool: self.griddle.is_cool(now_ms),
            dispense: self.dispense.phase(),
            last_fault: self.last_fault,
        }
    }

    /// Get current status
    pub fn status(&self) -> Status {
        self.status
    }

    /// When the current status was entered
    pub fn status_since_ms(&self) -> u32 {
        self.status_since_ms
    }

    /// Get the configuration
    pub fn config(&self) -> &MachineConfig {
        &self.config
    }

    /// Get the griddle controller
    pub fn griddle(&self) -> &Griddle<H> {
        &self.griddle
    }

    /// Get the axes
    pub fn axes(&self) -> &Axes<A> {
        &self.axes
    }

    /// Get the axes mutably
    pub fn axes_mut(&mut self) -> &mut Axes<A> {
        &mut self.axes
    }

    /// Get the buttons mutably
    pub fn buttons_mut(&mut self) -> &mut Buttons<B> {
        &mut self.buttons
    }

    /// Get the safety monitor
    pub fn safety(&self) -> &SafetyMonitor {
        &self.safety
    }

    /// Dispense sequence progress
    pub fn dispense_phase(&self) -> DispensePhase {
        self.dispense.phase()
    }

    /// Most recent fault that forced a cancel, cleared by the next request
    pub fn last_fault(&self) -> Option<FaultKind> {
        self.last_fault
    }

    /// Cycles that reached `Ready` since power-up
    pub fn completed_cycles(&self) -> u32 {
        self.completed
    }

    /// Conveyor position when the current cycle was requested
    pub fn origin(&self) -> i32 {
        self.origin
    }

    /// Conveyor target with the batter in the middle of the griddle
    pub fn cook_zone_target(&self) -> i32 {
        self.origin.saturating_add(self.config.motion.cook_zone_steps)
    }

    /// Conveyor target with the pancake on the output tray
    pub fn output_target(&self) -> i32 {
        self.cook_zone_target().saturating_add(self.config.motion.output_steps)
    }

    fn refresh_safety(&mut self, now_ms: u32) {
        for axis in AxisId::ALL {
            if let Some(fault) = self.axes.get(axis).fault() {
                self.safety.report_axis(axis, fault);
            }
        }
        self.safety.update_heater(self.griddle.heatup_overdue(now_ms));
        self.safety
            .update_kill_timer(self.kill_timer.is_some_and(|t| t.is_expired(now_ms)));
    }

    /// Check the completion condition of the current phase
    fn advance(&mut self, now_ms: u32) -> Option<Event> {
        match self.status {
            Status::Empty => None,
            Status::Requested => {
                if let Err(err) = self.dispense.poll(&mut self.axes.dispenser, now_ms) {
                    self.safety.report_axis(AxisId::Dispenser, err);
                }
                let in_cook_zone = self.axes.conveyor.is_at(self.cook_zone_target());
                (self.griddle.is_ready(now_ms) && self.dispense.is_done() && in_cook_zone)
                    .then_some(Event::ReadyToBake)
            }
            Status::Baking => self
                .cook_timer
                .filter(|t| t.is_expired(now_ms))
                .map(|_| Event::CookTimeElapsed),
            Status::Ready => self
                .pickup_timer
                .filter(|t| t.is_expired(now_ms))
                .map(|_| Event::PickupTimeout),
            Status::Cancelled => {
                // Release the conveyor once the purge ends: back at the origin,
                // stopped short of it, or faulted on the way
                let conveyor = &mut self.axes.conveyor;
                let purge_over = conveyor.is_at(self.origin)
                    || !conveyor.is_moving()
                    || conveyor.fault().is_some();
                if conveyor.is_enabled() && purge_over {
                    conveyor.disable();
                }
                None
            }
        }
    }

    /// Run an event through the transition table and apply side effects
    fn apply(&mut self, event: Event, now_ms: u32) -> bool {
        if let Event::Fault(kind) = event {
            // The kill timeout ends every cancel; keep the fault that caused it
            if kind != FaultKind::StuckCancel {
                self.last_fault = Some(kind);
            }
            self.safety.record_fault();
            #[cfg(feature = "defmt")]
            defmt::warn!("fault {} in {}", kind, self.status);
        }

        let from = self.status;
        let to = from.transition(event);
        if to == from {
            return false;
        }

        self.exit(from);
        self.status = to;
        self.status_since_ms = now_ms;
        self.enter(to, event, now_ms);

        #[cfg(feature = "defmt")]
        defmt::info!("{} -> {} on {}", from, to, event);

        true
    }

    fn exit(&mut self, status: Status) {
        match status {
            Status::Baking => self.cook_timer = None,
            Status::Ready => {
                self.pickup_timer = None;
                self.axes.cooling.disable();
            }
            Status::Cancelled => self.kill_timer = None,
            Status::Empty | Status::Requested => {}
        }
    }

    fn enter(&mut self, status: Status, cause: Event, now_ms: u32) {
        match status {
            Status::Empty => {
                self.griddle.command_off(now_ms);
                self.dispense.abort();
                self.axes.disable_all();
                for axis in AxisId::ALL {
                    self.axes.get_mut(axis).clear_fault();
                }
                self.safety.reset();
            }
            Status::Requested => {
                self.last_fault = None;
                self.origin = self.axes.conveyor.position();
                self.griddle.command_on(now_ms);
                if let Err(err) = self.dispense.start(&mut self.axes.dispenser) {
                    self.safety.report_axis(AxisId::Dispenser, err);
                }
                self.move_axis(AxisId::Conveyor, self.cook_zone_target());
            }
            Status::Baking => {
                self.cook_timer = Some(CycleTimer::start(now_ms, self.config.timing.cook_time_ms));
            }
            Status::Ready => {
                self.griddle.command_off(now_ms);
                self.completed = self.completed.wrapping_add(1);
                self.move_axis(AxisId::Conveyor, self.output_target());
                let cooling = self
                    .axes
                    .cooling
                    .position()
                    .saturating_add(self.config.motion.cooling_steps);
                self.move_axis(AxisId::Cooling, cooling);
                self.pickup_timer = Some(CycleTimer::start(
                    now_ms,
                    self.config.timing.pickup_timeout_ms,
                ));
            }
            Status::Cancelled => {
                self.griddle.command_off(now_ms);
                self.dispense.abort();
                self.axes.dispenser.disable();
                self.axes.cooling.disable();
                if matches!(cause, Event::Fault(FaultKind::MotorStall(_))) {
                    self.axes.conveyor.disable();
                } else {
                    self.move_axis(AxisId::Conveyor, self.origin);
                }
                self.kill_timer = Some(CycleTimer::start(
                    now_ms,
                    self.config.timing.kill_timeout_ms,
                ));
            }
        }
    }

    /// Command a move; a refused move is latched as a fault of that axis
    fn move_axis(&mut self, axis: AxisId, target: i32) {
        if let Err(err) = self.axes.get_mut(axis).move_to(target) {
            self.safety.report_axis(axis, err);
        }
    }
}

/// Cancel wins over confirm when both are pressed in the same tick
fn button_event(buttons: ButtonEvents) -> Option<Event> {
    if buttons.cancel {
        Some(Event::Cancel)
    } else if buttons.confirm {
        Some(Event::Confirm)
    } else {
        None
    }
}

fn timer_progress(timer: Option<CycleTimer>, now_ms: u32) -> (u16, u32) {
    timer.map_or((0, 0), |t| (t.progress_permille(now_ms), t.remaining(now_ms)))
}
