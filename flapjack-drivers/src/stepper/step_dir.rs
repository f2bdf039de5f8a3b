//! Step/direction/enable stepper channel
//!
//! Works with any driver that takes a STEP pulse train, a DIR level and an
//! EN line (A4988, DRV8825, TMC2209 in standalone mode). Pulses are
//! generated by polling [`StepperAxis::update`]: a due step raises STEP and
//! the following call lowers it, so the pulse width is one poll period and
//! nothing ever busy-waits.

use embedded_hal::digital::OutputPin;
use flapjack_core::config::AxisConfig;
use flapjack_core::motion::{Direction, StepPlanner};
use flapjack_core::traits::{StepperAxis, StepperError};

use super::stall::StallInput;

/// One stepper channel driven through GPIO pins
pub struct StepDirAxis<STEP, DIR, EN, S> {
    step: STEP,
    dir: DIR,
    enable: EN,
    stall: S,
    planner: StepPlanner,
    /// DIR high means reverse
    invert_direction: bool,
    /// EN low energizes the driver
    enable_active_low: bool,
    enabled: bool,
    /// Direction currently on the DIR pin
    dir_level: Option<Direction>,
    /// STEP is high and must be lowered on the next poll
    step_high: bool,
    /// Time of the previous step of the current move
    last_step_us: Option<u64>,
    fault: Option<StepperError>,
}

impl<STEP, DIR, EN, S> StepDirAxis<STEP, DIR, EN, S>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    S: StallInput,
{
    /// Create a channel with the driver de-energized
    ///
    /// # Arguments
    /// - `config`: speed, acceleration and direction polarity
    /// - `enable_active_low`: true for the common A4988/DRV8825 wiring
    pub fn new(
        step: STEP,
        dir: DIR,
        enable: EN,
        stall: S,
        config: &AxisConfig,
        enable_active_low: bool,
    ) -> Self {
        let mut axis = Self {
            step,
            dir,
            enable,
            stall,
            planner: StepPlanner::from_config(config),
            invert_direction: config.invert_direction,
            enable_active_low,
            enabled: true,
            dir_level: None,
            step_high: false,
            last_step_us: None,
            fault: None,
        };
        axis.write_step(false);
        axis.disable();
        axis
    }

    /// Get the planner (speed and ramp state)
    pub fn planner(&self) -> &StepPlanner {
        &self.planner
    }

    /// Get the step, direction and enable pins
    pub fn pins(&self) -> (&STEP, &DIR, &EN) {
        (&self.step, &self.dir, &self.enable)
    }

    fn latch(&mut self, fault: StepperError) {
        if self.fault.is_none() {
            #[cfg(feature = "defmt")]
            defmt::warn!("stepper fault latched: {}", fault);
            self.fault = Some(fault);
        }
        self.planner.stop();
    }

    fn write_step(&mut self, high: bool) -> bool {
        let result = if high {
            self.step.set_high()
        } else {
            self.step.set_low()
        };
        self.check_write(result)
    }

    fn write_enable(&mut self, energize: bool) -> bool {
        let result = if energize != self.enable_active_low {
            self.enable.set_high()
        } else {
            self.enable.set_low()
        };
        self.check_write(result)
    }

    fn write_dir(&mut self, direction: Direction) -> bool {
        let high = (direction == Direction::Reverse) != self.invert_direction;
        let result = if high {
            self.dir.set_high()
        } else {
            self.dir.set_low()
        };
        self.check_write(result)
    }

    fn check_write<E>(&mut self, result: Result<(), E>) -> bool {
        match result {
            Ok(()) => true,
            Err(_) => {
                self.latch(StepperError::CommunicationError);
                false
            }
        }
    }
}

impl<STEP, DIR, EN, S> StepperAxis for StepDirAxis<STEP, DIR, EN, S>
where
    STEP: OutputPin,
    DIR: OutputPin,
    EN: OutputPin,
    S: StallInput,
{
    fn move_to(&mut self, target: i32) -> Result<(), StepperError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        if !self.enabled {
            if !self.write_enable(true) {
                return Err(StepperError::CommunicationError);
            }
            self.enabled = true;
        }
        self.planner.set_target(target);
        Ok(())
    }

    fn stop(&mut self) {
        self.planner.stop();
        self.last_step_us = None;
    }

    fn disable(&mut self) {
        self.stop();
        if self.step_high && self.write_step(false) {
            self.step_high = false;
        }
        if self.write_enable(false) {
            self.enabled = false;
        }
    }

    fn is_enabled(&self) -> bool {
        self.enabled
    }

    fn position(&self) -> i32 {
        self.planner.position()
    }

    fn is_moving(&self) -> bool {
        self.planner.is_moving()
    }

    fn update(&mut self, now_us: u64) {
        // Finish the pulse started on the previous poll
        if self.step_high {
            if !self.write_step(false) {
                return;
            }
            self.step_high = false;
        }

        if !self.enabled || self.fault.is_some() {
            return;
        }

        let Some(direction) = self.planner.direction() else {
            self.last_step_us = None;
            return;
        };

        if let Some(fault) = self.stall.check() {
            self.latch(fault);
            return;
        }

        // Give DIR one poll of setup time before the next pulse
        if self.dir_level != Some(direction) {
            if self.write_dir(direction) {
                self.dir_level = Some(direction);
            }
            return;
        }

        let Some(interval_us) = self.planner.step_interval_us() else {
            return;
        };
        if let Some(last) = self.last_step_us {
            let since = now_us.wrapping_sub(last);
            if since < interval_us as u64 {
                return;
            }
            // A whole interval went by without the due step: the motor
            // has slowed or stopped and must ramp up again
            if since >= 2 * interval_us as u64 {
                self.planner.restart_ramp();
            }
        }

        if self.write_step(true) {
            self.step_high = true;
            self.planner.on_step();
            self.last_step_us = Some(now_us);
        }
    }

    fn fault(&self) -> Option<StepperError> {
        self.fault
    }

    fn clear_fault(&mut self) {
        self.fault = None;
    }
}
