//! Step-rate planner for acceleration/deceleration profiles
//!
//! Produces a trapezoidal (or triangular, for short moves) velocity profile
//! in integer math, one step at a time. The driver asks for the interval
//! until the next step, emits the pulse when it is due, and reports it back
//! with [`StepPlanner::on_step`].

use crate::config::{AxisConfig, AXIS_ACCEL_LIMIT, AXIS_SPEED_LIMIT};

use super::Direction;

/// Fixed-point scale for step rates (milli-steps per second)
const RATE_SCALE: u64 = 1000;

/// Current motion state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MotionState {
    /// At target, no pulses pending
    Stopped,
    /// Ramping toward max speed
    Accelerating,
    /// At max speed
    AtSpeed,
    /// Braking toward the target
    Decelerating,
}

/// Trapezoidal step planner for one axis
#[derive(Debug, Clone)]
pub struct StepPlanner {
    /// Current position in steps
    position: i32,
    /// Target position in steps
    target: i32,
    /// Current step rate (steps/s × 1000)
    rate_x1000: u64,
    /// Maximum step rate (steps/s)
    max_speed_sps: u32,
    /// Acceleration (steps/s²)
    accel_sps2: u32,
    /// Rate of the first step of a move (steps/s)
    start_speed_sps: u32,
    /// Current motion state
    state: MotionState,
}

impl StepPlanner {
    /// Create a planner at position zero
    pub fn new(max_speed_sps: u32, accel_sps2: u32) -> Self {
        let max_speed_sps = max_speed_sps.clamp(1, AXIS_SPEED_LIMIT);
        let accel_sps2 = accel_sps2.clamp(1, AXIS_ACCEL_LIMIT);
        // Speed reached after a single step from standstill: v = sqrt(2a)
        let start_speed_sps = isqrt(2 * accel_sps2 as u64).clamp(1, max_speed_sps as u64) as u32;

        Self {
            position: 0,
            target: 0,
            rate_x1000: 0,
            max_speed_sps,
            accel_sps2,
            start_speed_sps,
            state: MotionState::Stopped,
        }
    }

    /// Create a planner from an axis configuration
    pub fn from_config(config: &AxisConfig) -> Self {
        Self::new(config.max_speed_sps, config.accel_sps2)
    }

    /// Set an absolute target position
    ///
    /// Reversing mid-move restarts the ramp from the start speed.
    pub fn set_target(&mut self, target: i32) {
        let reversing = match (self.direction(), direction_between(self.position, target)) {
            (Some(current), Some(next)) => current != next,
            _ => false,
        };

        self.target = target;

        if self.position == target {
            self.halt();
            return;
        }

        if self.rate_x1000 == 0 || reversing {
            self.rate_x1000 = self.start_speed_sps as u64 * RATE_SCALE;
        }
        self.update_state();
    }

    /// Drop back to the start speed, keeping the target
    ///
    /// Used when steps could not be emitted on time: a motor that stood
    /// still has to ramp up again.
    pub fn restart_ramp(&mut self) {
        if !self.is_moving() {
            return;
        }
        self.rate_x1000 = self.start_speed_sps as u64 * RATE_SCALE;
        self.update_state();
    }

    /// Stop immediately, keeping the current position
    pub fn stop(&mut self) {
        self.target = self.position;
        self.halt();
    }

    /// Get the current position
    pub fn position(&self) -> i32 {
        self.position
    }

    /// Get the target position
    pub fn target(&self) -> i32 {
        self.target
    }

    /// Get the current motion state
    pub fn state(&self) -> MotionState {
        self.state
    }

    /// Check if steps are still pending
    pub fn is_moving(&self) -> bool {
        self.position != self.target
    }

    /// Get the current step rate in whole steps/s
    pub fn speed_sps(&self) -> u32 {
        (self.rate_x1000 / RATE_SCALE) as u32
    }

    /// Direction of the next step, if any
    pub fn direction(&self) -> Option<Direction> {
        direction_between(self.position, self.target)
    }

    /// Steps left until the target
    pub fn remaining(&self) -> u32 {
        self.position.abs_diff(self.target)
    }

    /// Microseconds between the previous step and the next one
    ///
    /// Returns `None` when the axis is at its target.
    pub fn step_interval_us(&self) -> Option<u32> {
        if !self.is_moving() || self.rate_x1000 == 0 {
            return None;
        }
        Some((1_000_000 * RATE_SCALE / self.rate_x1000) as u32)
    }

    /// Record that one step was emitted toward the target
    ///
    /// Returns the new position.
    pub fn on_step(&mut self) -> i32 {
        let Some(dir) = self.direction() else {
            return self.position;
        };

        self.position += dir.delta();

        if !self.is_moving() {
            self.halt();
            return self.position;
        }

        // One step at rate v takes 1/v seconds, so the rate changes by a/v
        let delta_x1000 =
            (self.accel_sps2 as u64 * RATE_SCALE * RATE_SCALE / self.rate_x1000.max(1)).max(1);
        let max_x1000 = self.max_speed_sps as u64 * RATE_SCALE;
        let min_x1000 = self.start_speed_sps as u64 * RATE_SCALE;

        if self.remaining() as u64 <= self.braking_distance() {
            self.rate_x1000 = self.rate_x1000.saturating_sub(delta_x1000).max(min_x1000);
        } else {
            self.rate_x1000 = (self.rate_x1000 + delta_x1000).min(max_x1000);
        }

        self.update_state();
        self.position
    }

    /// Steps needed to brake from the current rate: v² / 2a
    fn braking_distance(&self) -> u64 {
        self.rate_x1000 * self.rate_x1000 / (2 * self.accel_sps2 as u64 * RATE_SCALE * RATE_SCALE)
    }

    fn halt(&mut self) {
        self.rate_x1000 = 0;
        self.state = MotionState::Stopped;
    }

    fn update_state(&mut self) {
        let max_x1000 = self.max_speed_sps as u64 * RATE_SCALE;

        self.state = if !self.is_moving() {
            MotionState::Stopped
        } else if self.remaining() as u64 <= self.braking_distance() {
            MotionState::Decelerating
        } else if self.rate_x1000 >= max_x1000 {
            MotionState::AtSpeed
        } else {
            MotionState::Accelerating
        };
    }
}

fn direction_between(from: i32, to: i32) -> Option<Direction> {
    match to.cmp(&from) {
        core::cmp::Ordering::Greater => Some(Direction::Forward),
        core::cmp::Ordering::Less => Some(Direction::Reverse),
        core::cmp::Ordering::Equal => None,
    }
}

/// Integer square root (floor)
fn isqrt(n: u64) -> u64 {
    if n < 2 {
        return n;
    }
    let mut x = n;
    let mut y = (x + 1) / 2;
    while y < x {
        x = y;
        y = (x + n / x) / 2;
    }
    x
}
