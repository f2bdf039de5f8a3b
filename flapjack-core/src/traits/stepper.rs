//! Stepper axis trait
//!
//! This trait abstracts over step/direction/enable stepper channels
//! (A4988, DRV8825, TMC2209 in step/dir mode, or a simulation).

/// Errors that can occur with stepper operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StepperError {
    /// Failed to drive a step, direction, or enable line
    CommunicationError,
    /// Motor stall detected
    StallDetected,
}

/// Trait for one position-controlled stepper channel
///
/// Motion is non-blocking: `move_to` only records the target and
/// `update` emits at most the steps that are due at the given time.
pub trait StepperAxis {
    /// Move to an absolute position in steps
    ///
    /// Enables the driver if it is disabled. The driver stays enabled after
    /// the target is reached; the caller decides when to disable it.
    fn move_to(&mut self, target: i32) -> Result<(), StepperError>;

    /// Halt pulse emission immediately, keeping the position estimate
    fn stop(&mut self);

    /// De-energize the driver
    ///
    /// Also stops any move in progress. A disabled axis never changes
    /// position.
    fn disable(&mut self);

    /// Check if the driver is energized
    fn is_enabled(&self) -> bool;

    /// Current position estimate in steps
    fn position(&self) -> i32;

    /// Check if steps are still pending
    fn is_moving(&self) -> bool;

    /// Emit the step pulses due at `now_us`
    fn update(&mut self, now_us: u64);

    /// Latched driver fault, if any
    fn fault(&self) -> Option<StepperError>;

    /// Clear a latched fault
    fn clear_fault(&mut self);

    /// Check if the axis has reached a target and is idle
    fn is_at(&self, target: i32) -> bool {
        !self.is_moving() && self.position() == target
    }
}
