//! Batter dispense sequence: open, dwell, close

use crate::config::MotionConfig;
use crate::motion::DispenserPosition;
use crate::timer::CycleTimer;
use crate::traits::{StepperAxis, StepperError};

/// Progress of the dispense sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DispensePhase {
    /// Not started or aborted
    #[default]
    Idle,
    /// Valve travelling to `Open`
    Opening,
    /// Valve open, batter flowing
    Holding,
    /// Valve travelling back to `Closed`
    Closing,
    /// Valve closed and driver released
    Done,
}

/// Non-blocking dispense sequence driven from the cook cycle tick
#[derive(Debug, Clone)]
pub struct DispenseSequence {
    phase: DispensePhase,
    dwell: Option<CycleTimer>,
    dwell_ms: u32,
    open_target: i32,
    closed_target: i32,
}

impl DispenseSequence {
    /// Create an idle sequence
    pub fn new(motion: &MotionConfig, dwell_ms: u32) -> Self {
        Self {
            phase: DispensePhase::Idle,
            dwell: None,
            dwell_ms,
            open_target: motion.dispenser_target(DispenserPosition::Open),
            closed_target: motion.dispenser_target(DispenserPosition::Closed),
        }
    }

    /// Current phase
    pub fn phase(&self) -> DispensePhase {
        self.phase
    }

    /// Check if the valve is closed again after dispensing
    pub fn is_done(&self) -> bool {
        self.phase == DispensePhase::Done
    }

    /// Start opening the valve
    pub fn start<A: StepperAxis>(&mut self, axis: &mut A) -> Result<(), StepperError> {
        self.dwell = None;
        self.phase = DispensePhase::Opening;
        axis.move_to(self.open_target)
    }

    /// Advance the sequence
    pub fn poll<A: StepperAxis>(&mut self, axis: &mut A, now_ms: u32) -> Result<(), StepperError> {
        match self.phase {
            DispensePhase::Opening if axis.is_at(self.open_target) => {
                self.dwell = Some(CycleTimer::start(now_ms, self.dwell_ms));
                self.phase = DispensePhase::Holding;
            }
            DispensePhase::Holding => {
                if self.dwell.map_or(true, |dwell| dwell.is_expired(now_ms)) {
                    self.dwell = None;
                    self.phase = DispensePhase::Closing;
                    axis.move_to(self.closed_target)?;
                }
            }
            DispensePhase::Closing if axis.is_at(self.closed_target) => {
                axis.disable();
                self.phase = DispensePhase::Done;
            }
            _ => {}
        }
        Ok(())
    }

    /// Forget the sequence; the caller stops the axis
    pub fn abort(&mut self) {
        self.dwell = None;
        self.phase = DispensePhase::Idle;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Axis that reaches its target on the next update
    struct JumpAxis {
        position: i32,
        target: i32,
        enabled: bool,
        fail: bool,
    }

    impl JumpAxis {
        fn new() -> Self {
            Self {
                position: 0,
                target: 0,
                enabled: false,
                fail: false,
            }
        }
    }

    impl StepperAxis for JumpAxis {
        fn move_to(&mut self, target: i32) -> Result<(), StepperError> {
            if self.fail {
                return Err(StepperError::CommunicationError);
            }
            self.enabled = true;
            self.target = target;
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
            if self.enabled {
                self.position = self.target;
            }
        }

        fn fault(&self) -> Option<StepperError> {
            None
        }

        fn clear_fault(&mut self) {}
    }

    fn sequence() -> DispenseSequence {
        DispenseSequence::new(&MotionConfig::new(), 500)
    }

    #[test]
    fn test_full_sequence() {
        let mut seq = sequence();
        let mut axis = JumpAxis::new();
        assert_eq!(seq.phase(), DispensePhase::Idle);

        seq.start(&mut axis).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Opening);
        assert_eq!(axis.target, 50);

        // Still travelling
        seq.poll(&mut axis, 0).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Opening);

        axis.update(0);
        seq.poll(&mut axis, 100).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Holding);

        seq.poll(&mut axis, 599).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Holding);
        seq.poll(&mut axis, 600).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Closing);
        assert_eq!(axis.target, 0);

        axis.update(0);
        seq.poll(&mut axis, 700).unwrap();
        assert!(seq.is_done());
        assert!(!axis.is_enabled());
    }

    #[test]
    fn test_start_error_propagates() {
        let mut seq = sequence();
        let mut axis = JumpAxis::new();
        axis.fail = true;
        assert_eq!(seq.start(&mut axis), Err(StepperError::CommunicationError));
    }

    #[test]
    fn test_abort_returns_to_idle() {
        let mut seq = sequence();
        let mut axis = JumpAxis::new();
        seq.start(&mut axis).unwrap();
        seq.abort();
        assert_eq!(seq.phase(), DispensePhase::Idle);

        // Idle ignores polls
        axis.update(0);
        seq.poll(&mut axis, 1000).unwrap();
        assert_eq!(seq.phase(), DispensePhase::Idle);
    }
}
