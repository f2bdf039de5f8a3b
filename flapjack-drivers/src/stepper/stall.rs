//! Stall detection inputs

use embedded_hal::digital::InputPin;
use flapjack_core::traits::StepperError;

/// Source of stall reports for a stepper channel
pub trait StallInput {
    /// Sample the input; `Some` means the axis must stop
    fn check(&mut self) -> Option<StepperError>;
}

/// Axis without stall detection
#[derive(Debug, Default, Clone, Copy)]
pub struct NoStallGuard;

impl StallInput for NoStallGuard {
    fn check(&mut self) -> Option<StepperError> {
        None
    }
}

/// Driver DIAG output (TMC2209 StallGuard, or any open-drain fault line)
///
/// High means stalled. A pin that cannot be read reports a
/// communication error.
pub struct DiagPin<P> {
    pin: P,
}

impl<P: InputPin> DiagPin<P> {
    /// Wrap a DIAG input
    pub fn new(pin: P) -> Self {
        Self { pin }
    }
}

impl<P: InputPin> StallInput for DiagPin<P> {
    fn check(&mut self) -> Option<StepperError> {
        match self.pin.is_high() {
            Ok(true) => Some(StepperError::StallDetected),
            Ok(false) => None,
            Err(_) => Some(StepperError::CommunicationError),
        }
    }
}
