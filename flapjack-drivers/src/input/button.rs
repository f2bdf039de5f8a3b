//! Push-button on a GPIO input

use embedded_hal::digital::InputPin;
use flapjack_core::traits::ButtonInput;

/// Push-button on a GPIO input
///
/// The machine's buttons switch to ground with the pin's pull-up enabled,
/// so pressed reads low. A pin that cannot be read counts as released.
pub struct GpioButton<P> {
    pin: P,
    active_low: bool,
}

impl<P: InputPin> GpioButton<P> {
    /// Button wired to ground with a pull-up
    pub fn active_low(pin: P) -> Self {
        Self {
            pin,
            active_low: true,
        }
    }

    /// Button wired to the supply with a pull-down
    pub fn active_high(pin: P) -> Self {
        Self {
            pin,
            active_low: false,
        }
    }
}

impl<P: InputPin> ButtonInput for GpioButton<P> {
    fn is_pressed(&mut self) -> bool {
        let level = if self.active_low {
            self.pin.is_low()
        } else {
            self.pin.is_high()
        };
        level.unwrap_or(false)
    }
}
