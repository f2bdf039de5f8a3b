//! GPIO heater output
//!
//! Griddle relay or SSR switched by a GPIO pin.

use embedded_hal::digital::OutputPin;
use flapjack_core::traits::HeaterOutput;

/// GPIO heater output
///
/// Controls a heater via a GPIO pin. The pin can be configured as
/// active-high (default) or active-low. The reported state only changes
/// when a pin write succeeds, so a failed switch is visible to readiness
/// checks.
pub struct GpioHeater<P> {
    pin: P,
    /// If true, heater ON = pin LOW
    inverted: bool,
    /// State last applied to the pin (true = heater on)
    on: bool,
    /// Pin writes that returned an error
    write_errors: u32,
}

impl<P: OutputPin> GpioHeater<P> {
    /// Create a new GPIO heater output, switched off
    ///
    /// # Arguments
    /// - `pin`: The GPIO pin to control
    /// - `inverted`: If true, heater is ON when pin is LOW (for active-low relays)
    pub fn new(pin: P, inverted: bool) -> Self {
        let mut heater = Self {
            pin,
            inverted,
            on: false,
            write_errors: 0,
        };
        // Ensure heater starts off
        heater.set_on(false);
        heater
    }

    /// Create a new GPIO heater with active-high output
    pub fn new_active_high(pin: P) -> Self {
        Self::new(pin, false)
    }

    /// Create a new GPIO heater with active-low output
    pub fn new_active_low(pin: P) -> Self {
        Self::new(pin, true)
    }

    /// Pin writes that failed since creation
    pub fn write_errors(&self) -> u32 {
        self.write_errors
    }

    /// Get access to the pin
    pub fn pin(&self) -> &P {
        &self.pin
    }
}

impl<P: OutputPin> HeaterOutput for GpioHeater<P> {
    fn set_on(&mut self, on: bool) {
        // Normal: on=true, inverted=false → high
        // Inverted: on=true, inverted=true → low
        let result = if on != self.inverted {
            self.pin.set_high()
        } else {
            self.pin.set_low()
        };

        match result {
            Ok(()) => self.on = on,
            Err(_) => {
                self.write_errors = self.write_errors.saturating_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("heater pin write failed (on={})", on);
            }
        }
    }

    fn is_on(&self) -> bool {
        self.on
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::digital::{ErrorKind, ErrorType};

    /// Mock GPIO pin for testing
    struct MockPin {
        high: bool,
        broken: bool,
    }

    impl MockPin {
        fn new() -> Self {
            Self {
                high: false,
                broken: false,
            }
        }
    }

    impl ErrorType for MockPin {
        type Error = ErrorKind;
    }

    impl OutputPin for MockPin {
        fn set_high(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = true;
            Ok(())
        }

        fn set_low(&mut self) -> Result<(), Self::Error> {
            if self.broken {
                return Err(ErrorKind::Other);
            }
            self.high = false;
            Ok(())
        }
    }

    #[test]
    fn test_active_high_heater() {
        let mut heater = GpioHeater::new_active_high(MockPin::new());

        // Initially off
        assert!(!heater.is_on());
        assert!(!heater.pin().high);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(heater.pin().high);

        heater.set_on(false);
        assert!(!heater.is_on());
        assert!(!heater.pin().high);
    }

    #[test]
    fn test_active_low_heater() {
        let mut heater = GpioHeater::new_active_low(MockPin::new());

        // Initially off (pin is high for active-low)
        assert!(!heater.is_on());
        assert!(heater.pin().high);

        heater.set_on(true);
        assert!(heater.is_on());
        assert!(!heater.pin().high);
    }

    #[test]
    fn test_failed_write_keeps_state() {
        let mut pin = MockPin::new();
        pin.broken = true;
        let mut heater = GpioHeater::new_active_high(pin);
        assert_eq!(heater.write_errors(), 1);

        heater.set_on(true);
        assert_eq!(heater.write_errors(), 2);
        // The relay never switched, so it must not read back as on
        assert!(!heater.is_on());
    }
}
