//! Hardware configuration types
//!
//! These types define the hardware-level configuration for pins,
//! stepper axes, and the step targets used by the cook cycle.

use super::ConfigError;
use crate::motion::{AxisId, DispenserPosition};

/// Step pulse rate ceiling shared by all axes (steps/second)
pub const MAX_STEP_RATE: u32 = 800;

/// Conveyor step pulse rate (steps/second)
pub const CONVEYOR_STEP_RATE: u32 = 800;

/// Dispenser step pulse rate (steps/second)
pub const DISPENSER_SPEED: u32 = 800;

/// Dispenser acceleration (steps/second²)
pub const DISPENSER_ACCEL: u32 = 400;

/// Acceleration for axes without a dedicated value (steps/second²)
pub const DEFAULT_ACCEL: u32 = 400;

/// Highest step rate an axis may be configured with (steps/second)
///
/// Keeps the planner's fixed-point rate squared inside `u64`.
pub const AXIS_SPEED_LIMIT: u32 = 100_000;

/// Highest acceleration an axis may be configured with (steps/second²)
pub const AXIS_ACCEL_LIMIT: u32 = 1_000_000;

/// Pin configuration with optional inversion
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinConfig {
    /// GPIO pin number
    pub pin: u8,
    /// Pin is active-low (inverted)
    pub inverted: bool,
    /// Enable internal pull-up
    pub pull_up: bool,
}

impl PinConfig {
    /// Create a new pin config
    pub const fn new(pin: u8) -> Self {
        Self {
            pin,
            inverted: false,
            pull_up: false,
        }
    }

    /// Create an inverted (active-low) pin
    pub const fn inverted(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: false,
        }
    }

    /// Create an active-low input with pull-up enabled (button to ground)
    pub const fn button(pin: u8) -> Self {
        Self {
            pin,
            inverted: true,
            pull_up: true,
        }
    }
}

/// Step/direction/enable pins of one stepper driver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StepperPins {
    /// Step pulse pin
    pub step: PinConfig,
    /// Direction pin
    pub dir: PinConfig,
    /// Enable pin (active-low on A4988/DRV8825 style drivers)
    pub enable: PinConfig,
}

impl StepperPins {
    /// Create a pin set with an active-low enable line
    pub const fn new(step: u8, dir: u8, enable: u8) -> Self {
        Self {
            step: PinConfig::new(step),
            dir: PinConfig::new(dir),
            enable: PinConfig::inverted(enable),
        }
    }
}

/// Complete pin assignment
///
/// The defaults reproduce the original wiring of the machine. Pin numbers
/// are configuration only; the cook cycle never looks at them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PinMap {
    /// Confirm push button
    pub confirm: PinConfig,
    /// Cancel push button
    pub cancel: PinConfig,
    /// Status LED strip data line
    pub led: PinConfig,
    /// Solid-state relay feeding the griddle
    pub griddle: PinConfig,
    /// Conveyor stepper driver
    pub conveyor: StepperPins,
    /// Dispenser stepper driver
    pub dispenser: StepperPins,
    /// Cooling stepper driver
    pub cooling: StepperPins,
    /// LCD backpack I2C data
    pub lcd_sda: PinConfig,
    /// LCD backpack I2C clock
    pub lcd_scl: PinConfig,
}

impl Default for PinMap {
    fn default() -> Self {
        Self::new()
    }
}

impl PinMap {
    /// Original wiring
    pub const fn new() -> Self {
        Self {
            confirm: PinConfig::button(7),
            cancel: PinConfig::button(2),
            led: PinConfig::new(6),
            griddle: PinConfig::new(8),
            conveyor: StepperPins::new(22, 26, 24),
            dispenser: StepperPins::new(35, 37, 33),
            cooling: StepperPins::new(25, 23, 27),
            lcd_sda: PinConfig::new(20),
            lcd_scl: PinConfig::new(21),
        }
    }

    /// Get the stepper pins for an axis
    pub fn stepper(&self, axis: AxisId) -> &StepperPins {
        match axis {
            AxisId::Conveyor => &self.conveyor,
            AxisId::Dispenser => &self.dispenser,
            AxisId::Cooling => &self.cooling,
        }
    }

    /// All assigned pins in a fixed order
    pub fn all(&self) -> [PinConfig; 15] {
        [
            self.confirm,
            self.cancel,
            self.led,
            self.griddle,
            self.conveyor.step,
            self.conveyor.dir,
            self.conveyor.enable,
            self.dispenser.step,
            self.dispenser.dir,
            self.dispenser.enable,
            self.cooling.step,
            self.cooling.dir,
            self.cooling.enable,
            self.lcd_sda,
            self.lcd_scl,
        ]
    }

    /// Reject maps that drive one pin from two signals
    pub fn validate(&self) -> Result<(), ConfigError> {
        let pins = self.all();
        for (i, a) in pins.iter().enumerate() {
            if pins[i + 1..].iter().any(|b| b.pin == a.pin) {
                return Err(ConfigError::PinConflict(a.pin));
            }
        }
        Ok(())
    }
}

/// Stepper axis motion limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct AxisConfig {
    /// Maximum step rate (steps/second)
    pub max_speed_sps: u32,
    /// Acceleration (steps/second²)
    pub accel_sps2: u32,
    /// Swap the meaning of the direction pin levels
    pub invert_direction: bool,
}

impl AxisConfig {
    /// Create an axis config with normal direction polarity
    pub const fn new(max_speed_sps: u32, accel_sps2: u32) -> Self {
        Self {
            max_speed_sps,
            accel_sps2,
            invert_direction: false,
        }
    }
}

/// Step targets for each phase of the cook cycle
///
/// Motors are usually 1.8°/step, 200 steps per revolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MotionConfig {
    /// Absolute dispenser position with the valve open
    pub dispenser_open_steps: i32,
    /// Absolute dispenser position with the valve closed
    pub dispenser_closed_steps: i32,
    /// Conveyor travel from the dispenser to the middle of the griddle
    pub cook_zone_steps: i32,
    /// Conveyor travel from the griddle to the output tray
    pub output_steps: i32,
    /// Cooling fan travel per ready period
    pub cooling_steps: i32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MotionConfig {
    /// Default step targets
    pub const fn new() -> Self {
        Self {
            dispenser_open_steps: 50, // Quarter turn
            dispenser_closed_steps: 0,
            cook_zone_steps: 1600,
            output_steps: 1600,
            cooling_steps: 1600,
        }
    }

    /// Absolute step target for a dispenser position
    pub fn dispenser_target(&self, position: DispenserPosition) -> i32 {
        match position {
            DispenserPosition::Open => self.dispenser_open_steps,
            DispenserPosition::Closed => self.dispenser_closed_steps,
        }
    }
}
