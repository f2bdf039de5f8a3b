//! Configuration types
//!
//! Board-agnostic configuration structures. A [`MachineConfig`] is built
//! once at startup, validated, and copied into the cook cycle; nothing
//! changes it afterwards.

pub mod hardware;
pub mod timing;

pub use hardware::*;
pub use timing::*;

use crate::motion::AxisId;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// The same physical pin is assigned to two signals
    PinConflict(u8),
    /// A duration that gates a state transition is zero
    ZeroDuration,
    /// An axis has a zero or out-of-range max speed or acceleration
    InvalidSpeed(AxisId),
    /// Dispenser open and closed targets are identical
    DispenserTravel,
    /// Conveyor travel to the cook zone is zero
    ConveyorTravel,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::PinConflict(pin) => write!(f, "pin {} assigned twice", pin),
            ConfigError::ZeroDuration => write!(f, "timing value must be non-zero"),
            ConfigError::InvalidSpeed(axis) => write!(f, "{:?} axis speed or acceleration out of range", axis),
            ConfigError::DispenserTravel => write!(f, "dispenser open and closed targets match"),
            ConfigError::ConveyorTravel => write!(f, "conveyor cook zone travel is zero"),
        }
    }
}

/// Complete machine configuration
///
/// This is the top-level configuration structure passed to the cook cycle
/// and its collaborators at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MachineConfig {
    /// Physical pin assignment
    pub pins: PinMap,
    /// Cycle timing
    pub timing: TimingConfig,
    /// Conveyor belt stepper
    pub conveyor: AxisConfig,
    /// Batter dispenser stepper
    pub dispenser: AxisConfig,
    /// Cooling fan stepper
    pub cooling: AxisConfig,
    /// Step targets for each phase of the cycle
    pub motion: MotionConfig,
}

impl Default for MachineConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl MachineConfig {
    /// Configuration matching the original machine wiring and constants
    pub const fn new() -> Self {
        Self {
            pins: PinMap::new(),
            timing: TimingConfig::new(),
            conveyor: AxisConfig::new(CONVEYOR_STEP_RATE, DEFAULT_ACCEL),
            dispenser: AxisConfig::new(DISPENSER_SPEED, DISPENSER_ACCEL),
            cooling: AxisConfig::new(MAX_STEP_RATE, DEFAULT_ACCEL),
            motion: MotionConfig::new(),
        }
    }

    /// Get the axis configuration for an axis
    pub fn axis(&self, axis: AxisId) -> &AxisConfig {
        match axis {
            AxisId::Conveyor => &self.conveyor,
            AxisId::Dispenser => &self.dispenser,
            AxisId::Cooling => &self.cooling,
        }
    }

    /// Check the configuration for values the cook cycle cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pins.validate()?;
        self.timing.validate()?;

        for axis in AxisId::ALL {
            let cfg = self.axis(axis);
            let speed_ok = (1..=AXIS_SPEED_LIMIT).contains(&cfg.max_speed_sps);
            let accel_ok = (1..=AXIS_ACCEL_LIMIT).contains(&cfg.accel_sps2);
            if !speed_ok || !accel_ok {
                return Err(ConfigError::InvalidSpeed(axis));
            }
        }

        if self.motion.dispenser_open_steps == self.motion.dispenser_closed_steps {
            return Err(ConfigError::DispenserTravel);
        }
        if self.motion.cook_zone_steps == 0 {
            return Err(ConfigError::ConveyorTravel);
        }

        Ok(())
    }
}
