//! Cycle timing configuration
//!
//! All durations are in milliseconds and compared against a wrapping
//! millisecond clock that starts at reset.

use super::ConfigError;

/// Time it takes for the griddle to heat up
pub const HEATUP_MS: u32 = 2_000;

/// Time it takes for the griddle to cool down
pub const COOLDOWN_MS: u32 = 2_000;

/// Maximum time allowed to remain in the cancelled state
///
/// This is a hard safety bound and is not exposed for runtime tuning.
pub const KILL_TIMEOUT_MS: u32 = 60_000;

/// Intro message display time
pub const MSG_WAIT_MS: u32 = 1_500;

/// Animation frame period
pub const ANIM_INC_MS: u32 = 250;

/// Time for one pancake on the belt
pub const COOK_TIME_MS: u32 = 10_000;

/// Button level must be stable this long before a press counts
pub const DEBOUNCE_MS: u32 = 50;

/// Time the dispenser valve stays open
pub const DISPENSE_DWELL_MS: u32 = 500;

/// Time a finished pancake waits for pickup before the machine resets
pub const PICKUP_TIMEOUT_MS: u32 = 30_000;

/// Heater watchdog trips after this many heat-up periods without readiness
pub const HEATER_WATCHDOG_FACTOR: u32 = 3;

/// Timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct TimingConfig {
    /// Griddle heat-up latency
    pub heatup_ms: u32,
    /// Griddle cool-down latency
    pub cooldown_ms: u32,
    /// Bake time once the batter reaches the cook zone
    pub cook_time_ms: u32,
    /// Dwell in the cancelled state before forced reset
    pub kill_timeout_ms: u32,
    /// Display hold time for messages
    pub msg_wait_ms: u32,
    /// Animation frame period
    pub anim_inc_ms: u32,
    /// Button debounce interval
    pub debounce_ms: u32,
    /// Dispenser open dwell
    pub dispense_dwell_ms: u32,
    /// Ready state grace period before automatic reset
    pub pickup_timeout_ms: u32,
    /// Heat-up multiples before the heater watchdog trips
    pub heater_watchdog_factor: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl TimingConfig {
    /// Original machine timing
    pub const fn new() -> Self {
        Self {
            heatup_ms: HEATUP_MS,
            cooldown_ms: COOLDOWN_MS,
            cook_time_ms: COOK_TIME_MS,
            kill_timeout_ms: KILL_TIMEOUT_MS,
            msg_wait_ms: MSG_WAIT_MS,
            anim_inc_ms: ANIM_INC_MS,
            debounce_ms: DEBOUNCE_MS,
            dispense_dwell_ms: DISPENSE_DWELL_MS,
            pickup_timeout_ms: PICKUP_TIMEOUT_MS,
            heater_watchdog_factor: HEATER_WATCHDOG_FACTOR,
        }
    }

    /// Time after heater-on at which a heater that is still not ready is a fault
    pub fn heater_watchdog_ms(&self) -> u32 {
        self.heatup_ms.saturating_mul(self.heater_watchdog_factor)
    }

    /// Reject zero values for durations that gate transitions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let gating = [
            self.heatup_ms,
            self.cooldown_ms,
            self.cook_time_ms,
            self.kill_timeout_ms,
            self.anim_inc_ms,
            self.pickup_timeout_ms,
        ];
        if gating.contains(&0) || self.heater_watchdog_factor < 2 {
            return Err(ConfigError::ZeroDuration);
        }
        Ok(())
    }
}
