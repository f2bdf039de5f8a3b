//! Griddle relay with heat-up/cool-down latency tracking

use crate::config::TimingConfig;
use crate::traits::HeaterOutput;

/// Griddle heater controller
///
/// Wraps a [`HeaterOutput`] and records when it was last commanded. All
/// readiness checks are time predicates over that record; nothing here
/// waits.
pub struct Griddle<H> {
    output: H,
    /// Last commanded state
    commanded: bool,
    /// When the current command was issued, `None` before the first command
    since_ms: Option<u32>,
    heatup_ms: u32,
    cooldown_ms: u32,
    watchdog_ms: u32,
}

impl<H: HeaterOutput> Griddle<H> {
    /// Create a griddle controller; the relay is forced off
    pub fn new(mut output: H, timing: &TimingConfig) -> Self {
        output.set_on(false);
        Self {
            output,
            commanded: false,
            since_ms: None,
            heatup_ms: timing.heatup_ms,
            cooldown_ms: timing.cooldown_ms,
            watchdog_ms: timing.heater_watchdog_ms(),
        }
    }

    /// Switch the relay on
    ///
    /// Commanding on while already on keeps the original timestamp, so
    /// readiness is never pushed back by a repeated command.
    pub fn command_on(&mut self, now_ms: u32) {
        if !self.commanded {
            self.commanded = true;
            self.since_ms = Some(now_ms);
        }
        self.output.set_on(true);
    }

    /// Switch the relay off
    pub fn command_off(&mut self, now_ms: u32) {
        if self.commanded {
            self.commanded = false;
            self.since_ms = Some(now_ms);
        }
        self.output.set_on(false);
    }

    /// Last commanded state
    pub fn is_commanded(&self) -> bool {
        self.commanded
    }

    /// Relay readback
    pub fn output_on(&self) -> bool {
        self.output.is_on()
    }

    /// Time since the last command, `None` before the first command
    pub fn elapsed(&self, now_ms: u32) -> Option<u32> {
        self.since_ms.map(|since| now_ms.wrapping_sub(since))
    }

    /// Griddle is hot: commanded on, relay on, and heat-up time elapsed
    pub fn is_ready(&self, now_ms: u32) -> bool {
        self.commanded
            && self.output.is_on()
            && self
                .elapsed(now_ms)
                .is_some_and(|elapsed| elapsed >= self.heatup_ms)
    }

    /// Griddle is cold: commanded off and cool-down time elapsed
    ///
    /// A griddle that was never switched on is cool.
    pub fn is_cool(&self, now_ms: u32) -> bool {
        if self.commanded {
            return false;
        }
        match self.elapsed(now_ms) {
            None => true,
            Some(elapsed) => elapsed >= self.cooldown_ms,
        }
    }

    /// Heat-up progress in permille (zero when off)
    pub fn heat_progress_permille(&self, now_ms: u32) -> u16 {
        if !self.commanded || self.heatup_ms == 0 {
            return 0;
        }
        let elapsed = self.elapsed(now_ms).unwrap_or(0).min(self.heatup_ms) as u64;
        (elapsed * 1000 / self.heatup_ms as u64) as u16
    }

    /// Heater has been on for the whole watchdog window without becoming ready
    pub fn heatup_overdue(&self, now_ms: u32) -> bool {
        self.commanded
            && !self.is_ready(now_ms)
            && self
                .elapsed(now_ms)
                .is_some_and(|elapsed| elapsed >= self.watchdog_ms)
    }

    /// Get access to the underlying output
    pub fn output(&self) -> &H {
        &self.output
    }

    /// Get mutable access to the underlying output
    pub fn output_mut(&mut self) -> &mut H {
        &mut self.output
    }
}
