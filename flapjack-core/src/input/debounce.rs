//! Button debounce state management

use crate::traits::ButtonInput;

/// Debounce state tracker for one button
///
/// A press is reported once, after the pressed level has been stable for
/// the debounce interval. Holding the button produces no further events;
/// it must be released (and the release must also be stable) first.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Debouncer {
    /// Required stable time before a level change is accepted
    debounce_ms: u32,
    /// Last accepted level (true = pressed)
    stable: bool,
    /// Level seen on the previous sample
    raw: bool,
    /// When the current raw level first appeared
    raw_since_ms: u32,
    /// First sample has been taken
    primed: bool,
    /// Level changes abandoned before the debounce interval ran out
    glitches: u32,
}

impl Debouncer {
    /// Create a debouncer with the given interval
    pub const fn new(debounce_ms: u32) -> Self {
        Self {
            debounce_ms,
            stable: false,
            raw: false,
            raw_since_ms: 0,
            primed: false,
            glitches: 0,
        }
    }

    /// Feed a raw sample; returns true on a confirmed press
    ///
    /// The first sample only establishes the starting level, so a button
    /// held through power-up does not count as a press.
    pub fn update(&mut self, pressed: bool, now_ms: u32) -> bool {
        if !self.primed {
            self.primed = true;
            self.stable = pressed;
            self.raw = pressed;
            self.raw_since_ms = now_ms;
            return false;
        }

        if pressed != self.raw {
            if self.raw != self.stable {
                // A pending change reverted before it was confirmed
                self.glitches = self.glitches.saturating_add(1);
            }
            self.raw = pressed;
            self.raw_since_ms = now_ms;
            return false;
        }

        if pressed != self.stable && now_ms.wrapping_sub(self.raw_since_ms) >= self.debounce_ms {
            self.stable = pressed;
            return pressed;
        }

        false
    }

    /// Last accepted level
    pub fn is_pressed(&self) -> bool {
        self.stable
    }

    /// Number of rejected glitches
    pub fn glitches(&self) -> u32 {
        self.glitches
    }
}

/// Press events confirmed on one poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ButtonEvents {
    /// Confirm button was pressed
    pub confirm: bool,
    /// Cancel button was pressed
    pub cancel: bool,
}

impl ButtonEvents {
    /// Check if no press was confirmed
    pub fn is_empty(&self) -> bool {
        !self.confirm && !self.cancel
    }
}

/// The machine's two push-buttons with their debouncers
pub struct Buttons<B> {
    confirm: B,
    cancel: B,
    confirm_state: Debouncer,
    cancel_state: Debouncer,
}

impl<B: ButtonInput> Buttons<B> {
    /// Create the button pair
    pub fn new(confirm: B, cancel: B, debounce_ms: u32) -> Self {
        Self {
            confirm,
            cancel,
            confirm_state: Debouncer::new(debounce_ms),
            cancel_state: Debouncer::new(debounce_ms),
        }
    }

    /// Sample both buttons
    pub fn poll(&mut self, now_ms: u32) -> ButtonEvents {
        ButtonEvents {
            confirm: self.confirm_state.update(self.confirm.is_pressed(), now_ms),
            cancel: self.cancel_state.update(self.cancel.is_pressed(), now_ms),
        }
    }

    /// Total rejected glitches across both buttons
    pub fn glitches(&self) -> u32 {
        self.confirm_state
            .glitches()
            .saturating_add(self.cancel_state.glitches())
    }

    /// Access the raw inputs
    pub fn inputs_mut(&mut self) -> (&mut B, &mut B) {
        (&mut self.confirm, &mut self.cancel)
    }
}
