//! Status LED strip patterns
//!
//! [`StatusIndicator`] maps a [`StatusView`] to one colour per LED. It
//! knows nothing about the strip protocol; the firmware converts the
//! frame to whatever its driver takes.

use flapjack_core::config::TimingConfig;
use flapjack_core::{Status, StatusView};

/// One LED colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const OFF: Self = Self::new(0, 0, 0);
    /// Idle glow
    pub const IDLE: Self = Self::new(8, 8, 8);
    /// Griddle heating up
    pub const HEATING: Self = Self::new(64, 20, 0);
    /// Pancake on the griddle
    pub const BAKING: Self = Self::new(64, 40, 0);
    /// Pancake waiting for pickup
    pub const READY: Self = Self::new(0, 64, 0);
    /// Pickup done, griddle still hot
    pub const COOLING: Self = Self::new(0, 40, 64);
    /// Cancel or fault
    pub const ALERT: Self = Self::new(64, 0, 0);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

/// Picks the strip pattern for a status snapshot
#[derive(Debug, Clone, Copy)]
pub struct StatusIndicator {
    blink_ms: u32,
}

impl StatusIndicator {
    /// Blink at the animation frame rate
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            blink_ms: timing.anim_inc_ms.max(1),
        }
    }

    /// Fill `leds` with the pattern for `view` at `now_ms`
    ///
    /// - `Empty`: dim white, or a red blink if the last cycle faulted
    /// - `Requested`/`Baking`: a bar filled by phase progress
    /// - `Ready`: solid green, cyan while the griddle cools
    /// - `Cancelled`: red blink
    pub fn fill(&self, view: &StatusView, now_ms: u32, leds: &mut [Rgb]) {
        match view.status {
            Status::Empty if view.last_fault.is_some() => self.blink(Rgb::ALERT, now_ms, leds),
            Status::Empty => leds.fill(Rgb::IDLE),
            Status::Requested => progress_bar(Rgb::HEATING, view.progress_permille, leds),
            Status::Baking => progress_bar(Rgb::BAKING, view.progress_permille, leds),
            Status::Ready if view.is_cooling() => leds.fill(Rgb::COOLING),
            Status::Ready => leds.fill(Rgb::READY),
            Status::Cancelled => self.blink(Rgb::ALERT, now_ms, leds),
        }
    }

    /// Pattern as a fixed-size frame
    pub fn frame<const N: usize>(&self, view: &StatusView, now_ms: u32) -> [Rgb; N] {
        let mut leds = [Rgb::OFF; N];
        self.fill(view, now_ms, &mut leds);
        leds
    }

    fn blink(&self, colour: Rgb, now_ms: u32, leds: &mut [Rgb]) {
        let on = (now_ms / self.blink_ms) % 2 == 0;
        leds.fill(if on { colour } else { Rgb::OFF });
    }
}

/// Light the first LEDs in proportion to `permille`, rounded up
fn progress_bar(colour: Rgb, permille: u16, leds: &mut [Rgb]) {
    let permille = u32::from(permille.min(1000));
    let lit = (leds.len() as u32 * permille).div_ceil(1000) as usize;
    for (i, led) in leds.iter_mut().enumerate() {
        *led = if i < lit { colour } else { Rgb::OFF };
    }
}
