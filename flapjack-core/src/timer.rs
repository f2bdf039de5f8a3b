//! Countdown timers over a wrapping millisecond clock

/// Countdown started at a given time
///
/// Gates cook time, dispense dwell, kill timeout, pickup grace, message hold
/// and animation frame advance. All comparisons use wrapping arithmetic, so a
/// timer keeps working across the `u32` millisecond rollover (~49 days).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct CycleTimer {
    start_ms: u32,
    duration_ms: u32,
}

impl CycleTimer {
    /// Start a timer at `now_ms`
    pub const fn start(now_ms: u32, duration_ms: u32) -> Self {
        Self {
            start_ms: now_ms,
            duration_ms,
        }
    }

    /// Time the timer was started
    pub fn start_ms(&self) -> u32 {
        self.start_ms
    }

    /// Configured duration
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// Time since start
    pub fn elapsed(&self, now_ms: u32) -> u32 {
        now_ms.wrapping_sub(self.start_ms)
    }

    /// Time left until expiry (zero once expired)
    pub fn remaining(&self, now_ms: u32) -> u32 {
        self.duration_ms.saturating_sub(self.elapsed(now_ms))
    }

    /// Check if the full duration has elapsed
    pub fn is_expired(&self, now_ms: u32) -> bool {
        self.elapsed(now_ms) >= self.duration_ms
    }

    /// Progress in permille, clamped to 1000
    pub fn progress_permille(&self, now_ms: u32) -> u16 {
        if self.duration_ms == 0 {
            return 1000;
        }
        let elapsed = self.elapsed(now_ms).min(self.duration_ms) as u64;
        (elapsed * 1000 / self.duration_ms as u64) as u16
    }

    /// Number of whole periods of `duration_ms` elapsed (for frame advance)
    pub fn periods(&self, now_ms: u32) -> u32 {
        if self.duration_ms == 0 {
            return 0;
        }
        self.elapsed(now_ms) / self.duration_ms
    }
}
