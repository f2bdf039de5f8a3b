//! Text animations
//!
//! Each animation is an immutable table of frames plus a playback mode.
//! [`AnimationPlayer`] picks the frame for a given time; nothing is
//! scheduled, so the caller can poll it at any rate.

use flapjack_core::timer::CycleTimer;

/// How an animation behaves after its last frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Playback {
    /// Start over from the first frame
    Cyclic,
    /// Stay on the last frame
    OneShot,
}

/// Immutable frame table
#[derive(Debug, PartialEq, Eq)]
pub struct Animation {
    /// Frames in display order
    pub frames: &'static [&'static str],
    /// Behaviour after the last frame
    pub playback: Playback,
}

impl Animation {
    /// Number of frames
    pub const fn len(&self) -> usize {
        self.frames.len()
    }

    /// Check if the table has no frames
    pub const fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

/// Boot intro: a capital letter walks across the name, then the line blanks
pub static INTRO: Animation = Animation {
    frames: &[
        "pancake maker",
        "pAncake maker",
        "paNcake maker",
        "panCake maker",
        "pancAke maker",
        "pancaKe maker",
        "pancakE maker",
        "pancake Maker",
        "pancake mAker",
        "pancake maKer",
        "pancake makEr",
        "pancake makeR",
        " ",
    ],
    playback: Playback::OneShot,
};

/// Shown while the griddle heats up
pub static HEATING: Animation = Animation {
    frames: &["heating", "heating.", "heating..", "heating...", "heating"],
    playback: Playback::Cyclic,
};

/// Shown while the griddle cools down
pub static COOLING: Animation = Animation {
    frames: &["cooling", "cooling.", "cooling..", "cooling...", "cooling"],
    playback: Playback::Cyclic,
};

/// Plays one animation from a start time
#[derive(Debug, Clone, Copy)]
pub struct AnimationPlayer {
    animation: &'static Animation,
    /// Started at the first frame, one period per frame
    timer: CycleTimer,
}

impl AnimationPlayer {
    /// Start `animation` at `now_ms`, advancing one frame every `frame_ms`
    pub fn start(animation: &'static Animation, now_ms: u32, frame_ms: u32) -> Self {
        Self {
            animation,
            timer: CycleTimer::start(now_ms, frame_ms),
        }
    }

    /// Animation being played
    pub fn animation(&self) -> &'static Animation {
        self.animation
    }

    /// Check if this player is playing `animation`
    pub fn is_playing(&self, animation: &'static Animation) -> bool {
        core::ptr::eq(self.animation, animation)
    }

    /// Index of the frame to show at `now_ms`
    pub fn frame_index(&self, now_ms: u32) -> usize {
        let len = self.animation.len();
        if len == 0 {
            return 0;
        }
        let periods = self.timer.periods(now_ms) as usize;
        match self.animation.playback {
            Playback::Cyclic => periods % len,
            Playback::OneShot => periods.min(len - 1),
        }
    }

    /// Frame to show at `now_ms`
    pub fn frame(&self, now_ms: u32) -> &'static str {
        self.animation
            .frames
            .get(self.frame_index(now_ms))
            .copied()
            .unwrap_or("")
    }

    /// Check if a one-shot animation has shown its last frame for a full period
    ///
    /// Cyclic animations never finish.
    pub fn is_finished(&self, now_ms: u32) -> bool {
        self.animation.playback == Playback::OneShot
            && self.timer.periods(now_ms) as usize >= self.animation.len()
    }
}
