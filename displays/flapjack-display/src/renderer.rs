//! Status rendering
//!
//! Builds the 16x2 screen for each cook cycle status.

use core::fmt::Write;

use flapjack_core::config::TimingConfig;
use flapjack_core::motion::AxisId;
use flapjack_core::timer::CycleTimer;
use flapjack_core::{FaultKind, Status, StatusView};

use crate::animation::{Animation, AnimationPlayer, COOLING, HEATING, INTRO};
use crate::backend::{DisplayBackend, DisplayError};
use crate::screen::{Line, Screen, LINE_LEN, SCREEN_ROWS};

/// Cells between the brackets of a progress bar
const BAR_CELLS: usize = LINE_LEN - 2;

/// Boot intro progress
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BootPhase {
    /// Intro frames playing
    Intro,
    /// Last intro frame held for the message wait time
    Hold(CycleTimer),
    /// Showing status screens
    Done,
}

/// Turns status snapshots into screen content
pub struct StatusRenderer {
    screen: Screen,
    player: Option<AnimationPlayer>,
    boot: BootPhase,
    anim_inc_ms: u32,
    msg_wait_ms: u32,
}

impl StatusRenderer {
    /// Create a renderer that starts with the boot intro
    pub fn new(timing: &TimingConfig) -> Self {
        Self {
            screen: Screen::new(),
            player: None,
            boot: BootPhase::Intro,
            anim_inc_ms: timing.anim_inc_ms,
            msg_wait_ms: timing.msg_wait_ms,
        }
    }

    /// Get the current screen buffer
    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    /// Force a full redraw on the next [`StatusRenderer::render_to`]
    ///
    /// Used after the display lost its content (reset or reconnect).
    pub fn invalidate(&mut self) {
        self.screen.mark_dirty();
    }

    /// Check if the boot intro is still showing
    pub fn is_booting(&self) -> bool {
        self.boot != BootPhase::Done
    }

    /// Rebuild the screen for `view`
    pub fn update(&mut self, view: &StatusView, now_ms: u32) {
        if self.render_boot(view, now_ms) {
            return;
        }

        match view.status {
            Status::Empty => self.render_idle(view.last_fault),
            Status::Requested => self.render_requested(view, now_ms),
            Status::Baking => self.render_baking(view),
            Status::Ready => self.render_ready(view, now_ms),
            Status::Cancelled => self.render_cancelled(view),
        }
    }

    /// Push the rows whose content changed to `display`
    ///
    /// Returns whether anything was written.
    pub async fn render_to<D: DisplayBackend>(
        &mut self,
        display: &mut D,
    ) -> Result<bool, DisplayError> {
        if !self.screen.is_dirty() {
            return Ok(false);
        }
        if !display.is_ready() {
            return Err(DisplayError::NotInitialized);
        }

        for row in 0..SCREEN_ROWS {
            if !self.screen.is_row_dirty(row) {
                continue;
            }
            // Pad so the previous content of the row is overwritten
            let mut line = Line::new();
            let _ = line.push_str(self.screen.get_line(row).unwrap_or(""));
            while line.push(' ').is_ok() {}
            display.draw_text(row as u8, 0, &line).await?;
            self.screen.mark_row_clean(row);
        }
        display.flush().await?;

        Ok(true)
    }

    /// Render the intro; returns false once status screens take over
    fn render_boot(&mut self, view: &StatusView, now_ms: u32) -> bool {
        // A request during the intro skips it
        if view.status != Status::Empty {
            self.boot = BootPhase::Done;
        }

        match self.boot {
            BootPhase::Intro => {
                let frame = self.play(&INTRO, now_ms);
                self.screen.set_line(0, frame);
                self.screen.set_line(1, "");
                if self.player.is_some_and(|p| p.is_finished(now_ms)) {
                    self.boot = BootPhase::Hold(CycleTimer::start(now_ms, self.msg_wait_ms));
                }
                true
            }
            BootPhase::Hold(timer) if !timer.is_expired(now_ms) => true,
            BootPhase::Hold(_) => {
                self.boot = BootPhase::Done;
                self.player = None;
                false
            }
            BootPhase::Done => false,
        }
    }

    fn render_idle(&mut self, last_fault: Option<FaultKind>) {
        self.player = None;
        self.screen.set_line(0, "pancake maker");
        match last_fault {
            Some(fault) => self.screen.set_line(1, fault_label(fault)),
            None => self.screen.set_line(1, "press confirm"),
        }
    }

    fn render_requested(&mut self, view: &StatusView, now_ms: u32) {
        if view.heater_ready {
            self.player = None;
            self.screen.set_line(0, "batter on way");
        } else {
            let frame = self.play(&HEATING, now_ms);
            self.screen.set_line(0, frame);
        }
        self.screen.set_line(1, &progress_bar(view.progress_permille));
    }

    fn render_baking(&mut self, view: &StatusView) {
        self.player = None;
        self.screen
            .set_line(0, &format_line(format_args!("baking {}s", view.seconds_left)));
        self.screen.set_line(1, &progress_bar(view.progress_permille));
    }

    fn render_ready(&mut self, view: &StatusView, now_ms: u32) {
        self.screen.set_line(0, "pancake ready!");
        if view.is_cooling() {
            let frame = self.play(&COOLING, now_ms);
            self.screen.set_line(1, frame);
        } else {
            self.player = None;
            self.screen.set_line(1, "press confirm");
        }
    }

    fn render_cancelled(&mut self, view: &StatusView) {
        self.player = None;
        match view.last_fault {
            Some(fault) => self.screen.set_line(0, fault_label(fault)),
            None => self.screen.set_line(0, "cancelled"),
        }
        self.screen
            .set_line(1, &format_line(format_args!("reset in {}s", view.seconds_left)));
    }

    /// Frame of `animation`, starting it if another one was playing
    fn play(&mut self, animation: &'static Animation, now_ms: u32) -> &'static str {
        let player = match self.player {
            Some(player) if player.is_playing(animation) => player,
            _ => {
                let player = AnimationPlayer::start(animation, now_ms, self.anim_inc_ms);
                self.player = Some(player);
                player
            }
        };
        player.frame(now_ms)
    }
}

/// Short description of a fault
pub fn fault_label(fault: FaultKind) -> &'static str {
    match fault {
        FaultKind::MotorStall(AxisId::Conveyor) => "stall: conveyor",
        FaultKind::MotorStall(AxisId::Dispenser) => "stall: dispenser",
        FaultKind::MotorStall(AxisId::Cooling) => "stall: cooling",
        FaultKind::HeaterTimeout => "heater timeout",
        FaultKind::StuckCancel => "cancel timeout",
    }
}

/// `[#######-------]` across the full row
fn progress_bar(permille: u16) -> Line {
    let filled = (permille.min(1000) as usize * BAR_CELLS) / 1000;
    let mut bar = Line::new();
    let _ = bar.push('[');
    for i in 0..BAR_CELLS {
        let _ = bar.push(if i < filled { '#' } else { '-' });
    }
    let _ = bar.push(']');
    bar
}

fn format_line(args: core::fmt::Arguments<'_>) -> Line {
    let mut line = Line::new();
    // Overflow truncates; the LCD cannot show more anyway
    let _ = line.write_fmt(args);
    line
}
