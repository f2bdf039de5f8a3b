//! Read-only snapshot of the cook cycle for displays

use crate::cycle::DispensePhase;
use crate::state::{FaultKind, Status};

/// Snapshot of everything a display needs for one frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct StatusView {
    /// Current status
    pub status: Status,
    /// Progress of the running phase in permille
    ///
    /// Heat-up in `Requested`, cook time in `Baking`, pickup grace in
    /// `Ready`, kill timeout in `Cancelled`; zero in `Empty`.
    pub progress_permille: u16,
    /// Seconds left in the running phase, rounded up
    pub seconds_left: u32,
    /// Heater relay commanded on
    pub heater_on: bool,
    /// Griddle hot enough to bake
    pub heater_ready: bool,
    /// Griddle cooled down
    pub griddle_cool: bool,
    /// Dispense sequence progress
    pub dispense: DispensePhase,
    /// Most recent fault, cleared when a new cycle starts
    pub last_fault: Option<FaultKind>,
}

impl StatusView {
    /// View of an idle machine
    pub const fn idle() -> Self {
        Self {
            status: Status::Empty,
            progress_permille: 0,
            seconds_left: 0,
            heater_on: false,
            heater_ready: false,
            griddle_cool: true,
            dispense: DispensePhase::Idle,
            last_fault: None,
        }
    }

    /// Check if the cooling animation should play
    pub fn is_cooling(&self) -> bool {
        self.status == Status::Ready && !self.griddle_cool
    }
}

impl Default for StatusView {
    fn default() -> Self {
        Self::idle()
    }
}
