//! Status definition and transition table

use super::events::{Event, FaultKind};

/// Cook cycle status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    /// Idle, waiting for a request
    #[default]
    Empty,
    /// Batter dispensed and travelling, griddle heating
    Requested,
    /// Batter on the hot griddle, cook timer running
    Baking,
    /// Cycle aborted; purging until the kill timeout returns to Empty
    Cancelled,
    /// Pancake done, cooling and waiting for pickup
    Ready,
}

impl Status {
    /// Check if the heater may be commanded on in this status
    pub fn heater_allowed(&self) -> bool {
        matches!(self, Status::Requested | Status::Baking)
    }

    /// Check if a cycle is in progress (cancel applies)
    pub fn is_active(&self) -> bool {
        matches!(self, Status::Requested | Status::Baking | Status::Ready)
    }

    /// Check if motors may run in this status
    pub fn motor_allowed(&self) -> bool {
        !matches!(self, Status::Empty)
    }

    /// Short uppercase label for logs and the display
    pub fn label(&self) -> &'static str {
        match self {
            Status::Empty => "EMPTY",
            Status::Requested => "REQUESTED",
            Status::Baking => "BAKING",
            Status::Cancelled => "CANCELLED",
            Status::Ready => "READY",
        }
    }

    /// Process an event and return the next status
    ///
    /// Events that do not apply to the current status leave it unchanged.
    pub fn transition(self, event: Event) -> Self {
        use Status::*;

        match (self, event) {
            // Abort paths
            (Requested | Baking | Ready, Event::Cancel) => Cancelled,
            (
                Requested | Baking | Ready,
                Event::Fault(FaultKind::MotorStall(_) | FaultKind::HeaterTimeout),
            ) => Cancelled,
            (Cancelled, Event::Fault(FaultKind::StuckCancel)) => Empty,

            // Normal cycle
            (Empty, Event::Confirm) => Requested,
            (Requested, Event::ReadyToBake) => Baking,
            (Baking, Event::CookTimeElapsed) => Ready,
            (Ready, Event::Confirm) => Empty,
            (Ready, Event::PickupTimeout) => Empty,

            // Invalid transitions - stay in current status
            _ => self,
        }
    }
}
