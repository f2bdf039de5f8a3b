//! Events that trigger status transitions

use crate::motion::AxisId;

/// Fault conditions that force a transition
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FaultKind {
    /// An axis reported a stall or a driver error
    MotorStall(AxisId),
    /// Heater commanded on but not ready within the watchdog window
    HeaterTimeout,
    /// Kill timeout expired while cancelled
    StuckCancel,
}

/// Events that can trigger status transitions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Confirm button pressed
    Confirm,
    /// Cancel button pressed
    Cancel,
    /// Griddle hot and batter in the cook zone
    ReadyToBake,
    /// Cook timer expired
    CookTimeElapsed,
    /// Pancake was not collected within the pickup grace period
    PickupTimeout,
    /// Fault detected by the safety monitor
    Fault(FaultKind),
}

impl Event {
    /// Check if this event comes from a button
    pub fn is_user_event(&self) -> bool {
        matches!(self, Event::Confirm | Event::Cancel)
    }

    /// Check if this event reports a fault
    pub fn is_fault(&self) -> bool {
        matches!(self, Event::Fault(_))
    }
}
