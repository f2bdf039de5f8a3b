//! Safety monitor implementation
//!
//! Collects the latest axis faults, heater watchdog result and kill timer
//! state each tick, and reports the fault that applies to the current status.

use crate::motion::AxisId;
use crate::state::{FaultKind, Status};
use crate::traits::StepperError;

/// Safety condition status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SafetyStatus {
    /// All conditions normal
    Ok,
    /// Safety condition violated
    Fault(FaultKind),
}

/// Safety monitor for fault detection
#[derive(Debug, Clone, Default)]
pub struct SafetyMonitor {
    /// Latched fault per axis, indexed in [`AxisId::ALL`] order
    axis_faults: [Option<StepperError>; 3],
    /// Heater commanded on for the whole watchdog window without getting hot
    heater_overdue: bool,
    /// Kill timer ran out
    kill_expired: bool,
    /// Faults reported since power-up
    fault_count: u32,
}

fn slot(axis: AxisId) -> usize {
    match axis {
        AxisId::Conveyor => 0,
        AxisId::Dispenser => 1,
        AxisId::Cooling => 2,
    }
}

impl SafetyMonitor {
    /// Create a new safety monitor
    pub fn new() -> Self {
        Self::default()
    }

    /// Latch a fault reported by one axis
    ///
    /// The fault stays latched until [`SafetyMonitor::reset`].
    pub fn report_axis(&mut self, axis: AxisId, fault: StepperError) {
        self.axis_faults[slot(axis)] = Some(fault);
    }

    /// Update the heater watchdog result
    pub fn update_heater(&mut self, overdue: bool) {
        self.heater_overdue = overdue;
    }

    /// Update the kill timer result
    pub fn update_kill_timer(&mut self, expired: bool) {
        self.kill_expired = expired;
    }

    /// Latched fault of one axis
    pub fn axis_fault(&self, axis: AxisId) -> Option<StepperError> {
        self.axis_faults[slot(axis)]
    }

    /// Check all safety conditions for the given status
    ///
    /// Returns the first fault that forces a transition out of `status`.
    /// Motor faults take precedence over the heater watchdog.
    pub fn check(&self, status: Status) -> SafetyStatus {
        if status == Status::Cancelled {
            if self.kill_expired {
                return SafetyStatus::Fault(FaultKind::StuckCancel);
            }
            return SafetyStatus::Ok;
        }

        if !status.is_active() {
            return SafetyStatus::Ok;
        }

        for axis in AxisId::ALL {
            if self.axis_fault(axis).is_some() {
                return SafetyStatus::Fault(FaultKind::MotorStall(axis));
            }
        }

        if status.heater_allowed() && self.heater_overdue {
            return SafetyStatus::Fault(FaultKind::HeaterTimeout);
        }

        SafetyStatus::Ok
    }

    /// Record that a fault was acted upon
    pub fn record_fault(&mut self) {
        self.fault_count = self.fault_count.saturating_add(1);
    }

    /// Faults acted upon since power-up
    pub fn fault_count(&self) -> u32 {
        self.fault_count
    }

    /// Forget every latched condition
    pub fn reset(&mut self) {
        self.axis_faults = [None; 3];
        self.heater_overdue = false;
        self.kill_expired = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normal_operation() {
        let monitor = SafetyMonitor::new();
        for status in [
            Status::Empty,
            Status::Requested,
            Status::Baking,
            Status::Cancelled,
            Status::Ready,
        ] {
            assert_eq!(monitor.check(status), SafetyStatus::Ok);
        }
    }

    #[test]
    fn test_motor_stall() {
        let mut monitor = SafetyMonitor::new();
        monitor.report_axis(AxisId::Dispenser, StepperError::StallDetected);
        assert_eq!(
            monitor.check(Status::Requested),
            SafetyStatus::Fault(FaultKind::MotorStall(AxisId::Dispenser))
        );
        // Nothing to abort while idle
        assert_eq!(monitor.check(Status::Empty), SafetyStatus::Ok);
    }

    #[test]
    fn test_stall_takes_precedence_over_heater() {
        let mut monitor = SafetyMonitor::new();
        monitor.update_heater(true);
        monitor.report_axis(AxisId::Cooling, StepperError::CommunicationError);
        assert_eq!(
            monitor.check(Status::Baking),
            SafetyStatus::Fault(FaultKind::MotorStall(AxisId::Cooling))
        );
    }

    #[test]
    fn test_heater_timeout_only_while_heating() {
        let mut monitor = SafetyMonitor::new();
        monitor.update_heater(true);
        assert_eq!(
            monitor.check(Status::Requested),
            SafetyStatus::Fault(FaultKind::HeaterTimeout)
        );
        assert_eq!(monitor.check(Status::Ready), SafetyStatus::Ok);
    }

    #[test]
    fn test_stuck_cancel() {
        let mut monitor = SafetyMonitor::new();
        monitor.update_kill_timer(true);
        assert_eq!(
            monitor.check(Status::Cancelled),
            SafetyStatus::Fault(FaultKind::StuckCancel)
        );
        assert_eq!(monitor.check(Status::Baking), SafetyStatus::Ok);
    }

    #[test]
    fn test_cancelled_ignores_motor_faults() {
        let mut monitor = SafetyMonitor::new();
        monitor.report_axis(AxisId::Conveyor, StepperError::StallDetected);
        assert_eq!(monitor.check(Status::Cancelled), SafetyStatus::Ok);
    }

    #[test]
    fn test_reset_clears_conditions() {
        let mut monitor = SafetyMonitor::new();
        monitor.report_axis(AxisId::Conveyor, StepperError::StallDetected);
        monitor.update_heater(true);
        monitor.record_fault();
        monitor.reset();

        assert_eq!(monitor.check(Status::Baking), SafetyStatus::Ok);
        assert_eq!(monitor.fault_count(), 1);
    }
}
