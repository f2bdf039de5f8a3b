//! Safety monitoring
//!
//! Turns motor faults, a late heater and a stuck cancel into fault events.

pub mod monitor;

pub use monitor::{SafetyMonitor, SafetyStatus};
