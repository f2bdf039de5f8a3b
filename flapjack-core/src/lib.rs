//! Board-agnostic core logic for the pancake maker firmware
//!
//! This crate contains all application logic that does not depend on
//! specific hardware implementations:
//!
//! - Hardware abstraction traits (stepper axis, heater relay, button)
//! - Status machine and the events that drive it
//! - Cook cycle controller (the cooperative tick loop body)
//! - Button debouncing and countdown timers
//! - Griddle heat-up/cool-down timing
//! - Step-rate planning (acceleration math)
//! - Safety monitoring logic
//! - Configuration type definitions

#![no_std]
#![deny(unsafe_code)]

pub mod config;
pub mod cycle;
pub mod heater;
pub mod input;
pub mod motion;
pub mod safety;
pub mod state;
pub mod timer;
pub mod traits;

pub use config::MachineConfig;
pub use cycle::{CookCycle, StatusView};
pub use state::{Event, FaultKind, Status};
