//! Griddle heater control
//!
//! The griddle has no temperature feedback: readiness is inferred from the
//! time elapsed since the relay was last switched.

pub mod griddle;

pub use griddle::Griddle;
