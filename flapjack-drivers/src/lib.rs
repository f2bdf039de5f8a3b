//! Hardware driver implementations
//!
//! This crate provides concrete implementations of the traits defined
//! in flapjack-core and flapjack-display on top of `embedded-hal` 1.0:
//!
//! - Griddle relay on a GPIO pin
//! - Step/direction/enable stepper channels (A4988, DRV8825, TMC2209 in
//!   standalone mode) with an optional DIAG stall input
//! - Push-buttons on GPIO inputs
//! - HD44780 1602 character LCD behind a PCF8574 I2C backpack

#![no_std]
#![deny(unsafe_code)]

pub mod display;
pub mod heater;
pub mod input;
pub mod stepper;
