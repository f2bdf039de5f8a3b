//! Button input handling
//!
//! Turns raw, bouncy button levels into one event per physical press.

pub mod debounce;

pub use debounce::{ButtonEvents, Buttons, Debouncer};
