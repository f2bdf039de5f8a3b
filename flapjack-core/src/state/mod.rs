//! Cook cycle status machine
//!
//! The transition table is pure: given a status and an event it returns the
//! next status. Side effects of entering a status live in the cook cycle
//! controller.

pub mod events;
pub mod machine;

pub use events::{Event, FaultKind};
pub use machine::Status;
