//! Cook cycle orchestration
//!
//! [`CookCycle`] owns the griddle, the three axes and the buttons, and
//! advances one request -> bake -> ready -> idle cycle per confirm press.
//! It is driven by two calls from the cooperative loop: [`CookCycle::tick`]
//! on the millisecond clock and [`CookCycle::poll_motion`] on the
//! microsecond clock.

pub mod controller;
pub mod dispense;
pub mod view;

pub use controller::{Axes, CookCycle};
pub use dispense::{DispensePhase, DispenseSequence};
pub use view::StatusView;
