//! Stepper driver implementations

pub mod stall;
pub mod step_dir;

pub use stall::{DiagPin, NoStallGuard, StallInput};
pub use step_dir::StepDirAxis;
