//! Motion planning
//!
//! Axis identifiers, logical positions, and the trapezoidal step-rate
//! profile used by the step/direction drivers.

pub mod axis;
pub mod planner;

pub use axis::{AxisId, Direction, DispenserPosition};
pub use planner::{MotionState, StepPlanner};
