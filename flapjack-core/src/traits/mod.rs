//! Hardware abstraction traits
//!
//! These traits define the interface between the cook cycle and
//! hardware-specific implementations. The core only ever sees logical
//! signals: a pressed button, a heater relay state, an axis target.

pub mod heater;
pub mod input;
pub mod stepper;

pub use heater::HeaterOutput;
pub use input::ButtonInput;
pub use stepper::{StepperAxis, StepperError};
