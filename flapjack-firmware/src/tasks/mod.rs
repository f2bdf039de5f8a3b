//! Embassy tasks

pub mod control;
pub mod display;

pub use control::control_task;
pub use display::display_task;
