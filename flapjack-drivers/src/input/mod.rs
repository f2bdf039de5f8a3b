//! Button input implementations

pub mod button;

pub use button::GpioButton;
