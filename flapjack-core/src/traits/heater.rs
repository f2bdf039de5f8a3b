//! Heater output trait

/// Trait for heater output control
///
/// Implementations switch the griddle via a GPIO-driven relay or SSR.
pub trait HeaterOutput {
    /// Turn the heater on or off
    fn set_on(&mut self, on: bool);

    /// Check if the heater output is actually on
    ///
    /// Implementations report the state last applied to the hardware, so
    /// a failed switch shows up here rather than being assumed.
    fn is_on(&self) -> bool;
}
