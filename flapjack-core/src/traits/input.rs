//! Push-button input trait

/// Raw push-button level
///
/// Implementations hide the wiring polarity: `is_pressed` is true while the
/// button is physically held, whatever electrical level that means. The
/// reading is not debounced.
pub trait ButtonInput {
    /// Sample the button
    fn is_pressed(&mut self) -> bool;
}
