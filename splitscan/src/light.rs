//! Status light hooks.
//!
//! [`crate::matrix::Matrix::power_up`] signals the indicator subsystem so a
//! wake from sleep is visible to the user. Boards without an indicator use
//! [`NoLight`].

/// External indicator driven on power transitions.
pub trait StatusLight {
    /// Switch the indicator on or off.
    fn enable(&mut self, on: bool);

    /// Blink the indicator `times` times.
    fn blink(&mut self, times: u8);
}

/// No indicator fitted.
pub struct NoLight;

impl StatusLight for NoLight {
    fn enable(&mut self, _on: bool) {}

    fn blink(&mut self, _times: u8) {}
}
