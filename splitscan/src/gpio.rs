//! Row/column line control.
//!
//! Row pins are driven asserted-low while selected and parked idle-high
//! otherwise; column pins are inputs with pull-ups, so a pressed key reads
//! low. Both traits are blanket-implemented for any [`embedded_hal`] digital
//! pin. HAL errors are discarded: a pin that cannot be driven is a
//! wiring/configuration fault, not a runtime condition the scanner could
//! recover from.

use embedded_hal::digital::{InputPin, OutputPin};

/// A matrix row drive line.
pub trait RowPin {
    /// Drive the row active (asserted low).
    fn select(&mut self);

    /// Release the row to idle-high so it cannot sink current from
    /// neighbouring lines while another row is scanned.
    fn unselect(&mut self);
}

impl<P: OutputPin> RowPin for P {
    fn select(&mut self) {
        self.set_low().ok();
    }

    fn unselect(&mut self) {
        self.set_high().ok();
    }
}

/// A matrix column sense line.
pub trait ColPin {
    /// Sample the column against the currently selected row.
    fn is_pressed(&mut self) -> bool;
}

impl<P: InputPin> ColPin for P {
    fn is_pressed(&mut self) -> bool {
        // Pull-up idle-high; a closed switch pulls the line low.
        self.is_low().ok().unwrap_or_default()
    }
}
