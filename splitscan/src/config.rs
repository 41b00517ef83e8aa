//! Scan timing configuration.
//!
//! The matrix geometry (row count, native/expander column counts, pin
//! assignment) is fixed at compile time through const generics and the pin
//! arrays handed to [`crate::matrix::Matrix::new`]; this module only carries
//! the tunable electrical timing.

use embassy_time::Duration;

/// Electrical timing for the scan loop.
#[derive(Clone, Copy, Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct ScanConfig {
    /// Settle delay between driving a row and sampling its columns.
    ///
    /// The lines need time to discharge through the pull-ups; sampling too
    /// early reads phantom presses on adjacent columns.
    pub settle_time: Duration,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            settle_time: Duration::from_micros(30),
        }
    }
}
