//! I/O-expander bridge.
//!
//! Columns beyond the native pin count live on an I2C-attached expander
//! chip. The engine only needs bring-up, row-select mirroring and a per-row
//! bit read; register-level programming stays inside the implementation.
//!
//! Failures are swallowed at this layer: a read that cannot complete reports
//! zero bits, i.e. "nothing pressed", and the next cycle retries naturally.
//! The scanner never sees an error from the bridge.

use crate::matrix::RowMask;

/// External collaborator providing the expander-side columns.
pub trait ExpanderBridge {
    /// Number of columns provided by the expander.
    const COLS: usize;

    /// One-time bring-up. A `false` result is non-fatal: the engine keeps
    /// the expander bit range at zero and retries on the next
    /// [`crate::matrix::Matrix::power_up`].
    async fn init(&mut self) -> bool;

    /// Per-cycle preparation, called once before any row read. Idempotent.
    async fn make_ready(&mut self);

    /// Mirror the native row drive on the expander side, so expander columns
    /// are read against the same row-select line.
    async fn select_row(&mut self, row: u8);

    /// Release all expander-side row drives.
    async fn unselect_rows(&mut self);

    /// Column bits for the currently selected row, in bits `[0, COLS)`,
    /// 1 = pressed. Implementations return 0 on any bus failure.
    async fn read_bits(&mut self, row: u8) -> RowMask;
}

/// Bridge for boards with no expander fitted.
pub struct NoExpander;

impl ExpanderBridge for NoExpander {
    const COLS: usize = 0;

    async fn init(&mut self) -> bool {
        true
    }

    async fn make_ready(&mut self) {}

    async fn select_row(&mut self, _row: u8) {}

    async fn unselect_rows(&mut self) {}

    async fn read_bits(&mut self, _row: u8) -> RowMask {
        0
    }
}
