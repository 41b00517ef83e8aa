//! Commit policies for moving raw scan results into the committed matrix.
//!
//! [`WindowedCommit`] holds raw readings in a shadow buffer until the whole
//! matrix has been quiet for a fixed window, then commits it wholesale.
//! [`ImmediateCommit`] writes raw readings straight through; it is the
//! zero-debounce mode. The policy is chosen once, at construction, as a type
//! parameter of [`crate::matrix::Matrix`] rather than by conditional
//! compilation.

use embassy_time::Instant;

use crate::matrix::RowMask;

pub mod immediate;
pub mod windowed;

pub use immediate::ImmediateCommit;
pub use windowed::WindowedCommit;

/// Strategy deciding when a raw reading becomes visible committed state.
pub trait CommitPolicy<const ROWS: usize> {
    /// Store one row's merged reading. Returns true if it differs from the
    /// previous reading of that row.
    fn record(&mut self, matrix: &mut [RowMask; ROWS], row: usize, bits: RowMask) -> bool;

    /// Commit pending changes if the policy allows it. `last_activity` is
    /// the timestamp of the most recent raw bit transition anywhere in the
    /// matrix.
    fn commit(&mut self, matrix: &mut [RowMask; ROWS], last_activity: Instant);

    /// Drop all staged state. Called on power-up.
    fn reset(&mut self);

    /// True while a change is staged but not yet committed.
    fn pending(&self) -> bool;
}
