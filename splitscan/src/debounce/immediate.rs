//! Write-through commit (debounce disabled).

use embassy_time::Instant;

use super::CommitPolicy;
use crate::matrix::RowMask;

/// Writes each row's raw reading straight into the committed matrix; every
/// change is visible in the same scan cycle that produced it.
pub struct ImmediateCommit;

impl<const ROWS: usize> CommitPolicy<ROWS> for ImmediateCommit {
    fn record(&mut self, matrix: &mut [RowMask; ROWS], row: usize, bits: RowMask) -> bool {
        let changed = matrix[row] != bits;
        if changed {
            // Same torn-read guarantee as the windowed commit, bounded to a
            // single row store.
            critical_section::with(|_| {
                matrix[row] = bits;
            });
        }
        changed
    }

    fn commit(&mut self, _matrix: &mut [RowMask; ROWS], _last_activity: Instant) {}

    fn reset(&mut self) {}

    fn pending(&self) -> bool {
        false
    }
}
