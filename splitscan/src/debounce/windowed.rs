//! Quiet-window debounce.

use embassy_time::{Duration, Instant};

use super::CommitPolicy;
use crate::matrix::RowMask;

/// Commits the whole matrix once no bit anywhere has changed for `window`.
///
/// The window is measured from the single last-activity timestamp shared by
/// all rows, so a key still bouncing on one row holds back an unrelated
/// change on another. Bounce windows are single-digit milliseconds, well
/// under human reaction time, and one shared timer keeps the filter
/// constant-space.
pub struct WindowedCommit<const ROWS: usize> {
    window: Duration,
    /// Shadow of the most recent raw readings.
    staging: [RowMask; ROWS],
    /// True while `staging` differs from the committed matrix.
    pending: bool,
}

impl<const ROWS: usize> WindowedCommit<ROWS> {
    pub fn new(window: Duration) -> Self {
        Self {
            window,
            staging: [0; ROWS],
            pending: false,
        }
    }
}

impl<const ROWS: usize> CommitPolicy<ROWS> for WindowedCommit<ROWS> {
    fn record(&mut self, _matrix: &mut [RowMask; ROWS], row: usize, bits: RowMask) -> bool {
        let changed = self.staging[row] != bits;
        self.staging[row] = bits;
        if changed {
            self.pending = true;
        }
        changed
    }

    fn commit(&mut self, matrix: &mut [RowMask; ROWS], last_activity: Instant) {
        if self.pending && last_activity.elapsed() >= self.window {
            // An interrupt-context reader must never observe half of the old
            // matrix and half of the new one.
            critical_section::with(|_| {
                *matrix = self.staging;
            });
            self.pending = false;
            trace!("matrix settled, committed after {} ms quiet", self.window.as_millis());
        }
    }

    fn reset(&mut self) {
        self.staging = [0; ROWS];
        self.pending = false;
    }

    fn pending(&self) -> bool {
        self.pending
    }
}
