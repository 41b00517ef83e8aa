//! Core scanning engine: raw matrix scan, debounced commit, power hooks and
//! the read-only query surface.
//!
//! One engine instance owns the committed key state exclusively; external
//! consumers (key-event translation, debug dumps) read it only through the
//! accessors here, so they always see debounced, whole-row-consistent state.

use core::fmt;

use embassy_time::{Duration, Instant, Timer};
use heapless::String;

use crate::config::ScanConfig;
use crate::debounce::CommitPolicy;
use crate::expander::ExpanderBridge;
use crate::gpio::{ColPin, RowPin};
use crate::light::StatusLight;

/// Bit-packed state of one matrix row, one bit per logical column,
/// 1 = pressed. Native columns occupy bits `[0, NATIVE_COLS)`, expander
/// columns the range directly above.
pub type RowMask = u16;

/// Capacity of [`Matrix::dump_string`]: header line plus one 21-byte line
/// per row, sized for a 32-row ceiling.
pub const DUMP_CAPACITY: usize = 20 + 21 * 32;

/// Times the status light blinks on wake.
const WAKE_BLINKS: u8 = 3;

/// Interval between scan-rate log lines.
const SCAN_RATE_INTERVAL: Duration = Duration::from_secs(1);

/// The matrix scanning engine.
///
/// `ROWS` native row drive pins, `NATIVE_COLS` native column sense pins,
/// plus `E::COLS` further columns behind the expander bridge. The commit
/// policy `P` decides when raw readings become visible committed state.
pub struct Matrix<R, C, E, P, L, const ROWS: usize, const NATIVE_COLS: usize> {
    row_pins: [R; ROWS],
    col_pins: [C; NATIVE_COLS],
    expander: E,
    policy: P,
    light: L,
    config: ScanConfig,
    /// Committed (debounced) key state, one mask per row.
    matrix: [RowMask; ROWS],
    /// Set once the expander has answered a successful `init`. While unset
    /// the expander bit range reads as all-zero.
    expander_ready: bool,
    /// Timestamp of the last raw bit transition anywhere in the matrix.
    last_activity: Instant,
    scan_timer: Instant,
    scan_count: u32,
}

impl<R, C, E, P, L, const ROWS: usize, const NATIVE_COLS: usize>
    Matrix<R, C, E, P, L, ROWS, NATIVE_COLS>
where
    R: RowPin,
    C: ColPin,
    E: ExpanderBridge,
    P: CommitPolicy<ROWS>,
    L: StatusLight,
{
    /// Build an engine from its pins and collaborators.
    ///
    /// Call [`Self::power_up`] before the first scan: it parks the row
    /// drives, brings up the expander and zeroes all buffers.
    ///
    /// Panics if the configured geometry cannot be represented. Row and
    /// column counts are wiring facts, so a bad value is caught here rather
    /// than surfaced as a runtime error later.
    pub fn new(
        row_pins: [R; ROWS],
        col_pins: [C; NATIVE_COLS],
        expander: E,
        policy: P,
        light: L,
        config: ScanConfig,
    ) -> Self {
        assert!(ROWS > 0, "matrix needs at least one row");
        assert!(
            NATIVE_COLS + E::COLS <= RowMask::BITS as usize,
            "native + expander columns must fit a row mask"
        );
        let now = Instant::now();
        Self {
            row_pins,
            col_pins,
            expander,
            policy,
            light,
            config,
            matrix: [0; ROWS],
            expander_ready: false,
            last_activity: now,
            scan_timer: now,
            scan_count: 0,
        }
    }

    /// Run one scan cycle over all rows.
    ///
    /// Returns true iff any row's raw reading differed from the previous
    /// cycle. Committed state becomes visible through the query surface
    /// according to the commit policy.
    pub async fn scan(&mut self) -> bool {
        if self.expander_active() {
            self.expander.make_ready().await;
        }

        let mut changed = false;
        for row in 0..ROWS {
            let bits = self.read_row(row).await;
            if self.policy.record(&mut self.matrix, row, bits) {
                self.last_activity = Instant::now();
                changed = true;
            }
        }

        self.policy.commit(&mut self.matrix, self.last_activity);
        self.count_scan();
        changed
    }

    /// Select one row, settle, sample native and expander columns, merge
    /// into a single mask, deselect.
    ///
    /// Rows are only ever driven one at a time; two simultaneously active
    /// rows would ghost through closed switches on shared columns.
    async fn read_row(&mut self, row: usize) -> RowMask {
        self.row_pins[row].select();
        if self.expander_active() {
            self.expander.select_row(row as u8).await;
        }
        // Mandatory: sampling before the lines settle reads phantom presses
        // on adjacent columns.
        Timer::after(self.config.settle_time).await;

        let mut bits: RowMask = 0;
        for (col, pin) in self.col_pins.iter_mut().enumerate() {
            if pin.is_pressed() {
                bits |= 1 << col;
            }
        }
        if self.expander_active() {
            bits |= (self.expander.read_bits(row as u8).await & Self::expander_mask())
                << NATIVE_COLS;
        }

        self.row_pins[row].unselect();
        bits
    }

    /// Re-arm the engine after power-on or wake.
    ///
    /// Parks every row drive, retries expander bring-up if it has not yet
    /// succeeded, zeroes committed and staged state and restarts the
    /// activity clock. Idempotent; safe to call after any wake event.
    pub async fn power_up(&mut self) {
        for pin in self.row_pins.iter_mut() {
            pin.unselect();
        }
        if !self.expander_ready {
            self.expander_ready = self.expander.init().await;
            if !self.expander_ready {
                warn!("expander init failed, expander columns read as released");
            }
        }
        if self.expander_active() {
            self.expander.unselect_rows().await;
        }
        critical_section::with(|_| {
            self.matrix = [0; ROWS];
        });
        self.policy.reset();
        let now = Instant::now();
        self.last_activity = now;
        self.scan_timer = now;
        self.scan_count = 0;
        self.light.enable(true);
        self.light.blink(WAKE_BLINKS);
        info!("matrix powered up");
    }

    /// Hook point for an external sleep controller to call before cutting
    /// power. Nothing to tear down today: rows are parked between cycles
    /// and all buffers are rebuilt by [`Self::power_up`].
    pub fn power_down(&mut self) {}

    /// Debounced state of one key. Out-of-range coordinates read as
    /// released.
    pub fn is_pressed(&self, row: usize, col: usize) -> bool {
        row < ROWS && col < RowMask::BITS as usize && (self.matrix[row] >> col) & 1 == 1
    }

    /// Committed bitmask of one row. Out-of-range rows read as zero.
    pub fn row_snapshot(&self, row: usize) -> RowMask {
        if row < ROWS { self.matrix[row] } else { 0 }
    }

    /// Tick of the most recent raw bit transition. Higher layers compare
    /// this against now to drive their sleep policy.
    pub fn last_activity(&self) -> Instant {
        self.last_activity
    }

    /// True while a change is staged awaiting its quiet window.
    pub fn is_debouncing(&self) -> bool {
        self.policy.pending()
    }

    /// Whether the expander bridge has completed `init`.
    pub fn expander_ready(&self) -> bool {
        self.expander_ready
    }

    /// Write a human-readable grid of the committed matrix: row index in
    /// hex, then one character per column, column 0 leftmost.
    pub fn dump<W: fmt::Write>(&self, w: &mut W) -> fmt::Result {
        w.write_str("r/c 0123456789ABCDEF\n")?;
        for row in 0..ROWS {
            write!(w, "{:02x}: ", row)?;
            for col in 0..RowMask::BITS {
                let ch = if (self.matrix[row] >> col) & 1 == 1 {
                    '1'
                } else {
                    '0'
                };
                w.write_char(ch)?;
            }
            w.write_char('\n')?;
        }
        Ok(())
    }

    /// [`Self::dump`] into a fixed-capacity string, truncated if the matrix
    /// is taller than the buffer.
    pub fn dump_string(&self) -> String<DUMP_CAPACITY> {
        let mut out = String::new();
        let _ = self.dump(&mut out);
        out
    }

    /// Expander participates in scanning only when fitted and brought up.
    fn expander_active(&self) -> bool {
        E::COLS > 0 && self.expander_ready
    }

    /// Mask confining expander readings to their declared column count, so
    /// a misbehaving bridge cannot leak bits into the native range or past
    /// the configured width.
    const fn expander_mask() -> RowMask {
        if E::COLS >= RowMask::BITS as usize {
            RowMask::MAX
        } else {
            ((1 as RowMask) << E::COLS) - 1
        }
    }

    fn count_scan(&mut self) {
        self.scan_count += 1;
        if self.scan_timer.elapsed() >= SCAN_RATE_INTERVAL {
            debug!("matrix scan rate: {} scans/s", self.scan_count);
            self.scan_timer = Instant::now();
            self.scan_count = 0;
        }
    }
}
