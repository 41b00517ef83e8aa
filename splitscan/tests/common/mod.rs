#![allow(dead_code)]

pub mod test_block_on;

use core::convert::Infallible;
use std::cell::RefCell;
use std::rc::Rc;

use embassy_time::Duration;
use embedded_hal::digital::{ErrorType, InputPin, OutputPin};
use splitscan::config::ScanConfig;
use splitscan::debounce::{ImmediateCommit, WindowedCommit};
use splitscan::expander::ExpanderBridge;
use splitscan::light::NoLight;
use splitscan::matrix::{Matrix, RowMask};

// Init logger for tests
#[ctor::ctor]
fn init_log() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Debug)
        .is_test(true)
        .try_init();
}

pub const ROWS: usize = 3;
pub const NATIVE_COLS: usize = 4;
pub const EXP_COLS: usize = 4;
pub const TOTAL_COLS: usize = NATIVE_COLS + EXP_COLS;

/// Electrical state shared between the simulated pins and expander.
pub struct SimBoard {
    /// Physically held keys, indexed `[row][logical column]`.
    pub held: [[bool; TOTAL_COLS]; ROWS],
    /// Natively driven row, if any.
    pub selected: Option<usize>,
    /// Row mirrored to the expander.
    pub exp_selected: Option<usize>,
    /// Whether the next `init` succeeds.
    pub exp_init_ok: bool,
    /// Set by a successful `init`.
    pub exp_inited: bool,
    /// Bits a misbehaving expander reports above its column count.
    pub exp_rogue_bits: RowMask,
    pub make_ready_calls: usize,
}

pub type Shared = Rc<RefCell<SimBoard>>;

pub fn sim_board() -> Shared {
    Rc::new(RefCell::new(SimBoard {
        held: [[false; TOTAL_COLS]; ROWS],
        selected: None,
        exp_selected: None,
        exp_init_ok: true,
        exp_inited: false,
        exp_rogue_bits: 0,
        make_ready_calls: 0,
    }))
}

pub fn press(board: &Shared, row: usize, col: usize) {
    board.borrow_mut().held[row][col] = true;
}

pub fn release(board: &Shared, row: usize, col: usize) {
    board.borrow_mut().held[row][col] = false;
}

pub struct SimRowPin {
    board: Shared,
    row: usize,
}

impl ErrorType for SimRowPin {
    type Error = Infallible;
}

impl OutputPin for SimRowPin {
    fn set_low(&mut self) -> Result<(), Infallible> {
        self.board.borrow_mut().selected = Some(self.row);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Infallible> {
        let mut b = self.board.borrow_mut();
        if b.selected == Some(self.row) {
            b.selected = None;
        }
        Ok(())
    }
}

pub struct SimColPin {
    board: Shared,
    col: usize,
}

impl ErrorType for SimColPin {
    type Error = Infallible;
}

impl InputPin for SimColPin {
    fn is_high(&mut self) -> Result<bool, Infallible> {
        Ok(!self.is_low()?)
    }

    fn is_low(&mut self) -> Result<bool, Infallible> {
        let b = self.board.borrow();
        Ok(match b.selected {
            Some(row) => b.held[row][self.col],
            None => false,
        })
    }
}

pub struct SimExpander {
    pub board: Shared,
}

impl ExpanderBridge for SimExpander {
    const COLS: usize = EXP_COLS;

    async fn init(&mut self) -> bool {
        let mut b = self.board.borrow_mut();
        b.exp_inited = b.exp_init_ok;
        b.exp_inited
    }

    async fn make_ready(&mut self) {
        self.board.borrow_mut().make_ready_calls += 1;
    }

    async fn select_row(&mut self, row: u8) {
        self.board.borrow_mut().exp_selected = Some(row as usize);
    }

    async fn unselect_rows(&mut self) {
        self.board.borrow_mut().exp_selected = None;
    }

    async fn read_bits(&mut self, row: u8) -> RowMask {
        let b = self.board.borrow();
        if !b.exp_inited {
            return 0;
        }
        // The engine must mirror its native row drive before reading.
        assert_eq!(b.exp_selected, Some(row as usize));
        let mut bits = b.exp_rogue_bits;
        for k in 0..EXP_COLS {
            if b.held[row as usize][NATIVE_COLS + k] {
                bits |= 1 << k;
            }
        }
        bits
    }
}

pub type WindowedMatrix =
    Matrix<SimRowPin, SimColPin, SimExpander, WindowedCommit<ROWS>, NoLight, ROWS, NATIVE_COLS>;
pub type ImmediateMatrix =
    Matrix<SimRowPin, SimColPin, SimExpander, ImmediateCommit, NoLight, ROWS, NATIVE_COLS>;

pub fn row_pins(board: &Shared) -> [SimRowPin; ROWS] {
    core::array::from_fn(|row| SimRowPin {
        board: board.clone(),
        row,
    })
}

pub fn col_pins(board: &Shared) -> [SimColPin; NATIVE_COLS] {
    core::array::from_fn(|col| SimColPin {
        board: board.clone(),
        col,
    })
}

pub fn windowed_matrix(board: &Shared, window_ms: u64) -> WindowedMatrix {
    Matrix::new(
        row_pins(board),
        col_pins(board),
        SimExpander {
            board: board.clone(),
        },
        WindowedCommit::new(Duration::from_millis(window_ms)),
        NoLight,
        ScanConfig::default(),
    )
}

pub fn immediate_matrix(board: &Shared) -> ImmediateMatrix {
    Matrix::new(
        row_pins(board),
        col_pins(board),
        SimExpander {
            board: board.clone(),
        },
        ImmediateCommit,
        NoLight,
        ScanConfig::default(),
    )
}
