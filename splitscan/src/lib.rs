#![no_std]

//! Periodic keyboard-matrix scanning engine for split/expanded keyboards.
//!
//! The engine drives row/column GPIO lines plus an optional I2C-attached I/O
//! expander, merges both column sources into one bitmask per row, applies a
//! quiet-window debounce filter and tracks activity for power-management
//! decisions. Keycode mapping, report assembly and host transport live in
//! higher layers; they observe key state only through the read-only query
//! surface ([`matrix::Matrix::is_pressed`], [`matrix::Matrix::row_snapshot`]).
//!
//! A typical cycle, driven from the owner's main loop:
//!
//! ```ignore
//! let mut matrix: Matrix<_, _, _, _, _, ROWS, COLS> = Matrix::new(
//!     row_pins,
//!     col_pins,
//!     expander,
//!     WindowedCommit::new(Duration::from_millis(5)),
//!     NoLight,
//!     ScanConfig::default(),
//! );
//! matrix.power_up().await;
//! loop {
//!     matrix.scan().await;
//!     // translate / report from the committed snapshots
//! }
//! ```

#[macro_use]
mod fmt;

pub mod config;
pub mod debounce;
pub mod expander;
pub mod gpio;
pub mod light;
pub mod matrix;

pub use config::ScanConfig;
pub use debounce::{CommitPolicy, ImmediateCommit, WindowedCommit};
pub use expander::{ExpanderBridge, NoExpander};
pub use light::{NoLight, StatusLight};
pub use matrix::{Matrix, RowMask};
