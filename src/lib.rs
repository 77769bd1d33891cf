extern crate nalgebra as na;

pub mod assemble;
pub mod config;
pub mod error;
pub mod grid;
pub mod io;
pub mod output;
pub mod plot;
pub mod poisson;
pub mod solver;
pub mod util;

pub use error::{Error, Result};

/// Position of an unknown cell in the flattened solution ordering.
pub type UnknownIdx = usize;
/// `(row, col)` of a cell in the grid.
pub type CellPos = (usize, usize);
