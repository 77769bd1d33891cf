//! Error types for grid parsing, system assembly and the linear solvers.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  /// The grid file could not be read.
  #[error("failed to read grid file `{}`", .path.display())]
  ReadGrid {
    path: PathBuf,
    #[source]
    source: std::io::Error,
  },

  /// Writing the ordered result failed.
  #[error("i/o error while writing result")]
  Io(#[from] std::io::Error),

  #[error("grid contains no rows")]
  EmptyGrid,

  #[error("grid contains no unknown cells")]
  NoUnknowns,

  /// A grid character is neither the unknown nor the boundary glyph.
  #[error("unrecognized glyph {glyph:?} at row {row}, column {col}")]
  InvalidGlyph { row: usize, col: usize, glyph: char },

  #[error("unknown and boundary glyph are both {glyph:?}")]
  AmbiguousGlyphs { glyph: char },

  #[error("dimension mismatch: expected {expected}, got {got}")]
  DimensionMismatch { expected: usize, got: usize },

  #[error("matrix is not square: {nrows}x{ncols}")]
  NotSquare { nrows: usize, ncols: usize },

  #[error("{what} index {index} out of range (len {len})")]
  IndexOutOfRange {
    what: &'static str,
    index: usize,
    len: usize,
  },

  #[error("invalid relaxation parameter: {relaxation} (must be in (1, 2))")]
  InvalidRelaxation { relaxation: f64 },

  #[error("invalid error tolerance: {tolerance} (must be > 0)")]
  InvalidTolerance { tolerance: f64 },

  #[error("sweep limit must be at least 1")]
  InvalidSweepLimit,

  #[error("invalid forcing constant: {forcing} (must be finite)")]
  InvalidForcing { forcing: f64 },

  #[error("number of significant digits must be at least 1")]
  InvalidDigits,

  /// The Cholesky radicand was not positive.
  #[error("matrix is not positive definite (radicand {radicand} in row {row})")]
  NotPositiveDefinite { row: usize, radicand: f64 },

  #[error("zero diagonal entry in row {row}")]
  ZeroDiagonal { row: usize },

  #[error("SOR did not converge after {sweeps} sweeps (last change {change})")]
  NotConverged { sweeps: usize, change: f64 },

  #[error("SOR diverged in sweep {sweeps}")]
  Diverged { sweeps: usize },

  /// The result was serialized before it was ordered.
  #[error("result has not been ordered yet")]
  NotOrdered,
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
  pub(crate) fn out_of_range(what: &'static str, index: usize, len: usize) -> Self {
    Self::IndexOutOfRange { what, index, len }
  }

  /// Unreadable or malformed domain description.
  pub fn is_input_error(&self) -> bool {
    matches!(
      self,
      Self::ReadGrid { .. } | Self::EmptyGrid | Self::NoUnknowns | Self::InvalidGlyph { .. }
    )
  }

  pub fn is_dimension_error(&self) -> bool {
    matches!(
      self,
      Self::DimensionMismatch { .. } | Self::NotSquare { .. }
    )
  }

  pub fn is_parameter_error(&self) -> bool {
    matches!(
      self,
      Self::InvalidRelaxation { .. }
        | Self::InvalidTolerance { .. }
        | Self::InvalidSweepLimit
        | Self::InvalidForcing { .. }
        | Self::InvalidDigits
        | Self::AmbiguousGlyphs { .. }
    )
  }

  pub fn is_index_error(&self) -> bool {
    matches!(self, Self::IndexOutOfRange { .. })
  }

  pub fn is_numerical_error(&self) -> bool {
    matches!(
      self,
      Self::NotPositiveDefinite { .. }
        | Self::ZeroDiagonal { .. }
        | Self::NotConverged { .. }
        | Self::Diverged { .. }
    )
  }
}
