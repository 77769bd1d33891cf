//! Finite difference assembly of the Poisson system on a glyph grid.
//!
//! 5-point stencil, scaled such that the diagonal is one:
//! $u_(r,c) - 1/4 (u_(r-1,c) + u_(r+1,c) + u_(r,c-1) + u_(r,c+1)) = f$.
//! Boundary cells are fixed to zero and drop out of the system.

use crate::{error::Error, grid::Grid, util, Result};

use tracing::{debug, warn};

pub const STENCIL_CENTER: f64 = 1.0;
pub const STENCIL_NEIGHBOR: f64 = -0.25;
pub const DEFAULT_FORCING: f64 = 1.0;

/// Dense LSE $A x = b$ together with the grid it was assembled on.
#[derive(Debug, Clone)]
pub struct PoissonSystem {
  grid: Grid,
  matrix: na::DMatrix<f64>,
  rhs: na::DVector<f64>,
}

impl PoissonSystem {
  pub fn grid(&self) -> &Grid {
    &self.grid
  }
  pub fn matrix(&self) -> &na::DMatrix<f64> {
    &self.matrix
  }
  pub fn rhs(&self) -> &na::DVector<f64> {
    &self.rhs
  }
  pub fn nunknowns(&self) -> usize {
    self.rhs.len()
  }

  pub fn into_parts(self) -> (Grid, na::DMatrix<f64>, na::DVector<f64>) {
    (self.grid, self.matrix, self.rhs)
  }
}

pub fn assemble_poisson_system(grid: Grid, forcing: f64) -> Result<PoissonSystem> {
  let matrix = assemble_poisson_matrix(&grid)?;
  let rhs = assemble_poisson_vector(grid.nunknowns(), forcing);
  Ok(PoissonSystem { grid, matrix, rhs })
}

pub fn assemble_poisson_matrix(grid: &Grid) -> Result<na::DMatrix<f64>> {
  let nunknowns = grid.nunknowns();
  debug!(nunknowns, nrows = grid.nrows(), "assembling poisson matrix");

  let ncomponents = grid.ncomponents();
  if ncomponents > 1 {
    warn!(ncomponents, "domain consists of disconnected regions");
  }

  let mut matrix = na::DMatrix::from_diagonal_element(nunknowns, nunknowns, STENCIL_CENTER);

  for (iunknown, (irow, icol)) in grid.unknown_positions().enumerate() {
    // Horizontal neighbors are adjacent in the scan order.
    if grid.is_unknown(irow, icol + 1) {
      util::set_entry(&mut matrix, iunknown, iunknown + 1, STENCIL_NEIGHBOR)?;
    }
    if icol > 0 && grid.is_unknown(irow, icol - 1) {
      let junknown = iunknown
        .checked_sub(1)
        .ok_or(Error::out_of_range("unknown", iunknown, nunknowns))?;
      util::set_entry(&mut matrix, iunknown, junknown, STENCIL_NEIGHBOR)?;
    }

    // The row below was scanned before this one.
    if grid.is_unknown(irow + 1, icol) {
      let dist = grid.unknown_distance((irow, icol), (irow + 1, icol))?;
      let junknown = iunknown
        .checked_sub(dist)
        .ok_or(Error::out_of_range("unknown", iunknown, nunknowns))?;
      util::set_entry(&mut matrix, iunknown, junknown, STENCIL_NEIGHBOR)?;
    }
    if irow > 0 && grid.is_unknown(irow - 1, icol) {
      let dist = grid.unknown_distance((irow, icol), (irow - 1, icol))?;
      util::set_entry(&mut matrix, iunknown, iunknown + dist, STENCIL_NEIGHBOR)?;
    }
  }

  debug_assert!(util::is_symmetric(&matrix));
  Ok(matrix)
}

pub fn assemble_poisson_vector(nunknowns: usize, forcing: f64) -> na::DVector<f64> {
  na::DVector::from_element(nunknowns, forcing)
}
