//! Steady-state heat diffusion on a glyph grid: assembly, solve and output in one pass.

use crate::{
  assemble,
  config::PoissonConfig,
  grid::Grid,
  output::CsvOutputter,
  solver::{Cholesky, SolverKind, Sor, SorParams},
  Result,
};

use tracing::info;

use std::time::Instant;

pub fn solve_linear_system(
  matrix: na::DMatrix<f64>,
  rhs: &na::DVector<f64>,
  solver: SolverKind,
  sor_params: &SorParams,
) -> Result<na::DVector<f64>> {
  info!(%solver, n = rhs.len(), "starting solve");
  let start = Instant::now();

  let solution = match solver {
    SolverKind::Cholesky => Cholesky::new(&matrix)?.solve(rhs)?,
    SolverKind::Sor => Sor::new(matrix)?.solve(rhs, sor_params)?,
  };

  let elapsed_ms = start.elapsed().as_millis() as u64;
  info!(%solver, elapsed_ms, "finished solve");
  Ok(solution)
}

/// Returns the outputter with its rows already ordered.
pub fn solve_poisson(grid: Grid, config: &PoissonConfig) -> Result<CsvOutputter> {
  config.validate()?;

  let system = assemble::assemble_poisson_system(grid, config.forcing)?;
  let (grid, matrix, rhs) = system.into_parts();

  let solution = solve_linear_system(matrix, &rhs, config.solver, &config.sor)?;

  let outputter =
    CsvOutputter::new(grid, solution)?.with_significant_digits(config.significant_digits);
  outputter.order()?;
  Ok(outputter)
}
