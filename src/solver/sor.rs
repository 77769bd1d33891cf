//! Successive Over-Relaxation.

use crate::{error::Error, Result};

use tracing::debug;

pub const DEFAULT_RELAXATION: f64 = 1.6;
pub const DEFAULT_TOLERANCE: f64 = 0.01;
pub const DEFAULT_MAX_SWEEPS: usize = 10_000;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SorParams {
  /// Relaxation parameter $w in (1, 2)$.
  pub relaxation: f64,
  /// Stop once the largest per-entry change of a sweep is at most this.
  pub tolerance: f64,
  /// `None` sweeps until convergence, however long that takes.
  pub max_sweeps: Option<usize>,
}

impl Default for SorParams {
  fn default() -> Self {
    Self::new(DEFAULT_RELAXATION, DEFAULT_TOLERANCE)
  }
}

impl SorParams {
  pub fn new(relaxation: f64, tolerance: f64) -> Self {
    Self {
      relaxation,
      tolerance,
      max_sweeps: Some(DEFAULT_MAX_SWEEPS),
    }
  }

  pub fn with_max_sweeps(mut self, max_sweeps: Option<usize>) -> Self {
    self.max_sweeps = max_sweeps;
    self
  }

  pub fn validate(&self) -> Result<()> {
    let w = self.relaxation;
    if !(w > 1.0 && w < 2.0) {
      return Err(Error::InvalidRelaxation { relaxation: w });
    }
    if !(self.tolerance > 0.0) {
      return Err(Error::InvalidTolerance {
        tolerance: self.tolerance,
      });
    }
    if self.max_sweeps == Some(0) {
      return Err(Error::InvalidSweepLimit);
    }
    Ok(())
  }
}

#[derive(Debug, Clone)]
pub struct Sor {
  matrix: na::DMatrix<f64>,
}

impl Sor {
  pub fn new(matrix: na::DMatrix<f64>) -> Result<Self> {
    let (nrows, ncols) = matrix.shape();
    if nrows != ncols {
      return Err(Error::NotSquare { nrows, ncols });
    }
    if let Some(row) = (0..nrows).find(|&i| matrix[(i, i)] == 0.0) {
      return Err(Error::ZeroDiagonal { row });
    }
    Ok(Self { matrix })
  }

  pub fn size(&self) -> usize {
    self.matrix.nrows()
  }
  pub fn matrix(&self) -> &na::DMatrix<f64> {
    &self.matrix
  }

  /// Iterates from the zero vector until a sweep changes no entry by more than the tolerance.
  pub fn solve(&self, rhs: &na::DVector<f64>, params: &SorParams) -> Result<na::DVector<f64>> {
    let n = self.size();
    if rhs.len() != n {
      return Err(Error::DimensionMismatch {
        expected: n,
        got: rhs.len(),
      });
    }
    params.validate()?;

    let mut x = na::DVector::zeros(n);
    let mut nsweeps = 0;
    loop {
      let change = self.sweep(&mut x, rhs, params.relaxation)?;
      nsweeps += 1;

      if !change.is_finite() {
        return Err(Error::Diverged { sweeps: nsweeps });
      }
      if change <= params.tolerance {
        debug!(nsweeps, change, "sor converged");
        return Ok(x);
      }
      if params.max_sweeps.is_some_and(|max| nsweeps >= max) {
        return Err(Error::NotConverged {
          sweeps: nsweeps,
          change,
        });
      }
    }
  }

  /// One in-place Gauss-Seidel sweep with relaxation. Returns the largest absolute change.
  ///
  /// Fails with a dimension mismatch unless `x` and `rhs` have the size of the matrix.
  pub fn sweep(
    &self,
    x: &mut na::DVector<f64>,
    rhs: &na::DVector<f64>,
    relaxation: f64,
  ) -> Result<f64> {
    let n = self.size();
    if let Some(got) = [x.len(), rhs.len()].into_iter().find(|&len| len != n) {
      return Err(Error::DimensionMismatch { expected: n, got });
    }

    let a = &self.matrix;
    let mut max_change: f64 = 0.0;
    for i in 0..self.size() {
      let sum: f64 = (0..self.size())
        .filter(|&j| j != i)
        .map(|j| a[(i, j)] * x[j])
        .sum();

      let old = x[i];
      x[i] = old + relaxation * ((rhs[i] - sum) / a[(i, i)] - old);
      max_change = max_change.max((x[i] - old).abs());
      if x[i].is_nan() {
        return Ok(f64::NAN);
      }
    }
    Ok(max_change)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  use approx::assert_relative_eq;

  #[rustfmt::skip]
  fn tridiagonal() -> na::DMatrix<f64> {
    na::DMatrix::from_row_slice(3, 3, &[
       1.0, -0.25,  0.0,
      -0.25, 1.0, -0.25,
       0.0, -0.25,  1.0,
    ])
  }

  #[test]
  fn converges_on_diagonally_dominant_system() {
    let sor = Sor::new(tridiagonal()).unwrap();
    let rhs = na::DVector::from_element(3, 1.0);
    let params = SorParams::new(1.2, 1e-12);
    let x = sor.solve(&rhs, &params).unwrap();
    let expected = na::DVector::from_vec(vec![10.0 / 7.0, 12.0 / 7.0, 10.0 / 7.0]);
    assert_relative_eq!(x, expected, epsilon = 1e-9);
  }

  #[test]
  fn single_unknown_reaches_forcing() {
    let sor = Sor::new(na::DMatrix::identity(1, 1)).unwrap();
    let rhs = na::DVector::from_element(1, 1.0);
    let x = sor.solve(&rhs, &SorParams::new(1.6, 1e-12)).unwrap();
    assert_relative_eq!(x[0], 1.0, epsilon = 1e-10);
  }

  #[test]
  fn sweep_uses_updated_values() {
    let sor = Sor::new(tridiagonal()).unwrap();
    let rhs = na::DVector::from_element(3, 1.0);
    let mut x = na::DVector::zeros(3);
    let change = sor.sweep(&mut x, &rhs, 1.5).unwrap();
    // x0 = 1.5, x1 = 1.5 (1 + 0.25 x0), x2 = 1.5 (1 + 0.25 x1)
    assert_relative_eq!(x[0], 1.5);
    assert_relative_eq!(x[1], 2.0625);
    assert_relative_eq!(x[2], 2.2734375);
    assert_relative_eq!(change, 2.2734375);
  }

  #[test]
  fn rejects_relaxation_at_interval_ends() {
    let sor = Sor::new(tridiagonal()).unwrap();
    let rhs = na::DVector::from_element(3, 1.0);
    for w in [1.0, 2.0, 0.5, f64::NAN] {
      let err = sor.solve(&rhs, &SorParams::new(w, 0.01)).unwrap_err();
      assert!(matches!(err, Error::InvalidRelaxation { .. }));
      assert!(err.is_parameter_error());
    }
  }

  #[test]
  fn rejects_non_positive_tolerance() {
    let sor = Sor::new(tridiagonal()).unwrap();
    let rhs = na::DVector::from_element(3, 1.0);
    for es in [0.0, -1e-3] {
      let err = sor.solve(&rhs, &SorParams::new(1.5, es)).unwrap_err();
      assert!(matches!(err, Error::InvalidTolerance { .. }));
    }
    let params = SorParams::new(1.5, 0.01).with_max_sweeps(Some(0));
    assert!(matches!(
      sor.solve(&rhs, &params),
      Err(Error::InvalidSweepLimit)
    ));
  }

  #[test]
  fn rhs_size_mismatch() {
    let sor = Sor::new(tridiagonal()).unwrap();
    let err = sor
      .solve(&na::DVector::zeros(4), &SorParams::default())
      .unwrap_err();
    assert!(err.is_dimension_error());
  }

  #[test]
  fn gives_up_on_non_convergent_system() {
    let a = na::DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
    let sor = Sor::new(a).unwrap();
    let rhs = na::DVector::from_element(2, 1.0);
    let params = SorParams::new(1.5, 1e-6).with_max_sweeps(Some(50));
    let err = sor.solve(&rhs, &params).unwrap_err();
    assert!(matches!(err, Error::NotConverged { sweeps: 50, .. }));
  }

  #[test]
  fn sweep_size_mismatch() {
    let sor = Sor::new(na::DMatrix::identity(3, 3)).unwrap();
    let rhs = na::DVector::from_element(3, 1.0);

    let mut short = na::DVector::zeros(2);
    let err = sor.sweep(&mut short, &rhs, 1.5).unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 3, got: 2 }));
    assert_eq!(short, na::DVector::zeros(2));

    let mut x = na::DVector::zeros(3);
    let err = sor
      .sweep(&mut x, &na::DVector::from_element(4, 1.0), 1.5)
      .unwrap_err();
    assert!(matches!(err, Error::DimensionMismatch { expected: 3, got: 4 }));
  }

  /// Relaxed sweeps on an indefinite system grow without bound until they overflow.
  #[test]
  fn overflow_is_reported_as_divergence() {
    let a = na::DMatrix::from_row_slice(2, 2, &[1.0, 2.0, 2.0, 1.0]);
    let sor = Sor::new(a).unwrap();
    let rhs = na::DVector::from_element(2, 1.0);
    let params = SorParams::new(1.9, 1e-12).with_max_sweeps(None);
    let err = sor.solve(&rhs, &params).unwrap_err();
    assert!(matches!(err, Error::Diverged { .. }), "{err}");
    assert!(err.is_numerical_error());
  }

  #[test]
  fn rejects_zero_diagonal() {
    let a = na::DMatrix::from_row_slice(2, 2, &[1.0, 0.5, 0.5, 0.0]);
    assert!(matches!(Sor::new(a), Err(Error::ZeroDiagonal { row: 1 })));
  }
}
