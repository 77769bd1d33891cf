//! Dense Cholesky factorization $A = L L^T$.

use crate::{error::Error, Result};

use tracing::debug;

/// Factored SPD matrix. Solves any number of right-hand sides without refactoring.
///
/// Symmetry of the input is assumed and not checked; only the lower triangle is read.
#[derive(Debug, Clone)]
pub struct Cholesky {
  lower: na::DMatrix<f64>,
}

impl Cholesky {
  pub fn new(matrix: &na::DMatrix<f64>) -> Result<Self> {
    let (nrows, ncols) = matrix.shape();
    if nrows != ncols {
      return Err(Error::NotSquare { nrows, ncols });
    }
    let n = nrows;
    debug!(n, "cholesky factorization");

    let mut lower = na::DMatrix::zeros(n, n);
    for k in 0..n {
      for i in 0..k {
        let sum: f64 = (0..i).map(|j| lower[(i, j)] * lower[(k, j)]).sum();
        lower[(k, i)] = (matrix[(k, i)] - sum) / lower[(i, i)];
      }

      let sum: f64 = (0..k).map(|j| lower[(k, j)] * lower[(k, j)]).sum();
      let radicand = matrix[(k, k)] - sum;
      if radicand.is_nan() || radicand <= 0.0 {
        return Err(Error::NotPositiveDefinite { row: k, radicand });
      }
      lower[(k, k)] = radicand.sqrt();
    }

    Ok(Self { lower })
  }

  pub fn size(&self) -> usize {
    self.lower.nrows()
  }

  /// The lower triangular factor $L$.
  pub fn lower(&self) -> &na::DMatrix<f64> {
    &self.lower
  }

  pub fn entry(&self, i: usize, j: usize) -> Result<f64> {
    let n = self.size();
    if i >= n {
      return Err(Error::out_of_range("factor row", i, n));
    }
    if j >= n {
      return Err(Error::out_of_range("factor column", j, n));
    }
    Ok(self.lower[(i, j)])
  }

  pub fn row(&self, i: usize) -> Result<na::RowDVector<f64>> {
    if i >= self.size() {
      return Err(Error::out_of_range("factor row", i, self.size()));
    }
    Ok(self.lower.row(i).into_owned())
  }

  /// $L L^T$
  pub fn reconstruct(&self) -> na::DMatrix<f64> {
    &self.lower * self.lower.transpose()
  }

  /// Forward substitution $L y = b$ followed by backward substitution $L^T x = y$.
  pub fn solve(&self, rhs: &na::DVector<f64>) -> Result<na::DVector<f64>> {
    let n = self.size();
    if rhs.len() != n {
      return Err(Error::DimensionMismatch {
        expected: n,
        got: rhs.len(),
      });
    }
    let l = &self.lower;

    let mut y = na::DVector::zeros(n);
    for i in 0..n {
      let sum: f64 = (0..i).map(|j| l[(i, j)] * y[j]).sum();
      y[i] = (rhs[i] - sum) / l[(i, i)];
    }

    let mut x = na::DVector::zeros(n);
    for i in (0..n).rev() {
      let sum: f64 = (i + 1..n).map(|j| l[(j, i)] * x[j]).sum();
      x[i] = (y[i] - sum) / l[(i, i)];
    }

    Ok(x)
  }
}
