//! Direct and iterative solvers for the dense Poisson LSE.

pub mod cholesky;
pub mod sor;

pub use cholesky::Cholesky;
pub use sor::{Sor, SorParams};

use std::fmt;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum SolverKind {
  /// Factor once, then forward and backward substitution.
  #[default]
  Cholesky,
  /// Successive Over-Relaxation.
  Sor,
}

impl fmt::Display for SolverKind {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      Self::Cholesky => write!(f, "cholesky"),
      Self::Sor => write!(f, "sor"),
    }
  }
}
