//! Parameters of a complete grid-to-CSV run.

use crate::{
  assemble::DEFAULT_FORCING,
  error::Error,
  grid::Glyphs,
  output::DEFAULT_SIGNIFICANT_DIGITS,
  solver::{SolverKind, SorParams},
  Result,
};

#[derive(Debug, Clone, PartialEq)]
pub struct PoissonConfig {
  pub glyphs: Glyphs,
  /// Right-hand side value applied to every unknown.
  pub forcing: f64,
  pub solver: SolverKind,
  /// Only consulted when `solver` is [`SolverKind::Sor`].
  pub sor: SorParams,
  pub significant_digits: usize,
}

impl Default for PoissonConfig {
  fn default() -> Self {
    Self {
      glyphs: Glyphs::default(),
      forcing: DEFAULT_FORCING,
      solver: SolverKind::default(),
      sor: SorParams::default(),
      significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
    }
  }
}

impl PoissonConfig {
  pub fn with_solver(mut self, solver: SolverKind) -> Self {
    self.solver = solver;
    self
  }

  pub fn validate(&self) -> Result<()> {
    if !self.forcing.is_finite() {
      return Err(Error::InvalidForcing {
        forcing: self.forcing,
      });
    }
    if self.significant_digits == 0 {
      return Err(Error::InvalidDigits);
    }
    if self.solver == SolverKind::Sor {
      self.sor.validate()?;
    }
    Ok(())
  }
}
