//! Maps the flat solution back onto the grid and renders it as CSV rows.
//!
//! Unknowns are indexed bottom-up, while the output is written top-down.
//! Each row therefore takes its values from a contiguous slice at the tail
//! of the not yet consumed part of the solution.

use crate::{
  error::Error,
  grid::{Cell, Grid},
  util::format_significant,
  Result,
};

use itertools::Itertools;
use once_cell::unsync::OnceCell;

use std::{
  fs::File,
  io::{BufWriter, Write},
  path::Path,
};

pub const DEFAULT_SIGNIFICANT_DIGITS: usize = 8;

#[derive(Debug, Clone)]
pub struct CsvOutputter {
  grid: Grid,
  solution: na::DVector<f64>,
  significant_digits: usize,
  ordered: OnceCell<Vec<String>>,
}

impl CsvOutputter {
  pub fn new(grid: Grid, solution: na::DVector<f64>) -> Result<Self> {
    if solution.len() != grid.nunknowns() {
      return Err(Error::DimensionMismatch {
        expected: grid.nunknowns(),
        got: solution.len(),
      });
    }
    Ok(Self {
      grid,
      solution,
      significant_digits: DEFAULT_SIGNIFICANT_DIGITS,
      ordered: OnceCell::new(),
    })
  }

  /// Has no effect on rows that were already ordered.
  pub fn with_significant_digits(mut self, significant_digits: usize) -> Self {
    self.significant_digits = significant_digits.max(1);
    self
  }

  pub fn grid(&self) -> &Grid {
    &self.grid
  }
  pub fn solution(&self) -> &na::DVector<f64> {
    &self.solution
  }

  pub fn is_ordered(&self) -> bool {
    self.ordered.get().is_some()
  }
  pub fn ordered(&self) -> Option<&[String]> {
    self.ordered.get().map(Vec::as_slice)
  }

  /// Computes the ordered rows on the first call, later calls return the cached rows.
  pub fn order(&self) -> Result<&[String]> {
    self
      .ordered
      .get_or_try_init(|| self.map_rows())
      .map(Vec::as_slice)
  }

  fn map_rows(&self) -> Result<Vec<String>> {
    let rows = self
      .cell_values()?
      .iter()
      .map(|row| {
        row
          .iter()
          .map(|&v| match v {
            Some(v) => format_significant(v, self.significant_digits),
            None => "0".to_owned(),
          })
          .join(",")
      })
      .collect();
    Ok(rows)
  }

  /// The solution laid out on the grid, top row first. Boundary cells are `None`.
  pub fn cell_values(&self) -> Result<Vec<Vec<Option<f64>>>> {
    let solution = self.solution.as_slice();
    let mut remaining = self.grid.nunknowns();

    self
      .grid
      .rows()
      .iter()
      .enumerate()
      .map(|(irow, row)| {
        let row_nunknowns = self.grid.row_nunknowns(irow)?;
        let start = remaining
          .checked_sub(row_nunknowns)
          .ok_or(Error::out_of_range("unknown", row_nunknowns, remaining))?;
        let mut values = solution
          .get(start..remaining)
          .ok_or(Error::out_of_range("solution", remaining, solution.len()))?
          .iter()
          .copied();
        remaining = start;

        Ok(
          row
            .iter()
            // `values` holds exactly one entry per unknown cell of this row.
            .map(|cell| match cell {
              Cell::Boundary => None,
              Cell::Unknown => values.next(),
            })
            .collect(),
        )
      })
      .collect()
  }

  /// Writes one line per grid row. Fails if [`Self::order`] was never called.
  pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
    let rows = self.ordered().ok_or(Error::NotOrdered)?;
    for row in rows {
      writeln!(writer, "{row}")?;
    }
    writer.flush()?;
    Ok(())
  }

  pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
    if !self.is_ordered() {
      return Err(Error::NotOrdered);
    }
    let file = File::create(path)?;
    self.write(BufWriter::new(file))
  }
}
