use crate::{
  error::Error,
  grid::{Glyphs, Grid},
  output::CsvOutputter,
  Result,
};

use tracing::debug;

use std::{fs, path::Path};

/// Loads a grid file, one row per line.
pub fn read_grid(path: impl AsRef<Path>, glyphs: &Glyphs) -> Result<Grid> {
  let path = path.as_ref();
  let text = fs::read_to_string(path).map_err(|source| Error::ReadGrid {
    path: path.to_path_buf(),
    source,
  })?;
  let grid = Grid::parse(&text, glyphs)?;
  debug!(
    path = %path.display(),
    nrows = grid.nrows(),
    nunknowns = grid.nunknowns(),
    "read grid"
  );
  Ok(grid)
}

/// Orders the result if necessary and writes it as CSV.
pub fn save_ordered_result(outputter: &CsvOutputter, path: impl AsRef<Path>) -> Result<()> {
  outputter.order()?;
  outputter.save(path)
}
