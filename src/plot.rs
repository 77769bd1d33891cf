//! Renders the ordered result as a heatmap with a hot colormap.

use crate::{error::Error, output::CsvOutputter, Result};

use plotly::{
  common::{ColorScale, ColorScalePalette, Title},
  HeatMap, Layout, Plot,
};
use tracing::debug;

use std::{fs, path::Path};

/// Cell values in plotting order: the last grid row comes first, since the
/// heatmap's vertical axis points up. Boundary cells and the missing tail of
/// short rows are zero.
pub fn heatmap_rows(outputter: &CsvOutputter) -> Result<Vec<Vec<f64>>> {
  let cells = outputter.cell_values()?;
  let ncols = cells.iter().map(Vec::len).max().unwrap_or(0);
  let rows = cells
    .iter()
    .rev()
    .map(|row| {
      let mut values: Vec<f64> = row.iter().map(|v| v.unwrap_or(0.0)).collect();
      values.resize(ncols, 0.0);
      values
    })
    .collect();
  Ok(rows)
}

/// Fails with [`Error::NotOrdered`] like the CSV output does.
pub fn heatmap_plot(outputter: &CsvOutputter) -> Result<Plot> {
  if !outputter.is_ordered() {
    return Err(Error::NotOrdered);
  }

  let heatmap =
    HeatMap::new_z(heatmap_rows(outputter)?).color_scale(ColorScale::Palette(ColorScalePalette::Hot));
  let layout = Layout::new().title(Title::with_text("Steady-state temperature"));

  let mut plot = Plot::new();
  plot.add_trace(heatmap);
  plot.set_layout(layout);
  Ok(plot)
}

/// Writes the heatmap as a standalone HTML page.
pub fn save_heatmap(outputter: &CsvOutputter, path: impl AsRef<Path>) -> Result<()> {
  let path = path.as_ref();
  let plot = heatmap_plot(outputter)?;
  fs::write(path, plot.to_html())?;
  debug!(path = %path.display(), "wrote heatmap");
  Ok(())
}
