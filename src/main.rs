use clap::{Parser, ValueEnum};
use heatmap::{
  assemble::DEFAULT_FORCING,
  config::PoissonConfig,
  grid::Glyphs,
  io,
  output::DEFAULT_SIGNIFICANT_DIGITS,
  plot, poisson,
  solver::{sor, SolverKind, SorParams},
};
use tracing::info;

use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
  name = "heatmap",
  about = "Solve steady-state heat diffusion on a glyph grid and write the result as CSV"
)]
struct Cli {
  /// Grid file, one row per line
  input: PathBuf,

  /// Destination of the CSV result
  output: PathBuf,

  #[arg(long, value_enum, default_value_t = SolverChoice::Cholesky)]
  solver: SolverChoice,

  /// Heat source applied to every unknown cell
  #[arg(long, default_value_t = DEFAULT_FORCING)]
  forcing: f64,

  /// SOR relaxation parameter, strictly between 1 and 2
  #[arg(long, default_value_t = sor::DEFAULT_RELAXATION)]
  relaxation: f64,

  /// SOR stopping threshold on the largest per-sweep change
  #[arg(long, default_value_t = sor::DEFAULT_TOLERANCE)]
  tolerance: f64,

  /// Give up after this many SOR sweeps (0 sweeps without limit)
  #[arg(long, default_value_t = sor::DEFAULT_MAX_SWEEPS)]
  max_sweeps: usize,

  #[arg(long, default_value_t = 'B')]
  unknown_glyph: char,

  #[arg(long, default_value_t = 'W')]
  boundary_glyph: char,

  /// Significant digits of the written values
  #[arg(long, default_value_t = DEFAULT_SIGNIFICANT_DIGITS)]
  digits: usize,

  /// Also render the result as a heatmap HTML page
  #[arg(long)]
  heatmap: Option<PathBuf>,

  #[arg(short, long)]
  verbose: bool,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum SolverChoice {
  Cholesky,
  Sor,
}

impl From<SolverChoice> for SolverKind {
  fn from(choice: SolverChoice) -> Self {
    match choice {
      SolverChoice::Cholesky => SolverKind::Cholesky,
      SolverChoice::Sor => SolverKind::Sor,
    }
  }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
  let cli = Cli::parse();

  let level = if cli.verbose {
    tracing::Level::DEBUG
  } else {
    tracing::Level::INFO
  };
  tracing_subscriber::fmt().with_max_level(level).init();

  let max_sweeps = (cli.max_sweeps != 0).then_some(cli.max_sweeps);
  let config = PoissonConfig {
    glyphs: Glyphs::new(cli.unknown_glyph, cli.boundary_glyph)?,
    forcing: cli.forcing,
    solver: cli.solver.into(),
    sor: SorParams::new(cli.relaxation, cli.tolerance).with_max_sweeps(max_sweeps),
    significant_digits: cli.digits,
  };

  let grid = io::read_grid(&cli.input, &config.glyphs)?;
  let outputter = poisson::solve_poisson(grid, &config)?;
  io::save_ordered_result(&outputter, &cli.output)?;

  info!(path = %cli.output.display(), "wrote solution");

  if let Some(path) = &cli.heatmap {
    plot::save_heatmap(&outputter, path)?;
    info!(path = %path.display(), "wrote heatmap");
  }
  Ok(())
}
