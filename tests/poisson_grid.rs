//! End-to-end runs from glyph grid to ordered CSV rows.

extern crate nalgebra as na;

use approx::assert_abs_diff_eq;
use heatmap::{
  assemble::assemble_poisson_system,
  config::PoissonConfig,
  grid::{Glyphs, Grid},
  io,
  output::CsvOutputter,
  poisson::{solve_linear_system, solve_poisson},
  solver::{SolverKind, SorParams},
  Error,
};

use std::{fs, path::PathBuf};

const L_SHAPE: &[&str] = &[
  "WWWWWWW",
  "WBBBBBW",
  "WBBBBBW",
  "WBBWWWW",
  "WBBW",
  "WBBW",
  "WWWW",
];

fn grid(rows: &[&str]) -> Grid {
  Grid::parse(&rows.join("\n"), &Glyphs::default()).unwrap()
}

fn tight_sor() -> SorParams {
  SorParams::new(1.5, 1e-12).with_max_sweeps(None)
}

fn solve(rows: &[&str], solver: SolverKind) -> na::DVector<f64> {
  let system = assemble_poisson_system(grid(rows), 1.0).unwrap();
  let (_, matrix, rhs) = system.into_parts();
  solve_linear_system(matrix, &rhs, solver, &tight_sor()).unwrap()
}

#[test]
fn single_unknown_both_solvers() {
  let rows = ["WWW", "WBW", "WWW"];
  for solver in [SolverKind::Cholesky, SolverKind::Sor] {
    let x = solve(&rows, solver);
    assert_eq!(x.len(), 1);
    assert_abs_diff_eq!(x[0], 1.0, epsilon = 1e-10);

    let mut config = PoissonConfig::default().with_solver(solver);
    config.sor = tight_sor();
    let outputter = solve_poisson(grid(&rows), &config).unwrap();
    assert_eq!(outputter.ordered().unwrap(), ["0,0,0", "0,1,0", "0,0,0"]);
  }
}

#[test]
fn two_unknowns_in_a_row() {
  let outputter = solve_poisson(grid(&["WWWW", "WBBW", "WWWW"]), &PoissonConfig::default()).unwrap();
  assert_eq!(
    outputter.ordered().unwrap(),
    ["0,0,0,0", "0,1.3333333,1.3333333,0", "0,0,0,0"]
  );
}

/// The lower unknown gets index 0 but is written in the later output row.
#[test]
fn output_rows_follow_grid_rows() {
  let outputter = solve_poisson(
    grid(&["WWWW", "WBBW", "WBWW", "WWWW"]),
    &PoissonConfig::default(),
  )
  .unwrap();
  // x = (10/7, 12/7, 10/7) in unknown index order
  assert_eq!(
    outputter.ordered().unwrap(),
    [
      "0,0,0,0",
      "0,1.7142857,1.4285714,0",
      "0,1.4285714,0,0",
      "0,0,0,0"
    ]
  );
}

#[test]
fn every_unknown_cell_shows_its_own_value() {
  let g = grid(L_SHAPE);
  let n = g.nunknowns();
  let solution = na::DVector::from_iterator(n, (0..n).map(|i| i as f64 + 1.0));
  let outputter = CsvOutputter::new(g.clone(), solution).unwrap();
  let rows = outputter.order().unwrap();

  assert_eq!(rows.len(), g.nrows());
  for (irow, line) in rows.iter().enumerate() {
    let fields: Vec<&str> = line.split(',').collect();
    assert_eq!(fields.len(), g.row(irow).unwrap().len());
    for (icol, field) in fields.iter().enumerate() {
      let expected = match g.unknown_idx((irow, icol)).unwrap() {
        Some(iunknown) => (iunknown + 1).to_string(),
        None => "0".to_owned(),
      };
      assert_eq!(*field, expected, "cell ({irow}, {icol})");
    }
  }
}

#[test]
fn cholesky_and_sor_agree() {
  let grids: [&[&str]; 3] = [L_SHAPE, &["WBW", "BBB", "WBW"], &["BBBB", "BB", "BBBBBB"]];
  for rows in grids {
    let direct = solve(rows, SolverKind::Cholesky);
    let iterative = solve(rows, SolverKind::Sor);
    assert_abs_diff_eq!(direct, iterative, epsilon = 1e-3);
  }
}

#[test]
fn solution_satisfies_system() {
  let system = assemble_poisson_system(grid(L_SHAPE), 2.0).unwrap();
  let (_, matrix, rhs) = system.into_parts();
  let x = solve_linear_system(matrix.clone(), &rhs, SolverKind::Cholesky, &tight_sor()).unwrap();
  assert_abs_diff_eq!(matrix * x, rhs, epsilon = 1e-10);
}

#[test]
fn sor_relaxation_bounds_fail_before_iterating() {
  for relaxation in [1.0, 2.0] {
    let config = PoissonConfig {
      solver: SolverKind::Sor,
      sor: SorParams::new(relaxation, 0.01),
      ..Default::default()
    };
    let err = solve_poisson(grid(&["WWW", "WBW", "WWW"]), &config).unwrap_err();
    assert!(matches!(err, Error::InvalidRelaxation { .. }), "{err}");
  }
}

#[test]
fn default_sor_tolerance_is_loose() {
  let config = PoissonConfig::default().with_solver(SolverKind::Sor);
  let outputter = solve_poisson(grid(L_SHAPE), &config).unwrap();
  let direct = solve(L_SHAPE, SolverKind::Cholesky);
  for (&a, &b) in outputter.solution().iter().zip(direct.iter()) {
    assert!((a - b).abs() < 0.1);
  }
}

fn temp_path(name: &str) -> PathBuf {
  std::env::temp_dir().join(format!("heatmap-{}-{name}", std::process::id()))
}

#[test]
fn file_round_trip() {
  let input = temp_path("grid.txt");
  let output = temp_path("grid.csv");
  fs::write(&input, "WWWW\nWBBW\nWWWW\n").unwrap();

  let config = PoissonConfig::default();
  let g = io::read_grid(&input, &config.glyphs).unwrap();
  let outputter = solve_poisson(g, &config).unwrap();
  io::save_ordered_result(&outputter, &output).unwrap();

  let csv = fs::read_to_string(&output).unwrap();
  assert_eq!(csv, "0,0,0,0\n0,1.3333333,1.3333333,0\n0,0,0,0\n");

  fs::remove_file(input).ok();
  fs::remove_file(output).ok();
}

#[test]
fn unreadable_grid_file() {
  let err = io::read_grid(temp_path("does-not-exist.txt"), &Glyphs::default()).unwrap_err();
  assert!(matches!(err, Error::ReadGrid { .. }));
  assert!(err.is_input_error());
}

#[test]
fn unordered_result_cannot_be_saved() {
  let outputter = CsvOutputter::new(grid(&["B"]), na::DVector::from_element(1, 1.0)).unwrap();
  let path = temp_path("unordered.csv");
  assert!(matches!(outputter.save(&path), Err(Error::NotOrdered)));
  assert!(!path.exists());
}
