//! Irregular 2-D domains given as rows of glyphs.
//!
//! Unknown cells are numbered in scan order: rows from the last to the first,
//! within a row from left to right.

use crate::{error::Error, CellPos, Result, UnknownIdx};

use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
  /// Interior cell, solved for.
  Unknown,
  /// Fixed zero cell.
  Boundary,
}

impl Cell {
  pub fn is_unknown(self) -> bool {
    self == Self::Unknown
  }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Glyphs {
  unknown: char,
  boundary: char,
}

impl Default for Glyphs {
  fn default() -> Self {
    Self {
      unknown: 'B',
      boundary: 'W',
    }
  }
}

impl Glyphs {
  pub fn new(unknown: char, boundary: char) -> Result<Self> {
    if unknown == boundary {
      return Err(Error::AmbiguousGlyphs { glyph: unknown });
    }
    Ok(Self { unknown, boundary })
  }

  pub fn unknown(&self) -> char {
    self.unknown
  }
  pub fn boundary(&self) -> char {
    self.boundary
  }

  pub fn classify(&self, glyph: char) -> Option<Cell> {
    if glyph == self.unknown {
      Some(Cell::Unknown)
    } else if glyph == self.boundary {
      Some(Cell::Boundary)
    } else {
      None
    }
  }

  pub fn glyph(&self, cell: Cell) -> char {
    match cell {
      Cell::Unknown => self.unknown,
      Cell::Boundary => self.boundary,
    }
  }
}

/// Rows of cells, possibly of different lengths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
  rows: Vec<Vec<Cell>>,
  row_nunknowns: Vec<usize>,
  nunknowns: usize,
}

// constructors
impl Grid {
  pub fn new(rows: Vec<Vec<Cell>>) -> Result<Self> {
    if rows.is_empty() {
      return Err(Error::EmptyGrid);
    }
    let row_nunknowns: Vec<usize> = rows
      .iter()
      .map(|row| row.iter().filter(|cell| cell.is_unknown()).count())
      .collect();
    let nunknowns = row_nunknowns.iter().sum();
    if nunknowns == 0 {
      return Err(Error::NoUnknowns);
    }
    Ok(Self {
      rows,
      row_nunknowns,
      nunknowns,
    })
  }

  /// One row per line, one glyph per cell.
  pub fn parse(text: &str, glyphs: &Glyphs) -> Result<Self> {
    let rows = text
      .lines()
      .enumerate()
      .map(|(irow, line)| {
        let line = line.strip_suffix('\r').unwrap_or(line);
        line
          .chars()
          .enumerate()
          .map(|(icol, glyph)| {
            glyphs.classify(glyph).ok_or(Error::InvalidGlyph {
              row: irow,
              col: icol,
              glyph,
            })
          })
          .collect::<Result<Vec<_>>>()
      })
      .collect::<Result<Vec<_>>>()?;
    Self::new(rows)
  }
}

// getters
impl Grid {
  pub fn nrows(&self) -> usize {
    self.rows.len()
  }
  pub fn nunknowns(&self) -> usize {
    self.nunknowns
  }
  pub fn rows(&self) -> &[Vec<Cell>] {
    &self.rows
  }

  pub fn row(&self, irow: usize) -> Result<&[Cell]> {
    self
      .rows
      .get(irow)
      .map(Vec::as_slice)
      .ok_or(Error::out_of_range("row", irow, self.nrows()))
  }

  pub fn row_nunknowns(&self, irow: usize) -> Result<usize> {
    self
      .row_nunknowns
      .get(irow)
      .copied()
      .ok_or(Error::out_of_range("row", irow, self.nrows()))
  }

  pub fn cell(&self, irow: usize, icol: usize) -> Result<Cell> {
    let row = self.row(irow)?;
    row
      .get(icol)
      .copied()
      .ok_or(Error::out_of_range("column", icol, row.len()))
  }

  /// `None` outside the grid, including past the end of a short row.
  pub fn get(&self, irow: usize, icol: usize) -> Option<Cell> {
    self.rows.get(irow)?.get(icol).copied()
  }

  pub fn is_unknown(&self, irow: usize, icol: usize) -> bool {
    self.get(irow, icol) == Some(Cell::Unknown)
  }

  pub fn render(&self, glyphs: &Glyphs) -> String {
    self
      .rows
      .iter()
      .map(|row| row.iter().map(|&cell| glyphs.glyph(cell)).collect::<String>())
      .collect::<Vec<_>>()
      .join("\n")
  }
}

// unknown indexing
impl Grid {
  /// Positions of all unknown cells, in unknown index order.
  pub fn unknown_positions(&self) -> impl Iterator<Item = CellPos> + '_ {
    self.rows.iter().enumerate().rev().flat_map(|(irow, row)| {
      row
        .iter()
        .enumerate()
        .filter(|(_, cell)| cell.is_unknown())
        .map(move |(icol, _)| (irow, icol))
    })
  }

  pub fn locate_unknown(&self, iunknown: UnknownIdx) -> Result<CellPos> {
    if iunknown >= self.nunknowns {
      return Err(Error::out_of_range("unknown", iunknown, self.nunknowns));
    }
    let mut remaining = iunknown;
    for irow in (0..self.nrows()).rev() {
      let nrow = self.row_nunknowns[irow];
      if remaining < nrow {
        let icol = self.rows[irow]
          .iter()
          .enumerate()
          .filter(|(_, cell)| cell.is_unknown())
          .nth(remaining)
          .map(|(icol, _)| icol);
        if let Some(icol) = icol {
          return Ok((irow, icol));
        }
        break;
      }
      remaining -= nrow;
    }
    Err(Error::out_of_range("unknown", iunknown, self.nunknowns))
  }

  /// Number of unknown cells preceding `pos` in scan order.
  ///
  /// `pos` must lie inside the grid, but need not be an unknown cell.
  pub fn scan_offset(&self, (irow, icol): CellPos) -> Result<usize> {
    let row = self.row(irow)?;
    if icol >= row.len() {
      return Err(Error::out_of_range("column", icol, row.len()));
    }
    let below: usize = self.row_nunknowns[irow + 1..].iter().sum();
    let left = row[..icol].iter().filter(|cell| cell.is_unknown()).count();
    Ok(below + left)
  }

  /// Unknown index of the cell at `pos`, `None` for boundary cells.
  pub fn unknown_idx(&self, pos: CellPos) -> Result<Option<UnknownIdx>> {
    let (irow, icol) = pos;
    match self.cell(irow, icol)? {
      Cell::Unknown => self.scan_offset(pos).map(Some),
      Cell::Boundary => Ok(None),
    }
  }

  /// Count of unknown cells walked from one position to the other along the scan order.
  ///
  /// For two unknown cells this is the difference of their unknown indices.
  pub fn unknown_distance(&self, a: CellPos, b: CellPos) -> Result<usize> {
    let offset_a = self.scan_offset(a)?;
    let offset_b = self.scan_offset(b)?;
    Ok(offset_a.abs_diff(offset_b))
  }

  /// Number of 4-connected regions of unknown cells.
  pub fn ncomponents(&self) -> usize {
    let mut visited: Vec<Vec<bool>> = self.rows.iter().map(|row| vec![false; row.len()]).collect();
    let mut ncomponents = 0;
    let mut queue = VecDeque::new();

    for (irow, icol) in self.unknown_positions() {
      if visited[irow][icol] {
        continue;
      }
      ncomponents += 1;
      visited[irow][icol] = true;
      queue.push_back((irow, icol));

      while let Some((r, c)) = queue.pop_front() {
        let neighbors = [
          r.checked_sub(1).map(|r| (r, c)),
          Some((r + 1, c)),
          c.checked_sub(1).map(|c| (r, c)),
          Some((r, c + 1)),
        ];
        for (nr, nc) in neighbors.into_iter().flatten() {
          if self.is_unknown(nr, nc) && !visited[nr][nc] {
            visited[nr][nc] = true;
            queue.push_back((nr, nc));
          }
        }
      }
    }
    ncomponents
  }
}
