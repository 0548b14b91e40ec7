//! Dense boolean grid for the bounded Life board.

use crate::error::LifeError;
use serde::{Deserialize, Serialize};

/// Rectangular matrix of cells, stored row-major.
///
/// A grid is rectangular by construction. Zero-sized grids are allowed so
/// the engine can pass them through unchanged; request validation is
/// where empty boards get rejected.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<bool>,
}

impl Grid {
    /// Create an all-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![false; width * height],
        }
    }

    /// Build a grid from rows, rejecting ragged input
    pub fn from_rows<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self, LifeError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |row| row.as_ref().len());

        let mut cells = Vec::with_capacity(width * height);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != width {
                return Err(LifeError::InvalidGrid(format!(
                    "row {} has {} columns, expected {}",
                    r,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }

        // A list of empty rows has no columns to speak of
        let height = if width == 0 { 0 } else { height };

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Build a grid with the listed `(row, col)` cells alive.
    /// Coordinates outside the grid are ignored.
    pub fn with_live_cells(width: usize, height: usize, live: &[(usize, usize)]) -> Self {
        let mut grid = Self::new(width, height);
        for &(row, col) in live {
            grid.set(row, col, true);
        }
        grid
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// True for zero-width or zero-height grids
    #[inline]
    pub fn is_degenerate(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    #[inline]
    fn index(&self, row: usize, col: usize) -> usize {
        row * self.width + col
    }

    /// Cell state; out-of-bounds reads are dead
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> bool {
        row < self.height && col < self.width && self.cells[self.index(row, col)]
    }

    /// Set a cell. Out-of-bounds writes are ignored.
    #[inline]
    pub fn set(&mut self, row: usize, col: usize, alive: bool) {
        if row < self.height && col < self.width {
            let idx = self.index(row, col);
            self.cells[idx] = alive;
        }
    }

    /// Row-major view of every cell
    #[inline]
    pub fn cells(&self) -> &[bool] {
        &self.cells
    }

    /// Iterate rows as slices
    pub fn rows(&self) -> impl Iterator<Item = &[bool]> {
        // chunks() panics on zero, and a zero-width grid has no rows anyway
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Copy out as nested rows, the shape used by the REST API
    pub fn to_rows(&self) -> Vec<Vec<bool>> {
        self.rows().map(|row| row.to_vec()).collect()
    }

    /// Number of live cells
    pub fn live_count(&self) -> usize {
        self.cells.iter().filter(|&&alive| alive).count()
    }

    /// Coordinates of all live cells, row-major
    pub fn live_cells(&self) -> Vec<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &alive)| alive)
            .map(|(i, _)| (i / self.width, i % self.width))
            .collect()
    }

    /// Parse plaintext art: `O`, `#`, `*` or `1` alive, anything else dead.
    /// Lines starting with `!` are comments. Short lines are padded with
    /// dead cells to the widest line.
    pub fn parse_plaintext(text: &str) -> Result<Self, LifeError> {
        let lines: Vec<&str> = text
            .lines()
            .map(str::trim_end)
            .filter(|line| !line.starts_with('!'))
            .collect();

        let width = lines.iter().map(|line| line.chars().count()).max().unwrap_or(0);
        if width == 0 {
            return Err(LifeError::InvalidGrid("no cells in pattern".to_string()));
        }

        let mut grid = Self::new(width, lines.len());
        for (row, line) in lines.iter().enumerate() {
            for (col, ch) in line.chars().enumerate() {
                grid.set(row, col, matches!(ch, 'O' | '#' | '*' | '1'));
            }
        }
        Ok(grid)
    }
}

impl std::fmt::Display for Grid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in self.rows() {
            let line: String = row.iter().map(|&alive| if alive { 'O' } else { '.' }).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
