//! Named seed patterns and random fills.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::grid::Grid;

/// A named set of live cells, anchored at the origin
pub struct Pattern {
    pub name: &'static str,
    /// `(row, col)` offsets of live cells
    pub cells: &'static [(usize, usize)],
}

pub const PATTERNS: &[Pattern] = &[
    Pattern {
        name: "block",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1)],
    },
    Pattern {
        name: "blinker",
        cells: &[(0, 0), (0, 1), (0, 2)],
    },
    Pattern {
        name: "toad",
        cells: &[(0, 1), (0, 2), (0, 3), (1, 0), (1, 1), (1, 2)],
    },
    Pattern {
        name: "beacon",
        cells: &[(0, 0), (0, 1), (1, 0), (1, 1), (2, 2), (2, 3), (3, 2), (3, 3)],
    },
    Pattern {
        name: "glider",
        cells: &[(0, 1), (1, 2), (2, 0), (2, 1), (2, 2)],
    },
    Pattern {
        name: "r-pentomino",
        cells: &[(0, 1), (0, 2), (1, 0), (1, 1), (2, 1)],
    },
];

impl Pattern {
    /// Rows and columns spanned by the pattern
    pub fn extent(&self) -> (usize, usize) {
        let rows = self.cells.iter().map(|&(r, _)| r + 1).max().unwrap_or(0);
        let cols = self.cells.iter().map(|&(_, c)| c + 1).max().unwrap_or(0);
        (rows, cols)
    }

    /// Place the pattern on an empty grid, centred.
    /// Cells that fall outside a too-small grid are dropped.
    pub fn place(&self, width: usize, height: usize) -> Grid {
        let (rows, cols) = self.extent();
        let top = height.saturating_sub(rows) / 2;
        let left = width.saturating_sub(cols) / 2;

        let live: Vec<(usize, usize)> = self
            .cells
            .iter()
            .map(|&(r, c)| (top + r, left + c))
            .collect();
        Grid::with_live_cells(width, height, &live)
    }
}

/// Look up a pattern by name, case-insensitively
pub fn find(name: &str) -> Option<&'static Pattern> {
    PATTERNS.iter().find(|p| p.name.eq_ignore_ascii_case(name))
}

/// Names of all built-in patterns
pub fn names() -> Vec<&'static str> {
    PATTERNS.iter().map(|p| p.name).collect()
}

/// Fill a grid at random; each cell is alive with probability `density`.
/// The same seed always yields the same grid. A non-finite density gives
/// an empty grid.
pub fn random(width: usize, height: usize, density: f64, seed: u64) -> Grid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let density = if density.is_finite() {
        density.clamp(0.0, 1.0)
    } else {
        0.0
    };

    let mut grid = Grid::new(width, height);
    for row in 0..height {
        for col in 0..width {
            if rng.gen_bool(density) {
                grid.set(row, col, true);
            }
        }
    }
    grid
}
