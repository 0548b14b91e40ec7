//! Life transition rule (B3/S23) and the multi-step searches built on it.
//!
//! Everything here is a pure function over [`Grid`]: no call keeps state
//! between invocations and no input grid is ever modified.
//!
//! Two termination conditions are in play and they are deliberately
//! different:
//!
//! - [`advance`] stops early only on a **fixed point**, i.e. when a step
//!   returns a grid equal to its predecessor. An oscillator such as the
//!   blinker runs for the full `n` steps and is never reported final.
//! - [`find_final_state`] also tracks every state it has seen and stops
//!   when one **recurs**, so periodic cycles are reported final as well.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::codec;
use crate::error::LifeError;
use crate::grid::Grid;

/// Outcome of a multi-step operation
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SimulationResult {
    /// Grid reached
    pub grid: Grid,
    /// Absolute generation of `grid`
    pub generation: u32,
    /// Fixed point or member of a detected cycle
    pub is_final: bool,
}

/// Count live cells among the up to 8 in-bounds neighbours of `(row, col)`.
/// Cells past the edge do not wrap and do not count.
pub fn count_live_neighbors(grid: &Grid, row: usize, col: usize) -> u8 {
    let row_min = row.saturating_sub(1);
    let row_max = (row + 1).min(grid.height().saturating_sub(1));
    let col_min = col.saturating_sub(1);
    let col_max = (col + 1).min(grid.width().saturating_sub(1));

    let mut count = 0;
    for r in row_min..=row_max {
        for c in col_min..=col_max {
            if (r != row || c != col) && grid.get(r, c) {
                count += 1;
            }
        }
    }
    count
}

/// B3/S23: survive on 2 or 3, born on exactly 3
#[inline]
fn next_cell(alive: bool, neighbors: u8) -> bool {
    matches!((alive, neighbors), (true, 2) | (true, 3) | (false, 3))
}

/// Compute the next generation into a fresh grid of the same shape
pub fn step(grid: &Grid) -> Grid {
    let mut next = Grid::new(grid.width(), grid.height());
    if grid.is_degenerate() {
        return next;
    }

    for row in 0..grid.height() {
        for col in 0..grid.width() {
            let neighbors = count_live_neighbors(grid, row, col);
            if next_cell(grid.get(row, col), neighbors) {
                next.set(row, col, true);
            }
        }
    }

    next
}

/// Apply up to `n` steps, stopping at the first fixed point.
///
/// With `n == 0` the grid comes back untouched and `is_final` reports
/// whether it is already a fixed point. Otherwise the returned generation
/// counts every step executed, including the one that revealed the fixed
/// point, so it can be less than `start_generation + n`.
///
/// The generation never passes `u32::MAX`; steps beyond it are not taken.
pub fn advance(grid: &Grid, start_generation: u32, n: u32) -> SimulationResult {
    let n = n.min(u32::MAX - start_generation);
    if n == 0 {
        return SimulationResult {
            grid: grid.clone(),
            generation: start_generation,
            is_final: step(grid) == *grid,
        };
    }

    let mut current = grid.clone();
    let mut generation = start_generation;
    let mut is_final = false;

    for _ in 0..n {
        let next = step(&current);
        is_final = next == current;
        current = next;
        generation += 1;

        if is_final {
            log::debug!("Fixed point reached at generation {}", generation);
            break;
        }
    }

    SimulationResult {
        grid: current,
        generation,
        is_final,
    }
}

/// Search for a fixed point or a repeating cycle within `max_iterations`
/// steps.
///
/// States are remembered by their bit-packed encoding and compared byte
/// for byte, so a recurrence is an exact match and never a hash collision.
/// The starting grid counts as seen. Exhausting the cap yields
/// [`LifeError::NoFinalState`]; this bounds the search, it does not prove
/// the pattern never settles. A search that would run past generation
/// `u32::MAX` fails with [`LifeError::GenerationOverflow`].
pub fn find_final_state(
    grid: &Grid,
    start_generation: u32,
    max_iterations: u32,
) -> Result<SimulationResult, LifeError> {
    // encoding -> iteration it was first seen at
    let mut seen: HashMap<Vec<u8>, u32> = HashMap::new();
    seen.insert(codec::encode(grid), 0);

    let mut current = grid.clone();

    for iteration in 1..=max_iterations {
        let generation = start_generation
            .checked_add(iteration)
            .ok_or(LifeError::GenerationOverflow { start_generation })?;
        let next = step(&current);

        if next == current {
            log::debug!(
                "Fixed point after {} iterations (generation {})",
                iteration,
                generation
            );
            return Ok(SimulationResult {
                grid: next,
                generation,
                is_final: true,
            });
        }

        let key = codec::encode(&next);
        if let Some(&first_seen) = seen.get(&key) {
            log::debug!(
                "Cycle of period {} detected after {} iterations (generation {})",
                iteration - first_seen,
                iteration,
                generation
            );
            return Ok(SimulationResult {
                grid: next,
                generation,
                is_final: true,
            });
        }
        seen.insert(key, iteration);

        current = next;
    }

    log::warn!(
        "No final state within {} iterations ({} distinct states seen)",
        max_iterations,
        seen.len()
    );
    Err(LifeError::NoFinalState { max_iterations })
}
