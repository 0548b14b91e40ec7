//! # LIFEBOARD
//!
//! Conway's Game of Life on bounded boards, with fixed-point and cycle
//! detection and a small board-management service around it.
//!
//! ## Features
//!
//! - **Pure engine**: `step`, `advance` and `find_final_state` never mutate their input
//! - **Bounded**: no wraparound, cells past the edge are dead
//! - **Compact**: boards are stored bit-packed, one bit per cell
//! - **Served**: REST API over an in-memory or PostgreSQL store
//! - **Configurable**: YAML configuration files
//!
//! ## Quick Start
//!
//! ```rust
//! use lifeboard::{engine, Grid};
//!
//! // Horizontal blinker in a 5x5 board
//! let grid = Grid::with_live_cells(5, 5, &[(2, 1), (2, 2), (2, 3)]);
//!
//! let result = engine::find_final_state(&grid, 0, 1000).unwrap();
//! assert!(result.is_final);
//! assert_eq!(result.generation, 2);
//! ```
//!
//! ## Storage encoding
//!
//! ```rust
//! use lifeboard::{codec, Grid};
//!
//! let grid = Grid::with_live_cells(3, 3, &[(1, 1)]);
//! let data = codec::encode(&grid);
//! assert_eq!(codec::decode(&data, 3, 3).unwrap(), grid);
//! ```

pub mod codec;
pub mod config;
pub mod engine;
pub mod error;
pub mod grid;
pub mod patterns;
pub mod service;
pub mod snapshot;
pub mod store;
pub mod web;

// Re-export main types
pub use config::Config;
pub use engine::SimulationResult;
pub use error::LifeError;
pub use grid::Grid;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Time `step` on a seeded random board
pub fn benchmark(generations: u32, size: usize, seed: u64) -> BenchmarkResult {
    use std::time::Instant;

    let mut grid = patterns::random(size, size, 0.3, seed);
    let initial_live = grid.live_count();

    let start = Instant::now();
    for _ in 0..generations {
        grid = engine::step(&grid);
    }
    let elapsed = start.elapsed();

    BenchmarkResult {
        generations,
        size,
        initial_live,
        final_live: grid.live_count(),
        elapsed_secs: elapsed.as_secs_f64(),
        generations_per_second: generations as f64 / elapsed.as_secs_f64(),
    }
}

/// Benchmark result
#[derive(Debug, Clone)]
pub struct BenchmarkResult {
    pub generations: u32,
    pub size: usize,
    pub initial_live: usize,
    pub final_live: usize,
    pub elapsed_secs: f64,
    pub generations_per_second: f64,
}

impl std::fmt::Display for BenchmarkResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "=== Benchmark Results ===")?;
        writeln!(f, "Board: {}x{}", self.size, self.size)?;
        writeln!(f, "Generations: {}", self.generations)?;
        writeln!(f, "Live cells: {} -> {}", self.initial_live, self.final_live)?;
        writeln!(f, "Time: {:.3}s", self.elapsed_secs)?;
        writeln!(f, "Speed: {:.1} generations/s", self.generations_per_second)?;
        Ok(())
    }
}
