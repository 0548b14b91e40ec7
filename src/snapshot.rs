//! Snapshot files for saving and loading a single board.

use crate::codec;
use crate::engine::SimulationResult;
use crate::error::LifeError;
use crate::grid::Grid;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

const MAGIC: &[u8; 4] = b"LIFE";

/// Board state as written to disk
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    /// Version for compatibility checking
    pub version: u32,
    pub width: u32,
    pub height: u32,
    pub generation: u32,
    pub is_final: bool,
    /// Bit-packed cells, see [`crate::codec`]
    pub data: Vec<u8>,
}

impl BoardSnapshot {
    /// Current snapshot version
    pub const VERSION: u32 = 1;

    /// Snapshot a grid at the given generation
    pub fn new(grid: &Grid, generation: u32, is_final: bool) -> Self {
        Self {
            version: Self::VERSION,
            width: grid.width() as u32,
            height: grid.height() as u32,
            generation,
            is_final,
            data: codec::encode(grid),
        }
    }

    /// Snapshot the outcome of an engine run
    pub fn from_result(result: &SimulationResult) -> Self {
        Self::new(&result.grid, result.generation, result.is_final)
    }

    /// Decode the stored cells
    pub fn grid(&self) -> Result<Grid, LifeError> {
        codec::decode(&self.data, self.width as usize, self.height as usize)
    }

    /// Save snapshot to binary file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), SnapshotError> {
        let file = File::create(path)?;
        let mut writer = BufWriter::new(file);

        writer.write_all(MAGIC)?;

        let encoded = bincode::serialize(self)?;
        writer.write_all(&encoded)?;
        writer.flush()?;

        Ok(())
    }

    /// Load snapshot from binary file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, SnapshotError> {
        let file = File::open(path)?;
        let mut reader = BufReader::new(file);

        let mut magic = [0u8; 4];
        reader.read_exact(&mut magic)?;
        if &magic != MAGIC {
            return Err(SnapshotError::InvalidFormat("Invalid magic bytes".to_string()));
        }

        let mut buffer = Vec::new();
        reader.read_to_end(&mut buffer)?;
        let snapshot: BoardSnapshot = bincode::deserialize(&buffer)?;

        if snapshot.version != Self::VERSION {
            return Err(SnapshotError::VersionMismatch {
                expected: Self::VERSION,
                found: snapshot.version,
            });
        }

        // Reject files whose payload cannot describe the board at all
        if snapshot.width == 0 || snapshot.height == 0 {
            return Err(SnapshotError::InvalidFormat(format!(
                "Empty board {}x{}",
                snapshot.width, snapshot.height
            )));
        }

        // The cell data read from disk bounds the board size
        let expected = (snapshot.width as usize)
            .checked_mul(snapshot.height as usize)
            .map(|cells| (cells + 7) / 8);
        if expected != Some(snapshot.data.len()) {
            return Err(SnapshotError::InvalidFormat(format!(
                "{} bytes of cell data for a {}x{} board",
                snapshot.data.len(),
                snapshot.width,
                snapshot.height
            )));
        }

        Ok(snapshot)
    }

    /// Get approximate size in bytes
    pub fn size_bytes(&self) -> usize {
        bincode::serialized_size(self).unwrap_or(0) as usize + MAGIC.len()
    }
}

/// Errors that can occur during snapshot operations
#[derive(Debug)]
pub enum SnapshotError {
    Io(std::io::Error),
    Serialization(bincode::Error),
    InvalidFormat(String),
    VersionMismatch { expected: u32, found: u32 },
}

impl std::fmt::Display for SnapshotError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "IO error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidFormat(msg) => write!(f, "Invalid format: {}", msg),
            Self::VersionMismatch { expected, found } => {
                write!(f, "Version mismatch: expected {}, found {}", expected, found)
            }
        }
    }
}

impl std::error::Error for SnapshotError {}

impl From<std::io::Error> for SnapshotError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e)
    }
}

impl From<bincode::Error> for SnapshotError {
    fn from(e: bincode::Error) -> Self {
        Self::Serialization(e)
    }
}
