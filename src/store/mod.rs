//! Persistence of board records.
//!
//! Every computed state is written as a new immutable record. Two backends
//! are available: an in-process map for development and tests, and
//! PostgreSQL via `sqlx` for deployments.

mod memory;
mod postgres;

pub use memory::MemoryStore;
pub use postgres::PgStore;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::codec;
use crate::config::{StorageBackend, StorageConfig};
use crate::error::LifeError;
use crate::grid::Grid;

/// A stored board state
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardRecord {
    pub id: i64,
    pub width: i32,
    pub height: i32,
    pub generation: i32,
    pub is_final: bool,
    /// Bit-packed cells, see [`crate::codec`]
    pub data: Vec<u8>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BoardRecord {
    /// Decode the stored cells
    pub fn grid(&self) -> Result<Grid, LifeError> {
        codec::decode_stored(&self.data, self.width, self.height)
    }
}

/// A board state waiting for an id
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewBoard {
    pub width: i32,
    pub height: i32,
    pub generation: i32,
    pub is_final: bool,
    pub data: Vec<u8>,
}

impl NewBoard {
    /// Encode a grid for storage
    pub fn from_grid(grid: &Grid, generation: u32, is_final: bool) -> Result<Self, StoreError> {
        let width = i32::try_from(grid.width()).map_err(|_| StoreError::OutOfRange("width"))?;
        let height = i32::try_from(grid.height()).map_err(|_| StoreError::OutOfRange("height"))?;
        let generation =
            i32::try_from(generation).map_err(|_| StoreError::OutOfRange("generation"))?;

        Ok(Self {
            width,
            height,
            generation,
            is_final,
            data: codec::encode(grid),
        })
    }
}

/// Configured storage backend
pub enum BoardStore {
    Memory(MemoryStore),
    Postgres(PgStore),
}

impl BoardStore {
    /// Open the backend named in the configuration
    pub async fn connect(config: &StorageConfig) -> Result<Self, StoreError> {
        match config.backend {
            StorageBackend::Memory => {
                log::info!("Using in-memory board store");
                Ok(Self::Memory(MemoryStore::new()))
            }
            StorageBackend::Postgres => {
                let url = config
                    .database_url
                    .as_deref()
                    .ok_or_else(|| StoreError::Config("database_url is not set".to_string()))?;
                let store = PgStore::connect(url, config.max_connections).await?;
                log::info!("Connected to PostgreSQL board store");
                Ok(Self::Postgres(store))
            }
        }
    }

    /// Insert a new record and return it with its id and timestamps
    pub async fn insert(&self, board: NewBoard) -> Result<BoardRecord, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.insert(board).await),
            Self::Postgres(store) => store.insert(board).await,
        }
    }

    /// Fetch a record by id
    pub async fn get(&self, id: i64) -> Result<Option<BoardRecord>, StoreError> {
        match self {
            Self::Memory(store) => Ok(store.get(id).await),
            Self::Postgres(store) => store.get(id).await,
        }
    }
}

/// Errors that can occur in the storage layer
#[derive(Debug)]
pub enum StoreError {
    Database(sqlx::Error),
    Config(String),
    OutOfRange(&'static str),
}

impl std::fmt::Display for StoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Database(e) => write!(f, "Database error: {}", e),
            Self::Config(msg) => write!(f, "Storage configuration error: {}", msg),
            Self::OutOfRange(field) => write!(f, "Value out of range for column {}", field),
        }
    }
}

impl std::error::Error for StoreError {}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        Self::Database(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_from_grid() {
        let grid = Grid::with_live_cells(3, 3, &[(0, 0), (2, 2)]);
        let board = NewBoard::from_grid(&grid, 4, true).unwrap();

        assert_eq!(board.width, 3);
        assert_eq!(board.height, 3);
        assert_eq!(board.generation, 4);
        assert!(board.is_final);
        assert_eq!(board.data, codec::encode(&grid));
    }

    #[test]
    fn test_generation_out_of_range() {
        let result = NewBoard::from_grid(&Grid::new(1, 1), u32::MAX, false);
        assert!(matches!(result, Err(StoreError::OutOfRange("generation"))));
    }

    #[test]
    fn test_record_rejects_negative_dimensions() {
        let now = Utc::now();
        let record = BoardRecord {
            id: 1,
            width: -3,
            height: 3,
            generation: 0,
            is_final: false,
            data: vec![0, 0],
            created_at: now,
            updated_at: now,
        };
        assert!(matches!(record.grid(), Err(LifeError::MalformedState { .. })));
    }
}
