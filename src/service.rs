//! Board management: create boards and compute their future states.
//!
//! The service owns the policy around the engine: request validation,
//! the "final boards never move" rule, the iteration cap for the final
//! state search, and persisting every computed state as a new record.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::EngineConfig;
use crate::engine::{self, SimulationResult};
use crate::error::LifeError;
use crate::grid::Grid;
use crate::store::{BoardRecord, BoardStore, NewBoard, StoreError};

/// Request to create a board
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BoardRequest {
    /// Rows of cells, `true` alive
    #[serde(default)]
    pub initial_state: Option<Vec<Vec<bool>>>,
    /// Free-form label, not persisted
    #[serde(default)]
    pub name: Option<String>,
}

impl BoardRequest {
    pub fn new(initial_state: Vec<Vec<bool>>) -> Self {
        Self {
            initial_state: Some(initial_state),
            name: None,
        }
    }

    /// Check shape and size, returning the grid on success.
    /// Failures are reported per field.
    pub fn validate(&self, max_cells: usize) -> Result<Grid, ServiceError> {
        let mut errors = BTreeMap::new();

        let rows = match &self.initial_state {
            None => {
                errors.insert("initial_state".to_string(), "Initial board state is required".to_string());
                return Err(ServiceError::Validation(errors));
            }
            Some(rows) => rows,
        };

        if rows.is_empty() {
            errors.insert("initial_state".to_string(), "Board must have at least one row".to_string());
        } else if rows[0].is_empty() {
            errors.insert("initial_state".to_string(), "Board must have at least one column".to_string());
        } else if rows.iter().any(|row| row.len() != rows[0].len()) {
            errors.insert("initial_state".to_string(), "All rows must have the same length".to_string());
        } else if rows.len() * rows[0].len() > max_cells {
            errors.insert(
                "initial_state".to_string(),
                format!("Board must have at most {} cells", max_cells),
            );
        }

        if !errors.is_empty() {
            return Err(ServiceError::Validation(errors));
        }

        Grid::from_rows(rows).map_err(ServiceError::from)
    }
}

/// Board state as returned to clients
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardResponse {
    pub id: i64,
    pub state: Vec<Vec<bool>>,
    pub width: i32,
    pub height: i32,
    pub generation: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub final_state: bool,
    pub live_cell_count: usize,
}

impl BoardResponse {
    pub fn from_record(record: &BoardRecord) -> Result<Self, ServiceError> {
        let grid = record.grid()?;
        Ok(Self {
            id: record.id,
            state: grid.to_rows(),
            width: record.width,
            height: record.height,
            generation: record.generation,
            created_at: record.created_at,
            updated_at: record.updated_at,
            final_state: record.is_final,
            live_cell_count: grid.live_count(),
        })
    }
}

/// Board operations over a store
pub struct BoardService {
    store: BoardStore,
    config: EngineConfig,
}

impl BoardService {
    pub fn new(store: BoardStore, config: EngineConfig) -> Self {
        Self { store, config }
    }

    /// Validate and store a board at generation 0
    pub async fn create_board(&self, request: BoardRequest) -> Result<BoardResponse, ServiceError> {
        let grid = request.validate(self.config.max_cells)?;
        let record = self.store.insert(NewBoard::from_grid(&grid, 0, false)?).await?;

        log::info!(
            "Created board {} ({}x{}, {} live){}",
            record.id,
            record.width,
            record.height,
            grid.live_count(),
            request.name.as_deref().map(|n| format!(" '{}'", n)).unwrap_or_default()
        );
        BoardResponse::from_record(&record)
    }

    pub async fn get_board(&self, id: i64) -> Result<BoardResponse, ServiceError> {
        let record = self.find(id).await?;
        BoardResponse::from_record(&record)
    }

    /// One generation forward. A final board is returned as stored.
    pub async fn next_state(&self, id: i64) -> Result<BoardResponse, ServiceError> {
        let record = self.find(id).await?;
        if record.is_final {
            return BoardResponse::from_record(&record);
        }

        let (grid, generation) = Self::load(&record)?;
        let result = run_blocking(move || Ok(engine::advance(&grid, generation, 1))).await?;
        self.save(result).await
    }

    /// Up to `iterations` generations forward, stopping at a fixed point.
    /// Zero iterations or a final board return the stored record.
    pub async fn state_after(&self, id: i64, iterations: u32) -> Result<BoardResponse, ServiceError> {
        let record = self.find(id).await?;
        if iterations == 0 || record.is_final {
            return BoardResponse::from_record(&record);
        }

        let (grid, generation) = Self::load(&record)?;
        let result =
            run_blocking(move || Ok(engine::advance(&grid, generation, iterations))).await?;
        self.save(result).await
    }

    /// Run until a fixed point or cycle, within the configured cap
    pub async fn final_state(&self, id: i64) -> Result<BoardResponse, ServiceError> {
        let record = self.find(id).await?;
        if record.is_final {
            return BoardResponse::from_record(&record);
        }

        let (grid, generation) = Self::load(&record)?;
        let max_iterations = self.config.max_iterations;
        let result = run_blocking(move || {
            engine::find_final_state(&grid, generation, max_iterations).map_err(ServiceError::from)
        })
        .await?;
        self.save(result).await
    }

    async fn find(&self, id: i64) -> Result<BoardRecord, ServiceError> {
        self.store.get(id).await?.ok_or(ServiceError::NotFound(id))
    }

    fn load(record: &BoardRecord) -> Result<(Grid, u32), ServiceError> {
        let grid = record.grid()?;
        let generation = u32::try_from(record.generation)
            .map_err(|_| ServiceError::Store(StoreError::OutOfRange("generation")))?;
        Ok((grid, generation))
    }

    async fn save(&self, result: SimulationResult) -> Result<BoardResponse, ServiceError> {
        // Generations are stored as INTEGER
        if result.generation > i32::MAX as u32 {
            return Err(ServiceError::Processing(format!(
                "Generation {} exceeds the storable maximum of {}",
                result.generation,
                i32::MAX
            )));
        }
        let board = NewBoard::from_grid(&result.grid, result.generation, result.is_final)?;
        let record = self.store.insert(board).await?;
        log::debug!(
            "Stored board {} at generation {} (final: {})",
            record.id,
            record.generation,
            record.is_final
        );
        BoardResponse::from_record(&record)
    }
}

/// Engine work is CPU bound; keep it off the async workers
async fn run_blocking<F>(f: F) -> Result<SimulationResult, ServiceError>
where
    F: FnOnce() -> Result<SimulationResult, ServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(f)
        .await
        .map_err(|e| ServiceError::Processing(format!("Engine task failed: {}", e)))?
}

/// Errors surfaced by board operations
#[derive(Debug)]
pub enum ServiceError {
    NotFound(i64),
    /// Field name -> message
    Validation(BTreeMap<String, String>),
    Processing(String),
    Store(StoreError),
}

impl std::fmt::Display for ServiceError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "Could not find board with id: {}", id),
            Self::Validation(errors) => {
                write!(f, "Validation error")?;
                for (field, msg) in errors {
                    write!(f, "; {}: {}", field, msg)?;
                }
                Ok(())
            }
            Self::Processing(msg) => write!(f, "{}", msg),
            Self::Store(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for ServiceError {}

impl From<StoreError> for ServiceError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

impl From<LifeError> for ServiceError {
    fn from(e: LifeError) -> Self {
        match e {
            LifeError::InvalidGrid(msg) => {
                let mut errors = BTreeMap::new();
                errors.insert("initial_state".to_string(), msg);
                Self::Validation(errors)
            }
            other => Self::Processing(other.to_string()),
        }
    }
}
