//! Shared application state for the web server.

use crate::config::Config;
use crate::service::BoardService;
use crate::store::{BoardStore, StoreError};

/// Application state shared between all handlers
pub struct AppState {
    pub service: BoardService,
}

impl AppState {
    /// Open the configured store and wrap it in a service
    pub async fn new(config: &Config) -> Result<Self, StoreError> {
        let store = BoardStore::connect(&config.storage).await?;
        Ok(Self::with_store(store, config))
    }

    /// Build state around an already opened store
    pub fn with_store(store: BoardStore, config: &Config) -> Self {
        Self {
            service: BoardService::new(store, config.engine.clone()),
        }
    }
}
