//! Configuration system for the board service.
//!
//! Supports YAML configuration files with sensible defaults.

use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::Path;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Final-state search limits
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Cap on iterations when searching for a final state
    pub max_iterations: u32,
    /// Largest accepted board (width * height)
    pub max_cells: usize,
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Address to bind, e.g. `127.0.0.1:8080`
    pub bind: String,
    /// Allow cross-origin requests from any origin
    pub cors: bool,
}

/// Where board records are kept
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    Postgres,
}

/// Storage configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Connection string, required for the postgres backend
    #[serde(default)]
    pub database_url: Option<String>,
    pub max_connections: u32,
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_cells: 1_000_000,
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:8080".to_string(),
            cors: true,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::Memory,
            database_url: None,
            max_connections: 5,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to a YAML file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<(), Box<dyn std::error::Error>> {
        let yaml = serde_yaml::to_string(self)?;
        std::fs::write(path, yaml)?;
        Ok(())
    }

    /// Parsed bind address
    pub fn bind_addr(&self) -> Result<SocketAddr, String> {
        self.server
            .bind
            .parse()
            .map_err(|e| format!("invalid bind address '{}': {}", self.server.bind, e))
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), String> {
        if self.engine.max_iterations == 0 {
            return Err("max_iterations must be > 0".to_string());
        }
        if self.engine.max_cells == 0 {
            return Err("max_cells must be > 0".to_string());
        }
        self.bind_addr()?;
        if self.storage.backend == StorageBackend::Postgres && self.storage.database_url.is_none() {
            return Err("database_url is required for the postgres backend".to_string());
        }
        if self.storage.max_connections == 0 {
            return Err("max_connections must be > 0".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.engine.max_iterations, 1000);
    }

    #[test]
    fn test_config_roundtrip() {
        let config = Config::default();
        let yaml = serde_yaml::to_string(&config).unwrap();
        let loaded: Config = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(config.engine.max_iterations, loaded.engine.max_iterations);
        assert_eq!(loaded.storage.backend, StorageBackend::Memory);
    }

    #[test]
    fn test_partial_yaml_uses_defaults() {
        let loaded: Config = serde_yaml::from_str("engine:\n  max_iterations: 50\n  max_cells: 100\n").unwrap();
        assert_eq!(loaded.engine.max_iterations, 50);
        assert_eq!(loaded.server.bind, "127.0.0.1:8080");
    }

    #[test]
    fn test_postgres_requires_url() {
        let mut config = Config::default();
        config.storage.backend = StorageBackend::Postgres;
        assert!(config.validate().is_err());

        config.storage.database_url = Some("postgres://localhost/life".to_string());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_bad_bind_rejected() {
        let mut config = Config::default();
        config.server.bind = "not an address".to_string();
        assert!(config.validate().is_err());
    }
}
