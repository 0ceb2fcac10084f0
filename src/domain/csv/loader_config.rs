// ============================================================
// LOADER CONFIGURATION
// ============================================================
// Connection pool settings for the in-memory store

use serde::{Deserialize, Serialize};

use crate::domain::error::{AppError, Result};

/// Configuration for a single load
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Upper bound on pooled connections shared by downstream queries (default: 100)
    pub max_connections: u32,

    /// Connections kept open at all times (default: 1).
    /// The memory database only lives while at least one connection is open.
    pub min_connections: u32,

    /// How long a query caller waits for a free connection (default: 5)
    pub acquire_timeout_secs: u64,

    /// Prefix of the shared-cache key; a fresh UUID is appended per load
    pub cache_key_prefix: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            max_connections: 100,
            min_connections: 1,
            acquire_timeout_secs: 5,
            cache_key_prefix: "csvmem".to_string(),
        }
    }
}

impl LoaderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_connections == 0 {
            return Err(AppError::ConfigError(
                "max_connections must be > 0".to_string(),
            ));
        }
        if self.min_connections == 0 {
            return Err(AppError::ConfigError(
                "min_connections must be > 0 to keep the memory database alive".to_string(),
            ));
        }
        if self.min_connections > self.max_connections {
            return Err(AppError::ConfigError(
                "min_connections must be <= max_connections".to_string(),
            ));
        }
        if self.cache_key_prefix.trim().is_empty() {
            return Err(AppError::ConfigError(
                "cache_key_prefix must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}
