//! Document configuration.
//!
//! Loaded from TOML, for tools that embed the model and want to tune it
//! without recompiling:
//!
//! ```toml
//! deliver_notifications = true
//! initial_capacity = 4096
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::{ModelError, ModelResult};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DocumentConfig {
    /// Master switch for observer delivery. When off, mutations never build
    /// notification events regardless of registered observers.
    pub deliver_notifications: bool,
    /// Number of nodes the arena reserves room for up front.
    pub initial_capacity: usize,
}

impl Default for DocumentConfig {
    fn default() -> Self {
        Self {
            deliver_notifications: true,
            initial_capacity: 256,
        }
    }
}

impl DocumentConfig {
    pub fn from_toml_str(content: &str) -> ModelResult<Self> {
        toml::from_str(content).map_err(|e| ModelError::Config(e.to_string()))
    }

    pub fn load(path: &Path) -> ModelResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn to_toml_string(&self) -> ModelResult<String> {
        toml::to_string_pretty(self).map_err(|e| ModelError::Config(e.to_string()))
    }
}
