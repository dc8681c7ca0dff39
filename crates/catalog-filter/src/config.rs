//! Filter engine configuration.

use std::fs;
use std::path::{Path, PathBuf};

use catalog_model::LevelSet;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default idle time before a typed query is applied.
pub const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Configuration for building and searching the catalog tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Levels materialized in the tree.
    pub levels: LevelSet,

    /// Debounce delay in milliseconds.
    ///
    /// A typed query is applied once input has been idle this long.
    /// Further keystrokes reset the timer.
    pub debounce_ms: u64,

    /// Expand every node of the filtered tree while a search is active.
    pub auto_expand_on_search: bool,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            levels: LevelSet::all(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
            auto_expand_on_search: true,
        }
    }
}

impl FilterConfig {
    /// Load a JSON config file. Missing keys take their default values.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    #[must_use]
    pub fn with_levels(mut self, levels: LevelSet) -> Self {
        self.levels = levels;
        self
    }
}

/// Config loading error.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file: {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}
