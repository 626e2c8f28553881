//! Settings for the history store and its front ends.
//!
//! Loaded from `config.json` in the platform config directory
//! (`~/.config/jsonlens` on Linux) or from an explicit path. Every field has a
//! default, so a partial file is fine and a missing default file is not an
//! error.

use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{LensError, Result};

/// Number of history entries kept before the oldest is evicted.
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

const CONFIG_FILE: &str = "config.json";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LensConfig {
    pub store: StoreConfig,
    /// Pretty-print pasted text when the whole paste is valid JSON.
    pub auto_format_paste: bool,
    /// Depth to which tree outlines are expanded.
    pub expand_level: usize,
    pub color: bool,
}

impl Default for LensConfig {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            auto_format_paste: true,
            expand_level: 1,
            color: true,
        }
    }
}

impl LensConfig {
    /// Parse and validate a JSON config document.
    pub fn from_json(source: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. A missing file is an error here.
    pub fn load(path: &Path) -> Result<Self> {
        let source = std::fs::read_to_string(path).map_err(|source| LensError::ConfigIo {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(path = %path.display(), "loaded config file");
        Self::from_json(&source)
    }

    /// Load `explicit` if given, otherwise the default location if it exists,
    /// otherwise defaults.
    pub fn load_or_default(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => {
                debug!("no config file, using defaults");
                Ok(Self::default())
            }
        }
    }

    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("", "", "jsonlens").map(|dirs| dirs.config_dir().join(CONFIG_FILE))
    }

    pub fn validate(&self) -> Result<()> {
        if self.store.history_limit == 0 {
            return Err(LensError::InvalidHistoryLimit);
        }
        Ok(())
    }
}
