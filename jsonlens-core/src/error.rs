use std::path::PathBuf;

use thiserror::Error;

/// Errors from the ambient parts of the core: config loading and export.
///
/// Extraction and history navigation are total and never produce these.
#[derive(Debug, Error)]
pub enum LensError {
    #[error("failed to read config file {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),

    #[error("history limit must be at least 1")]
    InvalidHistoryLimit,

    #[error("unknown export format: {0:?} (expected json, text or md)")]
    UnknownFormat(String),

    #[error("no block at index {index} (entry has {count})")]
    NoSuchBlock { index: usize, count: usize },
}

pub type Result<T> = std::result::Result<T, LensError>;
