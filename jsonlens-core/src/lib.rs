//! jsonlens core.
//!
//! Finds JSON objects and arrays buried in freeform text and keeps an
//! undoable timeline of text edits together with what was extracted from
//! each one.

pub mod blocks;
pub mod config;
pub mod error;
pub mod extract;
pub mod format;
pub mod history;

// Re-export the main types so users can just use `jsonlens_core::HistoryStore`
pub use blocks::{Block, BlockId, BlockKind};
pub use config::{LensConfig, StoreConfig};
pub use error::{LensError, Result};
pub use extract::{Extract, JsonExtractor, extract, try_parse};
pub use format::{ExportFormat, format_json, format_json_in_text, to_markdown, to_text};
pub use history::{HistoryEntry, HistoryStore, Snapshot};
