//! Edit history.
//!
//! A linear undo/redo log of `(text, blocks)` snapshots. Extraction runs once
//! per edit; undo and redo only move a cursor over cached entries.

pub mod entry;
pub mod store;

pub use entry::{HistoryEntry, Snapshot};
pub use store::HistoryStore;
