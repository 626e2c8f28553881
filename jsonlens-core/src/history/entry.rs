use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::blocks::Block;
use crate::error::{LensError, Result};
use crate::format::ExportFormat;

/// Immutable snapshot of the text and what was extracted from it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub text: String,
    pub blocks: Vec<Block>,
    pub recorded_at: DateTime<Utc>,
}

impl HistoryEntry {
    pub fn new(text: String, blocks: Vec<Block>) -> Self {
        Self {
            text,
            blocks,
            recorded_at: Utc::now(),
        }
    }

    /// The empty entry every log starts from.
    pub fn seed() -> Self {
        Self::new(String::new(), Vec::new())
    }

    pub fn block(&self, index: usize) -> Result<&Block> {
        self.blocks.get(index).ok_or(LensError::NoSuchBlock {
            index,
            count: self.blocks.len(),
        })
    }

    pub fn export_block(&self, index: usize, format: ExportFormat) -> Result<String> {
        self.block(index).map(|block| format.render(&block.content))
    }
}

/// What subscribers see: the active entry plus navigation state.
#[derive(Debug, Clone)]
pub struct Snapshot {
    pub entry: Arc<HistoryEntry>,
    pub cursor: usize,
    pub len: usize,
}

impl Snapshot {
    pub fn text(&self) -> &str {
        &self.entry.text
    }

    pub fn blocks(&self) -> &[Block] {
        &self.entry.blocks
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.len
    }
}
