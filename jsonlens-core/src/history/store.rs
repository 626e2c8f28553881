//! History store.
//!
//! Owns the canonical text. Every `set_text` runs the extractor exactly once
//! and appends the result; `undo`/`redo` move the cursor over cached entries
//! and never re-extract. Subscribers get a fresh [`Snapshot`] through a
//! `watch` channel whenever the exposed state changes.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::blocks::Block;
use crate::config::{DEFAULT_HISTORY_LIMIT, StoreConfig};
use crate::extract::{Extract, JsonExtractor};

use super::entry::{HistoryEntry, Snapshot};

pub struct HistoryStore<E = JsonExtractor> {
    extractor: E,
    entries: Vec<Arc<HistoryEntry>>,
    /// Always `< entries.len()`; entries is never empty.
    cursor: usize,
    limit: usize,
    notifier: watch::Sender<Snapshot>,
}

impl<E> std::fmt::Debug for HistoryStore<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HistoryStore")
            .field("cursor", &self.cursor)
            .field("entries", &self.entries.len())
            .field("limit", &self.limit)
            .finish()
    }
}

impl Default for HistoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl HistoryStore {
    pub fn new() -> Self {
        Self::with_limit(DEFAULT_HISTORY_LIMIT)
    }

    /// Keep at most `limit` entries (at least 1).
    pub fn with_limit(limit: usize) -> Self {
        Self::with_extractor(JsonExtractor, limit)
    }

    pub fn from_config(config: &StoreConfig) -> Self {
        Self::with_limit(config.history_limit)
    }
}

impl<E: Extract> HistoryStore<E> {
    pub fn with_extractor(extractor: E, limit: usize) -> Self {
        let seed = Arc::new(HistoryEntry::seed());
        let (notifier, _) = watch::channel(Snapshot {
            entry: seed.clone(),
            cursor: 0,
            len: 1,
        });

        Self {
            extractor,
            entries: vec![seed],
            cursor: 0,
            limit: limit.max(1),
            notifier,
        }
    }

    /// Commit new text: extract once, drop the redo future, append, evict
    /// the oldest entries beyond the limit.
    pub fn set_text(&mut self, text: impl Into<String>) {
        let text = text.into();
        let blocks = self.extractor.extract(&text);
        let found = blocks.len();
        let entry = Arc::new(HistoryEntry::new(text, blocks));

        let discarded = self.entries.len() - (self.cursor + 1);
        self.entries.truncate(self.cursor + 1);
        self.entries.push(entry);

        let evicted = self.entries.len().saturating_sub(self.limit);
        if evicted > 0 {
            self.entries.drain(..evicted);
        }
        self.cursor = self.entries.len() - 1;

        debug!(
            cursor = self.cursor,
            entries = self.entries.len(),
            blocks = found,
            discarded,
            evicted,
            "history append"
        );
        self.publish();
    }

    /// Step back one entry. Returns false (and does nothing) at the start.
    pub fn undo(&mut self) -> bool {
        if !self.can_undo() {
            return false;
        }
        self.cursor -= 1;
        debug!(cursor = self.cursor, "undo");
        self.publish();
        true
    }

    /// Step forward one entry. Returns false (and does nothing) at the tip.
    pub fn redo(&mut self) -> bool {
        if !self.can_redo() {
            return false;
        }
        self.cursor += 1;
        debug!(cursor = self.cursor, "redo");
        self.publish();
        true
    }

    /// Same as `set_text("")`; the previous text stays reachable via undo.
    pub fn clear(&mut self) {
        self.set_text(String::new());
    }

    pub fn can_undo(&self) -> bool {
        self.cursor > 0
    }

    pub fn can_redo(&self) -> bool {
        self.cursor + 1 < self.entries.len()
    }

    pub fn current(&self) -> Arc<HistoryEntry> {
        self.entries[self.cursor].clone()
    }

    pub fn text(&self) -> &str {
        &self.entries[self.cursor].text
    }

    pub fn blocks(&self) -> &[Block] {
        &self.entries[self.cursor].blocks
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Number of entries in the log. Never zero.
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// All entries, oldest first.
    pub fn entries(&self) -> impl Iterator<Item = &HistoryEntry> {
        self.entries.iter().map(|e| e.as_ref())
    }

    pub fn extractor(&self) -> &E {
        &self.extractor
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            entry: self.current(),
            cursor: self.cursor,
            len: self.entries.len(),
        }
    }

    /// Receiver that always holds the latest snapshot and is marked changed
    /// after every mutation of the exposed state.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.notifier.subscribe()
    }

    fn publish(&self) {
        // send_replace stores the value even with no live receivers.
        self.notifier.send_replace(self.snapshot());
    }
}
