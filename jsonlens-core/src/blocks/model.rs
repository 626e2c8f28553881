//! JSON block model.
//!
//! Spans are byte offsets into the source `&str`. Every delimiter that opens or
//! closes a block is ASCII, so both ends always sit on char boundaries.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::ops::Range;
use uuid::Uuid;

pub type BlockId = Uuid;

/// Top-level JSON type of a block, taken from its opening delimiter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BlockKind {
    Object,
    Array,
}

impl BlockKind {
    /// Kind of a decoded value. `None` for scalars and `null`.
    pub fn of(value: &Value) -> Option<Self> {
        match value {
            Value::Object(_) => Some(BlockKind::Object),
            Value::Array(_) => Some(BlockKind::Array),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BlockKind::Object => "Object",
            BlockKind::Array => "Array",
        }
    }
}

impl std::fmt::Display for BlockKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One recognized JSON literal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Block {
    pub id: BlockId,
    pub content: Value,
    pub span: Range<usize>,
    pub kind: BlockKind,
}

impl Block {
    /// Wrap a decoded value found at `span`.
    ///
    /// Returns `None` unless the value is an object or an array.
    pub fn new(content: Value, span: Range<usize>) -> Option<Self> {
        let kind = BlockKind::of(&content)?;
        Some(Self {
            id: Uuid::new_v4(),
            content,
            span,
            kind,
        })
    }

    pub fn start(&self) -> usize {
        self.span.start
    }

    pub fn end(&self) -> usize {
        self.span.end
    }

    /// The slice of `text` this block was parsed from.
    ///
    /// `text` must be the text the block was extracted from; `None` if the
    /// span does not fit it.
    pub fn source<'a>(&self, text: &'a str) -> Option<&'a str> {
        text.get(self.span.clone())
    }

    /// Number of direct children (array items or object properties).
    pub fn len(&self) -> usize {
        match &self.content {
            Value::Object(map) => map.len(),
            Value::Array(items) => items.len(),
            _ => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
