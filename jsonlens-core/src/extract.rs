//! JSON block extractor.
//!
//! Inputs: arbitrary text (prose, logs, pasted payloads).
//! Output: every top-level JSON object/array literal in it, left to right.
//!
//! Two passes at most:
//! 1. the whole text as a single JSON document;
//! 2. otherwise a single scan that tracks bracket depth and string state and
//!    re-parses each balanced top-level run independently.
//!
//! A candidate that fails to parse is not an error, it is simply not a block.

use serde::Deserialize;
use serde_json::Value;
use tracing::trace;

use crate::blocks::Block;

/// Anything that can turn text into blocks.
///
/// The history store is generic over this so tests can count extractions.
pub trait Extract {
    fn extract(&self, text: &str) -> Vec<Block>;
}

/// The strict-JSON extractor used in production.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExtractor;

impl Extract for JsonExtractor {
    fn extract(&self, text: &str) -> Vec<Block> {
        extract(text)
    }
}

/// Parse `text` as strict JSON, `None` on any syntax error.
///
/// Nesting depth is bounded only by memory: the recursion limit is off and
/// the stack grows on demand. Numbers keep their source literal, so `1e400`
/// and 30-digit integers are valid values.
pub fn try_parse(text: &str) -> Option<Value> {
    let mut de = serde_json::Deserializer::from_str(text);
    de.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut de)).ok()?;
    // Trailing non-whitespace makes the whole text invalid.
    de.end().ok()?;
    Some(value)
}

/// Extract all top-level JSON blocks from `text`. Never fails.
pub fn extract(text: &str) -> Vec<Block> {
    if text.trim().is_empty() {
        return Vec::new();
    }

    // A text that is itself a JSON container is one block, never re-segmented.
    if let Some(block) = try_parse(text).and_then(|value| Block::new(value, 0..text.len())) {
        trace!(len = text.len(), "whole text is a single JSON block");
        return vec![block];
    }

    let blocks = scan(text);
    trace!(len = text.len(), found = blocks.len(), "scanned text for JSON blocks");
    blocks
}

/// Scanner state for one left-to-right pass.
#[derive(Debug, Default)]
struct Scanner {
    depth: usize,
    start: Option<usize>,
    in_string: bool,
    escape: bool,
}

impl Scanner {
    /// Feed one byte at offset `i`. Returns the span of a balanced top-level
    /// run when `i` closes one.
    fn step(&mut self, i: usize, byte: u8) -> Option<(usize, usize)> {
        if self.in_string {
            match byte {
                b'\\' if !self.escape => self.escape = true,
                b'"' if !self.escape => self.in_string = false,
                _ => self.escape = false,
            }
            return None;
        }

        match byte {
            b'"' => self.in_string = true,
            b'{' | b'[' => {
                if self.depth == 0 {
                    self.start = Some(i);
                }
                self.depth += 1;
            }
            b'}' | b']' => {
                // Stray closer outside any run: ignore it.
                if self.depth == 0 {
                    return None;
                }
                self.depth -= 1;
                if self.depth == 0 {
                    return self.start.take().map(|start| (start, i + 1));
                }
            }
            _ => {}
        }
        None
    }
}

// Scanning bytes is safe on UTF-8: every byte of a multibyte sequence is
// >= 0x80, so it never matches an ASCII delimiter.
fn scan(text: &str) -> Vec<Block> {
    let mut scanner = Scanner::default();
    let mut blocks = Vec::new();

    for (i, byte) in text.bytes().enumerate() {
        let Some((start, end)) = scanner.step(i, byte) else {
            continue;
        };
        let candidate = &text[start..end];
        match try_parse(candidate).and_then(|value| Block::new(value, start..end)) {
            Some(block) => blocks.push(block),
            None => trace!(start, end, "dropped malformed candidate"),
        }
    }

    blocks
}
