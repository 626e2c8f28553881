//! Plain-text views of blocks and history for the terminal.
//!
//! Everything here returns strings; styling is applied by the caller.

use chrono::Local;
use jsonlens_core::format::looks_like_markdown;
use jsonlens_core::{Block, ExportFormat, HistoryEntry, Snapshot, format_json};
use serde_json::Value;

const MAX_SCALAR_CHARS: usize = 80;
const MAX_PREVIEW_CHARS: usize = 40;

/// `3 items` / `2 props`, like the tree header badges.
pub fn count_label(value: &Value) -> String {
    match value {
        Value::Array(items) => format!("{} items", items.len()),
        Value::Object(map) => format!("{} props", map.len()),
        _ => String::new(),
    }
}

/// One-line summary card: `JSON #1 · Object · 2 props · 24 bytes`.
pub fn block_card(index: usize, block: &Block) -> String {
    format!(
        "JSON #{} · {} · {} · {} bytes",
        index + 1,
        block.kind,
        count_label(&block.content),
        format_json(&block.content).len()
    )
}

pub fn block_cards(text: &str, blocks: &[Block]) -> Vec<String> {
    if blocks.is_empty() {
        let hint = if text.is_empty() {
            "No JSON detected. Paste text containing JSON to get started."
        } else {
            "No JSON detected. No valid JSON objects or arrays in the text."
        };
        return vec![hint.to_string()];
    }
    blocks
        .iter()
        .enumerate()
        .map(|(i, block)| block_card(i, block))
        .collect()
}

/// Every block of `blocks`, each under a card header, in `format`.
/// `None` prints cards only.
pub fn render_blocks(blocks: &[Block], format: Option<ExportFormat>) -> String {
    let mut out = String::new();
    for (i, block) in blocks.iter().enumerate() {
        match format {
            Some(format) => {
                out.push_str(&format!("── {} ──\n", block_card(i, block)));
                out.push_str(&format.render(&block.content));
                out.push('\n');
            }
            None => {
                out.push_str(&block_card(i, block));
                out.push('\n');
            }
        }
    }
    out
}

/// Indented tree outline. Containers at depth `< expand_level` are expanded.
pub fn outline(value: &Value, expand_level: usize) -> Vec<String> {
    let mut lines = Vec::new();
    outline_node(None, value, 0, expand_level, &mut lines);
    lines
}

fn outline_node(
    name: Option<&str>,
    value: &Value,
    level: usize,
    expand_level: usize,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(level);
    let label = name.map(|n| format!("{n} ")).unwrap_or_default();

    let children: Vec<(String, &Value)> = match value {
        Value::Array(items) => items
            .iter()
            .enumerate()
            .map(|(i, v)| (i.to_string(), v))
            .collect(),
        Value::Object(map) => map.iter().map(|(k, v)| (k.clone(), v)).collect(),
        scalar => {
            let name = name.unwrap_or("value");
            lines.push(format!("{indent}{name}: {}", scalar_preview(scalar)));
            return;
        }
    };

    let brackets = if value.is_array() { "[]" } else { "{}" };
    let expanded = level < expand_level && !children.is_empty();
    let marker = if children.is_empty() {
        " "
    } else if expanded {
        "▾"
    } else {
        "▸"
    };
    lines.push(format!(
        "{indent}{marker} {label}{brackets} {}",
        count_label(value)
    ));

    if expanded {
        for (child_name, child) in children {
            outline_node(Some(&child_name), child, level + 1, expand_level, lines);
        }
    }
}

fn scalar_preview(value: &Value) -> String {
    match value {
        Value::String(s) if looks_like_markdown(s) => {
            let first = s.lines().next().unwrap_or_default();
            format!(
                "{} (markdown, {} lines)",
                truncate(first, MAX_PREVIEW_CHARS),
                s.lines().count()
            )
        }
        Value::String(s) => truncate(s, MAX_SCALAR_CHARS),
        other => other.to_string(),
    }
}

/// Status line shown after every change.
pub fn status_line(snapshot: &Snapshot) -> String {
    let detected = match snapshot.blocks().len() {
        0 => "No JSON detected".to_string(),
        1 => "1 JSON block detected".to_string(),
        n => format!("{n} JSON blocks detected"),
    };
    format!(
        "{detected} · undo {} · redo {} · {}/{}",
        mark(snapshot.can_undo()),
        mark(snapshot.can_redo()),
        snapshot.cursor + 1,
        snapshot.len
    )
}

fn mark(on: bool) -> &'static str {
    if on { "✓" } else { "✗" }
}

/// One line per history entry, `→` marking the active one.
pub fn history_lines<'a>(
    entries: impl Iterator<Item = &'a HistoryEntry>,
    cursor: usize,
) -> Vec<String> {
    entries
        .enumerate()
        .map(|(i, entry)| {
            let marker = if i == cursor { "→" } else { " " };
            let preview = entry.text.lines().next().unwrap_or_default();
            format!(
                "{marker} {:>2}  {}  {} block(s)  {}",
                i,
                entry.recorded_at.with_timezone(&Local).format("%H:%M:%S"),
                entry.blocks.len(),
                if preview.is_empty() {
                    "(empty)".to_string()
                } else {
                    truncate(preview, MAX_PREVIEW_CHARS)
                }
            )
        })
        .collect()
}

/// Char-safe truncation with an ellipsis.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out: String = s.chars().take(max).collect();
    out.push('…');
    out
}
