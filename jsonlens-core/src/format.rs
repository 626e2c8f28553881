//! Formatting and export projections of decoded JSON values.

use std::str::FromStr;

use serde_json::Value;

use crate::error::{LensError, Result};
use crate::extract::try_parse;

/// Pretty-print with a 2-space indent. Keys keep insertion order.
pub fn format_json(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}

/// Pretty-print `text` if the whole of it is valid JSON, otherwise return it
/// untouched. Mixed prose is never reformatted.
pub fn format_json_in_text(text: &str) -> String {
    match try_parse(text) {
        Some(value) => format_json(&value),
        None => text.to_string(),
    }
}

/// Pretty JSON inside a fenced Markdown code block.
pub fn to_markdown(value: &Value) -> String {
    format!("```json\n{}\n```", format_json(value))
}

/// YAML-like plain-text flattening.
///
/// ```text
/// name: Alice
/// tags:
///   - a
///   - b
/// meta: {}
/// ```
pub fn to_text(value: &Value) -> String {
    match value {
        Value::Array(items) if items.is_empty() => "[]".to_string(),
        Value::Object(map) if map.is_empty() => "{}".to_string(),
        _ => flatten(value, 0),
    }
}

fn flatten(value: &Value, level: usize) -> String {
    let indent = "  ".repeat(level);
    match value {
        Value::Array(items) => items
            .iter()
            .map(|item| match empty_marker(item) {
                Some(marker) => format!("{indent}- {marker}"),
                None if is_container(item) => format!("{indent}-\n{}", flatten(item, level + 1)),
                None => format!("{indent}- {}", scalar_text(item)),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        Value::Object(map) => map
            .iter()
            .map(|(key, item)| match empty_marker(item) {
                Some(marker) => format!("{indent}{key}: {marker}"),
                None if is_container(item) => format!("{indent}{key}:\n{}", flatten(item, level + 1)),
                None => format!("{indent}{key}: {}", scalar_text(item)),
            })
            .collect::<Vec<_>>()
            .join("\n"),
        scalar => scalar_text(scalar),
    }
}

fn is_container(value: &Value) -> bool {
    matches!(value, Value::Array(_) | Value::Object(_))
}

fn empty_marker(value: &Value) -> Option<&'static str> {
    match value {
        Value::Array(items) if items.is_empty() => Some("[]"),
        Value::Object(map) if map.is_empty() => Some("{}"),
        _ => None,
    }
}

/// Strings print raw, everything else as its JSON literal.
fn scalar_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Heuristic for string values a renderer should show as Markdown.
pub fn looks_like_markdown(text: &str) -> bool {
    const MARKERS: [&str; 7] = ["#", "*", "`", "-", "> ", "[", "]("];

    let multiline = text.contains('\n');
    if !multiline && text.chars().count() < 50 {
        return false;
    }
    multiline || MARKERS.iter().any(|m| text.contains(m))
}

/// Copy/export targets for a block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Json,
    Text,
    Markdown,
}

impl ExportFormat {
    pub fn render(self, value: &Value) -> String {
        match self {
            ExportFormat::Json => format_json(value),
            ExportFormat::Text => to_text(value),
            ExportFormat::Markdown => to_markdown(value),
        }
    }
}

impl FromStr for ExportFormat {
    type Err = LensError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "json" => Ok(ExportFormat::Json),
            "text" | "txt" => Ok(ExportFormat::Text),
            "md" | "markdown" => Ok(ExportFormat::Markdown),
            _ => Err(LensError::UnknownFormat(s.to_string())),
        }
    }
}

/// Render `value` in the given export format.
pub fn export(value: &Value, format: ExportFormat) -> String {
    format.render(value)
}
