//! Rewriting of clip metadata documents
//!
//! Metadata documents are arbitrarily nested JSON. The rewrite walks the
//! whole document and fixes up three well-known fields wherever they
//! appear in an object: `video_name`, `class_name` and `player_name`.
//! Everything else is left exactly as loaded.

use crate::error::{Error, Result};
use crate::normalize::normalize_category;
use serde_json::Value;
use std::fs;
use std::path::Path;

/// Recursively rewrite known fields in place
///
/// - `video_name` (string) becomes `video_name`, the canonical clip name
/// - `class_name` (string) is category-normalized
/// - `player_name` (string) has underscores replaced with spaces
///
/// Non-string values under those keys are recursed into like any other
/// node, never replaced.
pub fn rewrite_fields(value: &mut Value, video_name: &str) {
    match value {
        Value::Object(map) => {
            for (key, entry) in map.iter_mut() {
                match (key.as_str(), &mut *entry) {
                    ("video_name", Value::String(s)) => *s = video_name.to_string(),
                    ("class_name", Value::String(s)) => *s = normalize_category(s),
                    ("player_name", Value::String(s)) => *s = s.replace('_', " "),
                    (_, nested) => rewrite_fields(nested, video_name),
                }
            }
        }
        Value::Array(entries) => {
            for entry in entries.iter_mut() {
                rewrite_fields(entry, video_name);
            }
        }
        _ => {}
    }
}

/// Load a metadata document, rewrite its fields and write it back
/// pretty-printed
pub fn rewrite_file(path: &Path, video_name: &str) -> Result<()> {
    let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut document: Value = serde_json::from_str(&content)?;

    rewrite_fields(&mut document, video_name);

    let pretty = serde_json::to_string_pretty(&document)?;
    fs::write(path, pretty).map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}
