//! URL mapping table updater
//!
//! The legacy table `"{first}_{last}_url_mapping.csv"` is rewritten to
//! canonical clip names and re-created under the space-joined name; the
//! legacy file is removed only after the replacement is fully written.
//! A table missing the clip-name column is a whole-file problem and is
//! left untouched, unlike per-row mismatches which pass through.

use crate::error::{Error, Result};
use crate::pattern::{ClipPattern, Identity};
use crate::report::{UncertainItem, UncertainList};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Header of the column holding clip names
pub const CLIP_NAME_COLUMN: &str = "Clip Name";

/// What happened to the mapping table during a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum TableOutcome {
    /// Rows rewritten, replacement written, legacy file retired
    Updated { path: PathBuf, rows: usize },
    /// No legacy table present; expected, not an error
    Missing,
    /// Header lacks the clip-name column; file left untouched
    BadFormat,
    /// Read or write failed; legacy file left in place
    Failed,
}

/// A rewritten table ready to be persisted
#[derive(Debug, Clone, PartialEq)]
pub struct RewrittenTable {
    /// Header fields in original order
    pub headers: Vec<String>,
    /// Row fields in original order, clip names canonicalized
    pub rows: Vec<Vec<String>>,
}

/// Update the subject's mapping table inside `dir`
///
/// Never returns an error: absence, bad format and I/O failures are all
/// reported through the outcome (and the uncertain list for failures).
pub fn update_table(dir: &Path, identity: &Identity, uncertain: &mut UncertainList) -> TableOutcome {
    let legacy_path = dir.join(identity.legacy_table_name());

    if !legacy_path.exists() {
        println!(
            "No URL mapping table found for {} {}. Skipping table update.",
            identity.first, identity.last
        );
        return TableOutcome::Missing;
    }

    let target_path = dir.join(identity.canonical_table_name());

    match rewrite_table_file(&legacy_path, &target_path, identity, uncertain) {
        Ok(Some(rows)) => {
            retire_legacy_table(&legacy_path);
            println!("Updated and renamed mapping table: {}", target_path.display());
            TableOutcome::Updated {
                path: target_path,
                rows,
            }
        }
        Ok(None) => {
            eprintln!(
                "Warning: mapping table format unexpected (no '{}' column): {}",
                CLIP_NAME_COLUMN,
                legacy_path.display()
            );
            TableOutcome::BadFormat
        }
        Err(e) => {
            eprintln!(
                "Warning: failed to process mapping table '{}': {}",
                legacy_path.display(),
                e
            );
            uncertain.push(UncertainItem::Table(legacy_path));
            TableOutcome::Failed
        }
    }
}

/// Read, rewrite and persist the table; `Ok(None)` means the clip-name
/// column is missing and nothing was written
fn rewrite_table_file(
    legacy_path: &Path,
    target_path: &Path,
    identity: &Identity,
    uncertain: &mut UncertainList,
) -> Result<Option<usize>> {
    let raw = fs::read_to_string(legacy_path).map_err(|e| Error::FileRead {
        path: legacy_path.to_path_buf(),
        source: e,
    })?;
    // Tables exported from spreadsheet tools often lead with a UTF-8 BOM
    let content = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let table = match rewrite_rows(content, legacy_path, identity, uncertain)? {
        Some(table) => table,
        None => return Ok(None),
    };

    write_table(target_path, &table)?;
    Ok(Some(table.rows.len()))
}

/// Rewrite clip names in CSV content, keeping every row
///
/// Returns `Ok(None)` when the header has no clip-name column. Rows whose
/// clip name does not fit the legacy grammar are kept verbatim and their
/// name is pushed onto the uncertain list.
pub fn rewrite_rows(
    content: &str,
    source: &Path,
    identity: &Identity,
    uncertain: &mut UncertainList,
) -> Result<Option<RewrittenTable>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?
        .iter()
        .map(|h| h.to_string())
        .collect();

    let Some(clip_idx) = headers.iter().position(|h| h == CLIP_NAME_COLUMN) else {
        return Ok(None);
    };

    // One compiled pattern per extension seen in the table
    let mut patterns: HashMap<String, ClipPattern> = HashMap::new();
    let mut rows = Vec::new();

    for result in reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: source.to_path_buf(),
            source: e,
        })?;
        let mut fields: Vec<String> = record.iter().map(|s| s.to_string()).collect();

        let clip_name = fields.get(clip_idx).cloned().unwrap_or_default();
        let extension = Path::new(&clip_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        if !patterns.contains_key(&extension) {
            patterns.insert(extension.clone(), ClipPattern::new(identity, &extension)?);
        }

        match patterns[&extension].canonical_name(&clip_name) {
            Some(canonical) => fields[clip_idx] = canonical,
            None => uncertain.push(UncertainItem::TableRow(clip_name)),
        }

        rows.push(fields);
    }

    Ok(Some(RewrittenTable { headers, rows }))
}

/// Write the rewritten table with csv defaults (minimal quoting, `\n`)
fn write_table(path: &Path, table: &RewrittenTable) -> Result<()> {
    let mut writer = csv::Writer::from_path(path).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;

    writer.write_record(&table.headers).map_err(|e| Error::Csv {
        path: path.to_path_buf(),
        source: e,
    })?;
    for row in &table.rows {
        writer.write_record(row).map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;
    }

    writer.flush().map_err(|e| Error::FileWrite {
        path: path.to_path_buf(),
        source: e,
    })?;
    Ok(())
}

/// Remove the legacy table; a file already gone is a silent no-op
fn retire_legacy_table(path: &Path) {
    if let Err(e) = fs::remove_file(path) {
        if e.kind() != std::io::ErrorKind::NotFound {
            eprintln!("Warning: failed to remove '{}': {}", path.display(), e);
        }
    }
}
