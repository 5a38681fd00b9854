//! Per-file renaming and metadata rewriting

use crate::error::Error;
use crate::metadata;
use crate::pattern::{ClipPattern, Identity};
use crate::report::{UncertainItem, UncertainList};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome of processing one candidate file
#[derive(Debug, Clone, PartialEq)]
pub enum EntryOutcome {
    /// File was renamed to its canonical name
    Renamed { path: PathBuf },
    /// Name matched and already carried the canonical form
    Unchanged { path: PathBuf },
    /// Name did not fit the legacy grammar; file untouched
    Unmatched,
    /// Rename or metadata rewrite failed; batch continues
    Failed { message: String },
}

/// Process one candidate file: match, rename, rewrite metadata
///
/// Structural mismatches and I/O failures are pushed onto the uncertain
/// list and reflected in the returned outcome; they are never propagated
/// as errors, so one bad file cannot abort a batch.
pub fn process_entry(
    path: &Path,
    identity: &Identity,
    uncertain: &mut UncertainList,
) -> EntryOutcome {
    let extension = path
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy().to_lowercase()))
        .unwrap_or_default();

    let Some(file_name) = path.file_name().and_then(|n| n.to_str()) else {
        // Non-UTF-8 names cannot match the grammar
        uncertain.push(UncertainItem::File(path.to_path_buf()));
        return EntryOutcome::Unmatched;
    };

    let pattern = match ClipPattern::new(identity, &extension) {
        Ok(p) => p,
        Err(e) => {
            eprintln!("Warning: {}", e);
            uncertain.push(UncertainItem::File(path.to_path_buf()));
            return EntryOutcome::Failed {
                message: e.to_string(),
            };
        }
    };

    let Some(canonical) = pattern.canonical_name(file_name) else {
        uncertain.push(UncertainItem::File(path.to_path_buf()));
        return EntryOutcome::Unmatched;
    };

    let target = path.with_file_name(&canonical);
    let renamed = canonical != file_name;

    if renamed {
        if let Err(e) = fs::rename(path, &target) {
            let err = Error::Rename {
                from: path.to_path_buf(),
                to: target.clone(),
                source: e,
            };
            eprintln!("Warning: {}", err);
            uncertain.push(UncertainItem::File(path.to_path_buf()));
            return EntryOutcome::Failed {
                message: err.to_string(),
            };
        }
    }

    // Metadata siblings carry the video's name inside the document
    if extension == ".json" {
        let video_name = match canonical.strip_suffix(".json") {
            Some(stem) => format!("{}.mp4", stem),
            None => canonical.clone(),
        };

        if let Err(e) = metadata::rewrite_file(&target, &video_name) {
            eprintln!("Warning: failed to rewrite metadata '{}': {}", target.display(), e);
            uncertain.push(UncertainItem::File(target.clone()));
            return EntryOutcome::Failed {
                message: e.to_string(),
            };
        }
    }

    if renamed {
        EntryOutcome::Renamed { path: target }
    } else {
        EntryOutcome::Unchanged { path: target }
    }
}
