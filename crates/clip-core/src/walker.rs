//! Batch driver: mapping table update plus recursive file renaming

use crate::error::{Error, Result};
use crate::mapping;
use crate::pattern::Identity;
use crate::renamer::{self, EntryOutcome};
use crate::report::{RunReport, UncertainList};
use chrono::Utc;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions the renamer visits (case-insensitive)
const CANDIDATE_EXTENSIONS: &[&str] = &["mp4", "json"];

/// Process a whole subject directory
///
/// Updates the URL mapping table first, then renames every candidate
/// file under `dir`. The only fatal condition is a missing root
/// directory; everything else is collected into the report.
pub fn run_batch(dir: &Path, identity: &Identity) -> Result<RunReport> {
    if !dir.is_dir() {
        return Err(Error::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut uncertain = UncertainList::new();

    let table = mapping::update_table(dir, identity, &mut uncertain);

    // Collect candidates up front so renames cannot affect the walk
    let mut candidates: Vec<PathBuf> = Vec::new();
    for entry in WalkDir::new(dir)
        .follow_links(true)
        .into_iter()
        .filter_map(|e| e.ok())
    {
        if entry.file_type().is_file() && is_candidate(entry.path()) {
            candidates.push(entry.path().to_path_buf());
        }
    }

    let mut renamed = 0;
    let mut unchanged = 0;
    let mut failed = 0;

    for path in &candidates {
        match renamer::process_entry(path, identity, &mut uncertain) {
            EntryOutcome::Renamed { .. } => renamed += 1,
            EntryOutcome::Unchanged { .. } => unchanged += 1,
            EntryOutcome::Failed { .. } => failed += 1,
            EntryOutcome::Unmatched => {}
        }
    }

    Ok(RunReport {
        timestamp: Utc::now(),
        root: dir.to_path_buf(),
        identity: identity.clone(),
        renamed,
        unchanged,
        failed,
        table,
        uncertain,
    })
}

/// Only video clips and their metadata siblings are candidates
fn is_candidate(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .is_some_and(|ext| CANDIDATE_EXTENSIONS.contains(&ext.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mapping::TableOutcome;
    use crate::report::UncertainItem;
    use std::fs;

    fn keldon() -> Identity {
        Identity::new("Keldon", "Johnson")
    }

    #[test]
    fn test_missing_root_is_fatal() {
        let result = run_batch(Path::new("/nonexistent/clips"), &keldon());
        assert!(matches!(result, Err(Error::DirectoryNotFound(_))));
    }

    #[test]
    fn test_full_batch() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Keldon_Johnson_3points_7.mp4"), b"video").unwrap();
        fs::write(
            dir.path().join("Keldon_Johnson_3points_7.json"),
            r#"{"video_name": "Keldon_Johnson_3points_7.mp4", "class_name": "3pts", "player_name": "Keldon_Johnson"}"#,
        )
        .unwrap();
        fs::write(dir.path().join("mystery_clip.mp4"), b"video").unwrap();
        fs::write(dir.path().join("notes.txt"), b"not a clip").unwrap();
        fs::write(
            dir.path().join("Keldon_Johnson_url_mapping.csv"),
            "Clip Name,URL\nKeldon_Johnson_freethrow_12.mov,https://example.com/a\n",
        )
        .unwrap();

        let report = run_batch(dir.path(), &keldon()).unwrap();

        assert_eq!(report.renamed, 2);
        assert_eq!(report.unchanged, 0);
        assert_eq!(report.failed, 0);
        assert!(matches!(report.table, TableOutcome::Updated { rows: 1, .. }));

        assert!(dir.path().join("Keldon Johnson_3pt_007.mp4").exists());
        assert!(dir.path().join("Keldon Johnson_3pt_007.json").exists());
        assert!(dir.path().join("Keldon Johnson_url_mapping.csv").exists());
        // Unmatched and non-candidate files stay where they were
        assert!(dir.path().join("mystery_clip.mp4").exists());
        assert!(dir.path().join("notes.txt").exists());

        assert_eq!(
            report.uncertain.items(),
            &[UncertainItem::File(dir.path().join("mystery_clip.mp4"))]
        );
    }

    #[test]
    fn test_nested_directories_are_walked() {
        let dir = tempfile::tempdir().unwrap();
        let sub = dir.path().join("session_1");
        fs::create_dir(&sub).unwrap();
        fs::write(sub.join("Keldon_Johnson_freethrow_3.mp4"), b"video").unwrap();

        let report = run_batch(dir.path(), &keldon()).unwrap();

        assert_eq!(report.renamed, 1);
        assert!(sub.join("Keldon Johnson_freethrow_003.mp4").exists());
    }

    #[test]
    fn test_non_candidate_extensions_never_visited() {
        let dir = tempfile::tempdir().unwrap();
        // Would match the grammar, but .mov files are not candidates
        fs::write(dir.path().join("Keldon_Johnson_3pt_1.mov"), b"video").unwrap();

        let report = run_batch(dir.path(), &keldon()).unwrap();

        assert_eq!(report.renamed, 0);
        assert!(report.uncertain.is_empty());
        assert!(dir.path().join("Keldon_Johnson_3pt_1.mov").exists());
    }

    #[test]
    fn test_second_run_performs_no_further_mutation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("Keldon_Johnson_3points_7.mp4"), b"video").unwrap();
        fs::write(
            dir.path().join("Keldon_Johnson_url_mapping.csv"),
            "Clip Name,URL\nKeldon_Johnson_3pt_2.mp4,https://example.com\n",
        )
        .unwrap();

        let first = run_batch(dir.path(), &keldon()).unwrap();
        assert_eq!(first.renamed, 1);

        let second = run_batch(dir.path(), &keldon()).unwrap();
        assert_eq!(second.renamed, 0);
        assert_eq!(second.unchanged, 1);
        // Legacy table name is gone after the first run
        assert_eq!(second.table, TableOutcome::Missing);
        assert!(dir.path().join("Keldon Johnson_3pt_007.mp4").exists());
        assert!(dir.path().join("Keldon Johnson_url_mapping.csv").exists());
    }
}
