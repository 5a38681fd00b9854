//! Uncertain-item collection and the per-run report
//!
//! The uncertain list is an explicit value threaded through every step of
//! a run; nothing in the crate keeps ambient state. The report can be
//! persisted as JSON for later review.

use crate::error::Result;
use crate::mapping::TableOutcome;
use crate::pattern::Identity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// An item the rules could not confidently process
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "item", rename_all = "snake_case")]
pub enum UncertainItem {
    /// A file whose name did not match the legacy grammar, or whose
    /// metadata could not be rewritten
    File(PathBuf),
    /// A mapping table row whose clip name did not match
    TableRow(String),
    /// A mapping table that could not be read or rewritten
    Table(PathBuf),
}

impl fmt::Display for UncertainItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UncertainItem::File(path) => write!(f, "{}", path.display()),
            UncertainItem::TableRow(clip_name) => write!(f, "CSV: {}", clip_name),
            UncertainItem::Table(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Append-only log of items deferred to manual review
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UncertainList {
    items: Vec<UncertainItem>,
}

impl UncertainList {
    /// Create a new empty list
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an item; items are never removed or reordered
    pub fn push(&mut self, item: UncertainItem) {
        self.items.push(item);
    }

    /// All collected items, in insertion order
    pub fn items(&self) -> &[UncertainItem] {
        &self.items
    }

    /// Number of collected items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing was deferred
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Summary of one batch run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// When the run finished
    pub timestamp: DateTime<Utc>,
    /// Root directory that was processed
    pub root: PathBuf,
    /// Identity tokens the run was anchored to
    pub identity: Identity,
    /// Files renamed to their canonical name
    pub renamed: usize,
    /// Files that matched but already carried the canonical name
    pub unchanged: usize,
    /// Files whose rename or metadata rewrite failed
    pub failed: usize,
    /// What happened to the URL mapping table
    pub table: TableOutcome,
    /// Everything deferred to manual review
    pub uncertain: UncertainList,
}

impl RunReport {
    /// Save the report as pretty-printed JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_uncertain_list_preserves_order() {
        let mut list = UncertainList::new();
        list.push(UncertainItem::File(PathBuf::from("a.mp4")));
        list.push(UncertainItem::TableRow("clip.mov".to_string()));
        list.push(UncertainItem::File(PathBuf::from("b.json")));

        assert_eq!(list.len(), 3);
        assert_eq!(list.items()[0], UncertainItem::File(PathBuf::from("a.mp4")));
        assert_eq!(
            list.items()[1],
            UncertainItem::TableRow("clip.mov".to_string())
        );
    }

    #[test]
    fn test_uncertain_item_display() {
        assert_eq!(
            UncertainItem::TableRow("x.mp4".to_string()).to_string(),
            "CSV: x.mp4"
        );
        assert_eq!(
            UncertainItem::File(PathBuf::from("dir/x.mp4")).to_string(),
            format!("{}", Path::new("dir/x.mp4").display())
        );
    }

    #[test]
    fn test_report_serialization() {
        let report = RunReport {
            timestamp: Utc::now(),
            root: PathBuf::from("/clips"),
            identity: Identity::new("Keldon", "Johnson"),
            renamed: 2,
            unchanged: 1,
            failed: 0,
            table: TableOutcome::Missing,
            uncertain: UncertainList::new(),
        };

        let json = serde_json::to_string_pretty(&report).unwrap();
        let loaded: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(loaded.renamed, 2);
        assert_eq!(loaded.identity, Identity::new("Keldon", "Johnson"));
        assert!(loaded.uncertain.is_empty());
    }
}
