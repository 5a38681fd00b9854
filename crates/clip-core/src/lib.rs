//! clip-core: Core library for batch-renaming clip files
//!
//! This library provides functionality to:
//! - Normalize shot category labels and sequence numbers to canonical form
//! - Match legacy clip names and compute their canonical replacements
//! - Rename clip files and rewrite their JSON metadata siblings
//! - Update a subject's URL mapping CSV to canonical clip names
//! - Walk a subject directory and collect everything uncertain for review

pub mod error;
pub mod mapping;
pub mod metadata;
pub mod normalize;
pub mod pattern;
pub mod renamer;
pub mod report;
pub mod walker;

pub use error::{Error, Result};
pub use mapping::{update_table, RewrittenTable, TableOutcome, CLIP_NAME_COLUMN};
pub use normalize::{format_sequence, normalize_category};
pub use pattern::{ClipPattern, Identity};
pub use renamer::{process_entry, EntryOutcome};
pub use report::{RunReport, UncertainItem, UncertainList};
pub use walker::run_batch;
