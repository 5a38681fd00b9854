//! Legacy clip-name grammar and canonical name computation
//!
//! The legacy grammar is `First[_ ]Last[_ ]<category>[_ ]<digits><ext>`,
//! matched case-insensitively and anchored at the start of the name. The
//! same pattern is shared by the file renamer and the mapping table
//! updater so both surfaces rewrite names identically.

use crate::error::Result;
use crate::normalize::{format_sequence, normalize_category};
use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

/// The (first, last) name pair anchoring all matches for one batch run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    /// Subject's first name, used verbatim in patterns and output names
    pub first: String,
    /// Subject's last name
    pub last: String,
}

impl Identity {
    /// Create a new identity from first and last name
    pub fn new(first: impl Into<String>, last: impl Into<String>) -> Self {
        Self {
            first: first.into(),
            last: last.into(),
        }
    }

    /// Name of the legacy (underscore-joined) URL mapping table
    pub fn legacy_table_name(&self) -> String {
        format!("{}_{}_url_mapping.csv", self.first, self.last)
    }

    /// Name of the canonical (space-joined) URL mapping table
    pub fn canonical_table_name(&self) -> String {
        format!("{} {}_url_mapping.csv", self.first, self.last)
    }

    /// Compose a canonical entry name from already-normalized parts
    pub fn entry_name(&self, category: &str, sequence: &str, extension: &str) -> String {
        format!(
            "{} {}_{}_{}{}",
            self.first, self.last, category, sequence, extension
        )
    }
}

/// Compiled matcher for legacy clip names with a fixed extension
#[derive(Debug, Clone)]
pub struct ClipPattern {
    identity: Identity,
    extension: String,
    regex: Regex,
}

impl ClipPattern {
    /// Build a pattern for the given identity and extension
    ///
    /// The extension includes its leading dot (e.g. ".mp4") and may be
    /// empty for names without one. Identity tokens and extension are
    /// escaped, so arbitrary user input cannot break the pattern.
    pub fn new(identity: &Identity, extension: &str) -> Result<Self> {
        let pattern = format!(
            r"^{}[_ ]{}[_ ](3points|3pts|3pt|freethrow)[_ ](\d+){}",
            regex::escape(&identity.first),
            regex::escape(&identity.last),
            regex::escape(extension),
        );
        let regex = RegexBuilder::new(&pattern).case_insensitive(true).build()?;

        Ok(Self {
            identity: identity.clone(),
            extension: extension.to_string(),
            regex,
        })
    }

    /// The extension this pattern was built for
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Match a name against the legacy grammar and compute its canonical
    /// replacement
    ///
    /// Returns `None` when the name does not fit the grammar; callers
    /// route those to the uncertain list.
    pub fn canonical_name(&self, name: &str) -> Option<String> {
        let caps = self.regex.captures(name)?;
        let category = normalize_category(&caps[1]);
        let sequence = format_sequence(&caps[2]);
        Some(self.identity.entry_name(&category, &sequence, &self.extension))
    }
}
