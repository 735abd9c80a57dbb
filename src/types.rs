//! Shared types passed between pipeline stages.
//!
//! Discovery produces [`FileEntry`] values; the index renderer turns them into
//! ordered [`IndexEntry`] values. Both serialize to JSON for `hw-index scan --json`.

use crate::naming::{self, SortKey};
use serde::Serialize;

/// A page found directly under the source folder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileEntry {
    /// Filename relative to the source folder.
    pub filename: String,
    /// Position in the directory listing. Used as the final sort tie-breaker.
    pub position: usize,
}

impl FileEntry {
    pub fn new(filename: impl Into<String>, position: usize) -> Self {
        Self {
            filename: filename.into(),
            position,
        }
    }
}

/// A page as shown in the index.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexEntry {
    pub filename: String,
    /// Display label (extension stripped, `hwN_questionM` reformatted)
    pub label: String,
    /// Relative link target, `<link_prefix>/<filename>`
    pub href: String,
    #[serde(skip)]
    pub sort_key: SortKey,
    #[serde(skip)]
    pub position: usize,
}

impl IndexEntry {
    pub fn from_file(entry: &FileEntry, link_prefix: &str) -> Self {
        let parsed = naming::parse_entry_name(&entry.filename);
        Self {
            filename: entry.filename.clone(),
            label: parsed.label.clone(),
            href: format!("{}/{}", link_prefix, entry.filename),
            sort_key: parsed.sort_key(),
            position: entry.position,
        }
    }
}
