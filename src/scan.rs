//! Discovery: list the homework pages in the source folder.
//!
//! Stage 1 of the build pipeline. Only entries directly under the source
//! folder are considered; subdirectories are not descended into.
//!
//! ```text
//! hw/
//! ├── hw1_question1.html    ✓ page
//! ├── hw1_question2.HTML    ✓ page (extension match is case-insensitive)
//! ├── data.csv              ✗ wrong extension
//! └── assets/               ✗ directory
//! ```
//!
//! The returned order is the directory listing order, which the filesystem
//! does not guarantee. The index renderer establishes the display order.

use crate::config::SiteConfig;
use crate::types::FileEntry;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("cannot list source directory {path}: {source}")]
    DirectoryAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discover pages under `config.source_dir` with a recognized extension.
pub fn scan(config: &SiteConfig) -> Result<Vec<FileEntry>, ScanError> {
    discover(&config.source_dir, |p| config.matches_extension(p))
}

/// List regular files directly under `dir` accepted by `matches`.
///
/// Fails when the directory itself cannot be listed. Individual entries that
/// cannot be inspected, or whose names are not UTF-8, are skipped.
pub fn discover(
    dir: &Path,
    matches: impl Fn(&Path) -> bool,
) -> Result<Vec<FileEntry>, ScanError> {
    let read_dir = fs::read_dir(dir).map_err(|source| ScanError::DirectoryAccess {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut entries = Vec::new();
    for entry in read_dir.filter_map(|e| e.ok()) {
        let path = entry.path();
        if !path.is_file() || !matches(&path) {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => {
                debug!(file = %name, "discovered page");
                let position = entries.len();
                entries.push(FileEntry::new(name, position));
            }
            Err(raw) => warn!(file = ?raw, "skipping page with non UTF-8 name"),
        }
    }
    Ok(entries)
}
