//! Shared test utilities for the hw-index test suite.
//!
//! Provides page builders, a config pointed at temp directories, and
//! assertions on rendered index markup.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = TempDir::new().unwrap();
//! write_page(tmp.path(), "hw1_question1.html", &plain_page("Q1"));
//! let config = config_for(tmp.path(), tmp.path());
//! ```

use crate::config::SiteConfig;
use crate::types::FileEntry;
use std::path::Path;

// =========================================================================
// Page fixtures
// =========================================================================

/// A minimal well-formed page with one `</head>` and one `</body>`.
pub fn plain_page(title: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<title>{title}</title>\n</head>\n<body>\n<h1>{title}</h1>\n</body>\n</html>\n"
    )
}

/// Write `content` to `dir/name`. Panics on failure.
pub fn write_page(dir: &Path, name: &str, content: &str) {
    std::fs::write(dir.join(name), content)
        .unwrap_or_else(|e| panic!("failed to write {name}: {e}"));
}

/// Read `dir/name` to a string. Panics on failure.
pub fn read_page(dir: &Path, name: &str) -> String {
    std::fs::read_to_string(dir.join(name))
        .unwrap_or_else(|e| panic!("failed to read {name}: {e}"))
}

/// File entries in the given order, positions assigned sequentially.
pub fn entries(names: &[&str]) -> Vec<FileEntry> {
    names
        .iter()
        .enumerate()
        .map(|(i, n)| FileEntry::new(*n, i))
        .collect()
}

// =========================================================================
// Config
// =========================================================================

/// Stock config reading from `source` and writing into `output`.
pub fn config_for(source: &Path, output: &Path) -> SiteConfig {
    SiteConfig {
        source_dir: source.to_path_buf(),
        output_dir: output.to_path_buf(),
        ..SiteConfig::default()
    }
}

// =========================================================================
// Markup assertions
// =========================================================================

/// Extract the `href` values of `homework-link` anchors, in document order.
pub fn index_links(html: &str) -> Vec<String> {
    html.split(r#"class="homework-link" href=""#)
        .skip(1)
        .filter_map(|rest| rest.split('"').next())
        .map(str::to_string)
        .collect()
}

/// Count non-overlapping occurrences of `needle`.
pub fn count(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}
