//! Index page generation.
//!
//! Stage 3 of the build pipeline. Takes the discovered pages and writes a
//! single index document linking to each of them.
//!
//! ## Ordering
//!
//! Directory listings come back in arbitrary order, so entries are sorted by:
//!
//! 1. the `(homework, question)` key from [`naming`](crate::naming), missing groups as 0
//! 2. numeric-aware filename comparison ([`natural_cmp`])
//! 3. discovery position
//!
//! `hw2_question1`, `hw1_question2`, `hw1_question1` therefore render as
//! `hw1_question1`, `hw1_question2`, `hw2_question1`.
//!
//! ## Output Structure
//!
//! ```text
//! <output_dir>/
//! ├── index.html          # Always regenerated, never patched
//! └── hw/                 # Only with mirror_source = true
//!     ├── hw1_question1.html
//!     └── ...
//! ```
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) with automatic escaping; the stylesheet
//! and download script are embedded at compile time from `static/`.

use crate::config::{self, SiteConfig};
use crate::inject::DOWNLOAD_JS;
use crate::naming::natural_cmp;
use crate::types::{FileEntry, IndexEntry};
use chrono::{DateTime, FixedOffset, Utc};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("cannot write {path}: {source}")]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot copy {from} to {to}: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

const CSS_STATIC: &str = include_str!("../static/index.css");

const REPO_ICON: &str = r#"<svg class="repo-icon" viewBox="0 0 16 16" fill="currentColor" aria-hidden="true"><path fill-rule="evenodd" d="M8 0C3.58 0 0 3.58 0 8c0 3.54 2.29 6.53 5.47 7.59.4.07.55-.17.55-.38 0-.19-.01-.82-.01-1.49-2.01.37-2.53-.49-2.69-.94-.09-.23-.48-.94-.82-1.13-.28-.15-.68-.52-.01-.53.63-.01 1.08.58 1.23.82.72 1.21 1.87.87 2.33.66.07-.52.28-.87.51-1.07-1.78-.2-3.64-.89-3.64-3.95 0-.87.31-1.59.82-2.15-.08-.2-.36-1.02.08-2.12 0 0 .67-.21 2.2.82.64-.18 1.32-.27 2-.27.68 0 1.36.09 2 .27 1.53-1.04 2.2-.82 2.2-.82.44 1.1.16 1.92.08 2.12.51.56.82 1.27.82 2.15 0 3.07-1.87 3.75-3.65 3.95.29.25.54.73.54 1.48 0 1.07-.01 1.93-.01 2.2 0 .21.15.46.55.38A8.013 8.013 0 0016 8c0-4.42-3.58-8-8-8z"></path></svg>"#;

const FAVICON: &str = "data:image/svg+xml,<svg xmlns='http://www.w3.org/2000/svg' viewBox='0 0 100 100'><text y='.9em' font-size='90'>📊</text></svg>";

/// Build timestamps are shown in UTC+8.
const DISPLAY_OFFSET: FixedOffset = match FixedOffset::east_opt(8 * 3600) {
    Some(offset) => offset,
    None => panic!("UTC+8 is a valid offset"),
};

/// The written index and the entries it lists, in display order.
#[derive(Debug)]
pub struct Generated {
    pub index_path: PathBuf,
    pub entries: Vec<IndexEntry>,
}

/// Render and write the index for `entries`.
pub fn generate(
    entries: &[FileEntry],
    config: &SiteConfig,
    built_at: DateTime<FixedOffset>,
) -> Result<Generated, GenerateError> {
    let ordered = order_entries(entries, &config.link_prefix);
    let index_path = config.index_path();

    fs::create_dir_all(&config.output_dir).map_err(|source| GenerateError::FileWrite {
        path: config.output_dir.clone(),
        source,
    })?;
    let markup = render_index(&ordered, config, built_at);
    fs::write(&index_path, markup.into_string()).map_err(|source| GenerateError::FileWrite {
        path: index_path.clone(),
        source,
    })?;
    debug!(path = %index_path.display(), entries = ordered.len(), "wrote index");

    Ok(Generated {
        index_path,
        entries: ordered,
    })
}

/// Map discovered files to index entries in display order.
pub fn order_entries(entries: &[FileEntry], link_prefix: &str) -> Vec<IndexEntry> {
    let mut ordered: Vec<IndexEntry> = entries
        .iter()
        .map(|e| IndexEntry::from_file(e, link_prefix))
        .collect();
    ordered.sort_by(|a, b| {
        a.sort_key
            .cmp(&b.sort_key)
            .then_with(|| natural_cmp(&a.filename, &b.filename))
            .then_with(|| a.position.cmp(&b.position))
    });
    ordered
}

/// Current time in the display timezone.
pub fn build_time_now() -> DateTime<FixedOffset> {
    to_display_zone(Utc::now())
}

pub fn to_display_zone(at: DateTime<Utc>) -> DateTime<FixedOffset> {
    at.with_timezone(&DISPLAY_OFFSET)
}

/// Format like `October 18, 2026, 09:05 (GMT+8)`.
pub fn format_build_time(at: DateTime<FixedOffset>) -> String {
    format!("{} (GMT+8)", at.format("%B %-d, %Y, %H:%M"))
}

/// Copy the source folder to `<output_dir>/<link_prefix>/`.
///
/// Directories on the way to the destination are skipped, so a destination
/// inside the source folder is never copied into itself.
///
/// Returns the number of files copied.
pub fn mirror_source(config: &SiteConfig) -> Result<usize, GenerateError> {
    let src = &config.source_dir;
    let dst = config.mirror_dir();
    let mut copied = 0;

    let dst_real = fs::create_dir_all(&dst)
        .and_then(|()| fs::canonicalize(&dst))
        .map_err(|source| GenerateError::Copy {
            from: src.clone(),
            to: dst.clone(),
            source,
        })?;
    let walker = WalkDir::new(src)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| {
            e.depth() == 0 || !(e.file_type().is_dir() && leads_to(e.path(), &dst_real))
        });

    for entry in walker {
        let entry = entry.map_err(|e| GenerateError::Copy {
            from: e.path().unwrap_or(src.as_path()).to_path_buf(),
            to: dst.clone(),
            source: e.into(),
        })?;
        let rel = entry.path().strip_prefix(src).unwrap_or(entry.path());
        let target = dst.join(rel);
        let copy_err = |source| GenerateError::Copy {
            from: entry.path().to_path_buf(),
            to: target.clone(),
            source,
        };

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target).map_err(copy_err)?;
        } else {
            fs::copy(entry.path(), &target).map_err(copy_err)?;
            copied += 1;
        }
    }
    debug!(from = %src.display(), to = %dst.display(), copied, "mirrored source folder");
    Ok(copied)
}

/// Whether `dir` is `target` or one of its ancestors.
fn leads_to(dir: &Path, target: &Path) -> bool {
    fs::canonicalize(dir).is_ok_and(|real| target.starts_with(real))
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(config: &SiteConfig, css: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="description" content=(config.description);
                link rel="icon" type="image/svg+xml" href=(FAVICON);
                title { (config.title) }
                style { (PreEscaped(css)) }
            }
            body {
                (content)
                script { (PreEscaped(DOWNLOAD_JS)) }
            }
        }
    }
}

fn repo_link(url: &str) -> Markup {
    html! {
        a.repo-link href=(url) target="_blank" rel="noopener noreferrer" {
            (PreEscaped(REPO_ICON))
            "View on GitHub"
        }
    }
}

/// Ordered list of entries, or the empty-state block.
fn entry_list(entries: &[IndexEntry]) -> Markup {
    html! {
        @if entries.is_empty() {
            div.empty-state {
                "No homework files found. Check back later!"
            }
        } @else {
            ol.homework-list {
                @for entry in entries {
                    li.homework-item {
                        a class="homework-link" href=(entry.href) { (entry.label) }
                    }
                }
            }
        }
    }
}

/// Renders the index page. `entries` must already be in display order.
pub fn render_index(
    entries: &[IndexEntry],
    config: &SiteConfig,
    built_at: DateTime<FixedOffset>,
) -> Markup {
    let css = format!(
        "{}\n\n{}",
        config::generate_color_css(&config.colors),
        CSS_STATIC
    );

    let content = html! {
        div.container {
            h1 { (config.title) }
            @if let Some(url) = &config.repo_link {
                (repo_link(url))
            }
            (entry_list(entries))
            div.actions {
                button.download-button type="button" onclick="hwIndexDownload()" {
                    "Download this page"
                }
            }
            div.build-time {
                "Built at: " (format_build_time(built_at))
            }
        }
    };

    base_document(config, &css, content)
}

// ============================================================================
// Tests
// ============================================================================
