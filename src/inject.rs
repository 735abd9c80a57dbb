//! Injector: add the navigation bar to each homework page.
//!
//! Stage 2 of the build pipeline. Every page gets two fragments:
//!
//! - **Head fragment**, inserted before `</head>`: the [`MARKER`] comment,
//!   the bar's stylesheet, and the "download this page" script.
//! - **Body fragment**, inserted before `</body>`: the bar itself, with a link
//!   back to the index and a download button.
//!
//! ## Idempotence
//!
//! A page that already contains [`MARKER`] is left untouched, so running the
//! build repeatedly never stacks bars.
//!
//! ## Anchors
//!
//! Insertion works on raw bytes. Each anchor must occur exactly once (ASCII
//! case-insensitive); otherwise the page is not modified and the call fails
//! with [`InjectError::MissingAnchor`] or [`InjectError::AmbiguousAnchor`].
//!
//! ## Batch Behavior
//!
//! [`Injector::inject_all`] handles pages one at a time in discovery order.
//! A failure on one page is logged and recorded in the [`InjectReport`]; the
//! remaining pages are still processed.

use crate::config::SiteConfig;
use crate::types::FileEntry;
use maud::{PreEscaped, html};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Sentinel marking a page as already processed.
pub const MARKER: &str = "<!-- hw-index:injected -->";

pub const HEAD_ANCHOR: &str = "</head>";
pub const BODY_ANCHOR: &str = "</body>";

const BAR_CSS: &str = include_str!("../static/bar.css");
pub(crate) const DOWNLOAD_JS: &str = include_str!("../static/download.js");

#[derive(Error, Debug)]
pub enum InjectError {
    #[error("cannot read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("cannot write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("{path} has no {anchor} tag")]
    MissingAnchor { path: PathBuf, anchor: &'static str },
    #[error("{path} has {count} {anchor} tags, expected exactly one")]
    AmbiguousAnchor {
        path: PathBuf,
        anchor: &'static str,
        count: usize,
    },
}

/// Anchor precondition failure, before a path is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorError {
    Missing(&'static str),
    Ambiguous(&'static str, usize),
}

impl AnchorError {
    fn at(self, path: &Path) -> InjectError {
        let path = path.to_path_buf();
        match self {
            AnchorError::Missing(anchor) => InjectError::MissingAnchor { path, anchor },
            AnchorError::Ambiguous(anchor, count) => InjectError::AmbiguousAnchor {
                path,
                anchor,
                count,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectOutcome {
    /// Fragments were inserted and the page rewritten.
    Injected,
    /// The marker was already present; nothing was written.
    AlreadyInjected,
}

/// Per-page results of a batch run, in processing order.
#[derive(Debug, Default)]
pub struct InjectReport {
    pub results: Vec<(String, Result<InjectOutcome, InjectError>)>,
}

impl InjectReport {
    pub fn injected(&self) -> usize {
        self.count(|r| matches!(r, Ok(InjectOutcome::Injected)))
    }

    pub fn already_injected(&self) -> usize {
        self.count(|r| matches!(r, Ok(InjectOutcome::AlreadyInjected)))
    }

    pub fn failed(&self) -> usize {
        self.count(|r| r.is_err())
    }

    fn count(&self, pred: impl Fn(&Result<InjectOutcome, InjectError>) -> bool) -> usize {
        self.results.iter().filter(|(_, r)| pred(r)).count()
    }
}

/// Inserts the navigation bar into pages.
#[derive(Debug, Clone)]
pub struct Injector {
    head_fragment: String,
    body_fragment: String,
}

impl Injector {
    pub fn new(config: &SiteConfig) -> Self {
        Self {
            head_fragment: head_fragment(),
            body_fragment: body_fragment(&back_link(config)),
        }
    }

    /// Transform page content.
    ///
    /// Works on raw bytes, so pages in any ASCII-compatible encoding are
    /// handled. Returns `Ok(None)` when the marker is already present.
    pub fn inject_content(&self, content: &[u8]) -> Result<Option<Vec<u8>>, AnchorError> {
        if find_all(content, MARKER.as_bytes()).next().is_some() {
            return Ok(None);
        }
        let head = find_single(content, HEAD_ANCHOR)?;
        let body = find_single(content, BODY_ANCHOR)?;

        let (first, second) = if head < body {
            ((head, &self.head_fragment), (body, &self.body_fragment))
        } else {
            ((body, &self.body_fragment), (head, &self.head_fragment))
        };
        let mut out = Vec::with_capacity(content.len() + first.1.len() + second.1.len());
        out.extend_from_slice(&content[..first.0]);
        out.extend_from_slice(first.1.as_bytes());
        out.extend_from_slice(&content[first.0..second.0]);
        out.extend_from_slice(second.1.as_bytes());
        out.extend_from_slice(&content[second.0..]);
        Ok(Some(out))
    }

    /// Inject into the page at `path`, rewriting it if needed.
    pub fn inject_file(&self, path: &Path) -> Result<InjectOutcome, InjectError> {
        let content = read(path)?;
        match self.inject_content(&content).map_err(|e| e.at(path))? {
            None => Ok(InjectOutcome::AlreadyInjected),
            Some(updated) => {
                fs::write(path, updated).map_err(|source| InjectError::Write {
                    path: path.to_path_buf(),
                    source,
                })?;
                Ok(InjectOutcome::Injected)
            }
        }
    }

    /// Report what [`inject_file`](Self::inject_file) would do, without writing.
    pub fn check_file(&self, path: &Path) -> Result<InjectOutcome, InjectError> {
        let content = read(path)?;
        match self.inject_content(&content).map_err(|e| e.at(path))? {
            None => Ok(InjectOutcome::AlreadyInjected),
            Some(_) => Ok(InjectOutcome::Injected),
        }
    }

    /// Inject into every entry under `source_dir`, continuing past failures.
    pub fn inject_all(&self, source_dir: &Path, entries: &[FileEntry]) -> InjectReport {
        self.run_all(source_dir, entries, |path| self.inject_file(path))
    }

    /// Check every entry under `source_dir` without writing.
    pub fn check_all(&self, source_dir: &Path, entries: &[FileEntry]) -> InjectReport {
        self.run_all(source_dir, entries, |path| self.check_file(path))
    }

    fn run_all(
        &self,
        source_dir: &Path,
        entries: &[FileEntry],
        op: impl Fn(&Path) -> Result<InjectOutcome, InjectError>,
    ) -> InjectReport {
        let mut report = InjectReport::default();
        for entry in entries {
            let path = source_dir.join(&entry.filename);
            let result = op(&path);
            match &result {
                Ok(InjectOutcome::Injected) => info!(file = %entry.filename, "injected navigation bar"),
                Ok(InjectOutcome::AlreadyInjected) => {
                    debug!(file = %entry.filename, "already injected, skipping")
                }
                Err(e) => warn!(file = %entry.filename, error = %e, "skipping page"),
            }
            report.results.push((entry.filename.clone(), result));
        }
        report
    }
}

fn read(path: &Path) -> Result<Vec<u8>, InjectError> {
    fs::read(path).map_err(|source| InjectError::Read {
        path: path.to_path_buf(),
        source,
    })
}

/// Byte offsets of `needle` in `haystack`.
fn find_all<'a>(haystack: &'a [u8], needle: &'a [u8]) -> impl Iterator<Item = usize> + 'a {
    haystack
        .windows(needle.len())
        .enumerate()
        .filter(move |(_, window)| *window == needle)
        .map(|(i, _)| i)
}

/// Byte offset of the only occurrence of `anchor`, ASCII case-insensitive.
fn find_single(content: &[u8], anchor: &'static str) -> Result<usize, AnchorError> {
    let lower = content.to_ascii_lowercase();
    let mut hits = find_all(&lower, anchor.as_bytes());
    match (hits.next(), hits.count()) {
        (None, _) => Err(AnchorError::Missing(anchor)),
        (Some(pos), 0) => Ok(pos),
        (Some(_), rest) => Err(AnchorError::Ambiguous(anchor, rest + 1)),
    }
}

/// Relative path from a page under `link_prefix` back to the index.
fn back_link(config: &SiteConfig) -> String {
    let depth = config
        .link_prefix
        .split('/')
        .filter(|s| !s.is_empty() && *s != ".")
        .count();
    format!("{}{}", "../".repeat(depth), config.index_name)
}

fn head_fragment() -> String {
    let markup = html! {
        (PreEscaped(MARKER))
        style { (PreEscaped(BAR_CSS)) }
        script { (PreEscaped(DOWNLOAD_JS)) }
    };
    format!("{}\n", markup.into_string())
}

fn body_fragment(back_href: &str) -> String {
    let markup = html! {
        nav.hw-index-bar {
            a href=(back_href) { "← Back to index" }
            button type="button" onclick="hwIndexDownload()" { "Download HTML" }
        }
    };
    format!("{}\n", markup.into_string())
}
