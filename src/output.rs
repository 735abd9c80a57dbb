//! CLI output formatting for all pipeline stages.
//!
//! Each entity leads with its positional index and label; filenames and
//! errors follow as indented context lines.
//!
//! # Output Format
//!
//! ## Scan
//!
//! ```text
//! Pages (2)
//! 001 Homework 1 - Question 1
//!     Source: hw1_question1.html
//! 002 Homework 1 - Question 2
//!     Source: hw1_question2.html
//! ```
//!
//! ## Inject
//!
//! ```text
//! 001 hw1_question1.html: injected
//! 002 hw1_question2.html: already injected
//! 003 broken.html: failed
//!     Error: hw/broken.html has no </head> tag
//! Injected 1, already injected 1, failed 1
//! ```
//!
//! ## Build
//!
//! ```text
//! Mirrored 3 files → dist/hw
//! Index → dist/index.html (2 pages)
//! ```
//!
//! # Architecture
//!
//! Each stage has a `format_*` function (returns `Vec<String>`) for testability
//! and a `print_*` wrapper that writes to stdout. Format functions are pure.

use crate::inject::{InjectOutcome, InjectReport};
use crate::pipeline::BuildReport;
use crate::types::IndexEntry;
use std::path::Path;

/// Whether an inject report describes writes that happened or would happen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InjectMode {
    Apply,
    DryRun,
}

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Scan
// ============================================================================

pub fn format_scan_output(entries: &[IndexEntry], source_dir: &Path) -> Vec<String> {
    let mut lines = vec![format!("Pages ({})", entries.len())];
    if entries.is_empty() {
        lines.push(format!("{}No pages found in {}", indent(1), source_dir.display()));
    }
    for (i, entry) in entries.iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), entry.label));
        lines.push(format!("{}Source: {}", indent(1), entry.filename));
    }
    lines
}

pub fn print_scan_output(entries: &[IndexEntry], source_dir: &Path) {
    for line in format_scan_output(entries, source_dir) {
        println!("{}", line);
    }
}

// ============================================================================
// Inject / Check
// ============================================================================

pub fn format_inject_report(report: &InjectReport, mode: InjectMode) -> Vec<String> {
    let mut lines = Vec::new();
    for (i, (filename, result)) in report.results.iter().enumerate() {
        let status = match (result, mode) {
            (Ok(InjectOutcome::Injected), InjectMode::Apply) => "injected",
            (Ok(InjectOutcome::Injected), InjectMode::DryRun) => "needs injection",
            (Ok(InjectOutcome::AlreadyInjected), _) => "already injected",
            (Err(_), _) => "failed",
        };
        lines.push(format!("{} {}: {}", format_index(i + 1), filename, status));
        if let Err(e) = result {
            lines.push(format!("{}Error: {}", indent(1), e));
        }
    }
    let first = match mode {
        InjectMode::Apply => "Injected",
        InjectMode::DryRun => "Needs injection",
    };
    lines.push(format!(
        "{} {}, already injected {}, failed {}",
        first,
        report.injected(),
        report.already_injected(),
        report.failed()
    ));
    lines
}

pub fn print_inject_report(report: &InjectReport, mode: InjectMode) {
    for line in format_inject_report(report, mode) {
        println!("{}", line);
    }
}

// ============================================================================
// Build
// ============================================================================

pub fn format_build_summary(report: &BuildReport, mirror_dir: &Path) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(n) = report.mirrored {
        lines.push(format!(
            "Mirrored {} → {}",
            plural(n, "file"),
            mirror_dir.display()
        ));
    }
    lines.push(format!(
        "Index → {} ({})",
        report.index_path.display(),
        plural(report.entries.len(), "page")
    ));
    lines
}

pub fn print_build_summary(report: &BuildReport, mirror_dir: &Path) {
    for line in format_build_summary(report, mirror_dir) {
        println!("{}", line);
    }
}
