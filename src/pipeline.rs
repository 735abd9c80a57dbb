//! The full build: discover → inject → mirror → generate.
//!
//! Discovery and index-write failures abort the build. Injection failures are
//! per page and only show up in the [`InjectReport`]. Nothing is written when
//! discovery fails.

use crate::config::SiteConfig;
use crate::generate::{self, GenerateError};
use crate::inject::{InjectReport, Injector};
use crate::scan::{self, ScanError};
use crate::types::IndexEntry;
use chrono::{DateTime, FixedOffset};
use std::path::PathBuf;
use thiserror::Error;
use tracing::info;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Generate(#[from] GenerateError),
}

/// Outcome of a successful build.
#[derive(Debug)]
pub struct BuildReport {
    /// Entries as listed in the index, in display order.
    pub entries: Vec<IndexEntry>,
    /// `None` when injection is disabled.
    pub injection: Option<InjectReport>,
    /// Number of files mirrored, `None` when mirroring is disabled.
    pub mirrored: Option<usize>,
    pub index_path: PathBuf,
}

/// Run the whole pipeline once.
pub fn build(
    config: &SiteConfig,
    built_at: DateTime<FixedOffset>,
) -> Result<BuildReport, BuildError> {
    let files = scan::scan(config)?;
    info!(source = %config.source_dir.display(), pages = files.len(), "discovered pages");

    let injection = config
        .inject
        .then(|| Injector::new(config).inject_all(&config.source_dir, &files));

    let mirrored = if config.mirror_source {
        Some(generate::mirror_source(config)?)
    } else {
        None
    };

    let generated = generate::generate(&files, config, built_at)?;
    info!(path = %generated.index_path.display(), "generated index");

    Ok(BuildReport {
        entries: generated.entries,
        injection,
        mirrored,
        index_path: generated.index_path,
    })
}
