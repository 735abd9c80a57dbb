//! # hw-index
//!
//! A minimal static site generator for a folder of homework pages. Each page
//! gets a small navigation bar (back to the index, download as HTML) and the
//! folder gets an index page listing every page in homework/question order.
//!
//! # Architecture: Three-Stage Pipeline
//!
//! ```text
//! 1. Scan      hw/          →  [FileEntry]     (directory listing → page names)
//! 2. Inject    [FileEntry]  →  hw/*.html       (idempotent, per-page, in place)
//! 3. Generate  [FileEntry]  →  index.html      (sorted, labeled, timestamped)
//! ```
//!
//! Stages run one after another on a single thread. Scan and index-write
//! failures abort the run; a page that cannot be injected is logged and
//! skipped, and still appears in the index.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists pages with a recognized extension |
//! | [`inject`] | Stage 2 — inserts the navigation bar, guarded by a marker comment |
//! | [`generate`] | Stage 3 — renders the index with Maud, optional source mirror |
//! | [`pipeline`] | Runs the three stages in order for `hw-index build` |
//! | [`config`] | `hw-index.toml` loading, validation, merging, and color CSS |
//! | [`naming`] | `hwN_questionM` parsing: sort keys, labels, natural ordering |
//! | [`types`] | Entries passed between stages |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Marker-Guarded Injection
//!
//! Pages are edited in place, so a second run must not add a second bar. The
//! head fragment carries [`inject::MARKER`]; a page containing it is skipped.
//! Insertion needs exactly one `</head>` and one `</body>`; anything else is
//! reported as an error for that page instead of guessing.
//!
//! ## Explicit Configuration
//!
//! Every component takes a [`config::SiteConfig`]. Defaults match the usual
//! layout (`hw/` next to `index.html`), and `hw-index.toml` overrides them.

pub mod config;
pub mod generate;
pub mod inject;
pub mod naming;
pub mod output;
pub mod pipeline;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
