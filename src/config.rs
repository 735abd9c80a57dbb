//! Site configuration module.
//!
//! Handles loading, validating, and merging `hw-index.toml`. Every component
//! receives the resolved [`SiteConfig`] explicitly; there is no global state.
//!
//! ## Config File Location
//!
//! `hw-index.toml` is looked up in the working directory. A different file
//! can be passed with `--config`. Without a file, stock defaults are used.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! source_dir = "hw"            # Folder holding the homework pages
//! output_dir = "."             # Where the index (and mirror) is written
//! index_name = "index.html"    # Filename of the generated index
//! link_prefix = "hw"           # Links are rendered as `<link_prefix>/<file>`
//! extensions = ["html"]        # Recognized page extensions
//! inject = true                # Add the navigation bar to each page
//! mirror_source = false        # Copy source_dir to <output_dir>/<link_prefix>/
//!
//! title = "Homework"
//! description = "Homework collection"
//! repo_link = "https://github.com/you/your-homework"   # optional
//!
//! [colors.light]
//! background = "#ffffff"
//! text = "#24292e"
//! text_muted = "#6a737d"
//! border = "#eaecef"
//! accent = "#0366d6"
//! surface = "#f6f8fa"
//!
//! [colors.dark]
//! background = "#0d1117"
//! text = "#c9d1d9"
//! text_muted = "#8b949e"
//! border = "#30363d"
//! accent = "#58a6ff"
//! surface = "#161b22"
//! ```
//!
//! ## Partial Configuration
//!
//! Config files are sparse — override just the values you want. Unknown keys
//! are rejected to catch typos early.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

/// Name of the config file looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "hw-index.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Site configuration loaded from `hw-index.toml`.
///
/// All fields have defaults. User config files need only specify the values
/// they want to override. Unknown keys are rejected.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Folder holding the homework pages.
    pub source_dir: PathBuf,
    /// Directory the index is written into.
    pub output_dir: PathBuf,
    /// Filename of the generated index inside `output_dir`.
    pub index_name: String,
    /// Relative path prefix used in index links (`<link_prefix>/<file>`).
    pub link_prefix: String,
    /// Recognized page extensions, without the leading dot.
    pub extensions: Vec<String>,
    /// Whether the build injects the navigation bar into each page.
    pub inject: bool,
    /// Whether the build copies `source_dir` to `<output_dir>/<link_prefix>/`.
    pub mirror_source: bool,
    /// Page title, shown in `<title>` and as the heading.
    pub title: String,
    /// Content of the description meta tag.
    pub description: String,
    /// External repository link shown under the heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub repo_link: Option<String>,
    /// Color schemes for light and dark modes.
    pub colors: ColorConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("hw"),
            output_dir: PathBuf::from("."),
            index_name: "index.html".to_string(),
            link_prefix: "hw".to_string(),
            extensions: vec!["html".to_string()],
            inject: true,
            mirror_source: false,
            title: "Homework".to_string(),
            description: "Homework collection".to_string(),
            repo_link: None,
            colors: ColorConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Validate config values are usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.title.trim().is_empty() {
            return Err(ConfigError::Validation("title must not be empty".into()));
        }
        if self.extensions.is_empty() {
            return Err(ConfigError::Validation(
                "extensions must not be empty".into(),
            ));
        }
        if let Some(ext) = self
            .extensions
            .iter()
            .find(|e| e.is_empty() || e.starts_with('.'))
        {
            return Err(ConfigError::Validation(format!(
                "extensions must be given without a leading dot, got {ext:?}"
            )));
        }
        if self.index_name.is_empty() || self.index_name.contains(['/', '\\']) {
            return Err(ConfigError::Validation(format!(
                "index_name must be a plain filename, got {:?}",
                self.index_name
            )));
        }
        if self.link_prefix.is_empty()
            || self.link_prefix.starts_with('/')
            || self.link_prefix.ends_with('/')
        {
            return Err(ConfigError::Validation(format!(
                "link_prefix must be a relative path without leading or trailing '/', got {:?}",
                self.link_prefix
            )));
        }
        let inside_source = || {
            normalize_lexically(&self.mirror_dir()).starts_with(normalize_lexically(&self.source_dir))
        };
        if self.mirror_source && inside_source() {
            return Err(ConfigError::Validation(format!(
                "mirror_source would copy {} into {}, inside itself; set output_dir outside the source folder",
                self.source_dir.display(),
                self.mirror_dir().display()
            )));
        }
        Ok(())
    }

    /// Full path of the generated index.
    pub fn index_path(&self) -> PathBuf {
        self.output_dir.join(&self.index_name)
    }

    /// Destination of the source mirror.
    pub fn mirror_dir(&self) -> PathBuf {
        self.output_dir.join(&self.link_prefix)
    }

    /// Case-insensitive extension check against the configured set.
    pub fn matches_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }
}

/// Absolute form of `path` with `.` and `..` resolved without touching the
/// filesystem, so `./hw`, `hw` and `/cwd/hw` compare equal.
fn normalize_lexically(path: &Path) -> PathBuf {
    let absolute = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut out = PathBuf::new();
    for component in absolute.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            other => out.push(other),
        }
    }
    out
}

/// Light and dark color schemes for the index page.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorConfig {
    /// Light mode colors (default).
    pub light: ColorScheme,
    /// Dark mode colors (`prefers-color-scheme: dark`).
    pub dark: ColorScheme,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ColorScheme {
    pub background: String,
    pub text: String,
    /// Build time, placeholder text, list counters.
    pub text_muted: String,
    pub border: String,
    /// Link hover and focus color.
    pub accent: String,
    /// Background of the empty-state block.
    pub surface: String,
}

impl ColorScheme {
    pub fn default_light() -> Self {
        Self {
            background: "#ffffff".to_string(),
            text: "#24292e".to_string(),
            text_muted: "#6a737d".to_string(),
            border: "#eaecef".to_string(),
            accent: "#0366d6".to_string(),
            surface: "#f6f8fa".to_string(),
        }
    }

    pub fn default_dark() -> Self {
        Self {
            background: "#0d1117".to_string(),
            text: "#c9d1d9".to_string(),
            text_muted: "#8b949e".to_string(),
            border: "#30363d".to_string(),
            accent: "#58a6ff".to_string(),
            surface: "#161b22".to_string(),
        }
    }
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_light()
    }
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            light: ColorScheme::default_light(),
            dark: ColorScheme::default_dark(),
        }
    }
}

/// Stock defaults as a TOML value, the base layer for merging.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(SiteConfig::default())?)
}

/// Deep-merge two TOML values. Tables merge recursively; everything else in
/// `overlay` replaces the value in `base`.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<SiteConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: SiteConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load `hw-index.toml` from the given directory.
///
/// Missing file means stock defaults. A file that exists but does not parse
/// or validate is an error.
pub fn load_config(dir: &Path) -> Result<SiteConfig, ConfigError> {
    load_layered(&dir.join(CONFIG_FILE_NAME), false, toml::Table::new())
}

/// Load an explicitly named config file. The file must exist.
pub fn load_config_file(path: &Path) -> Result<SiteConfig, ConfigError> {
    load_layered(path, true, toml::Table::new())
}

/// Stock defaults, then the config file at `path`, then `overrides`.
///
/// Validation runs once on the merged result, so overrides (e.g. from CLI
/// flags) can fix values that would be invalid on their own.
pub fn load_layered(
    path: &Path,
    required: bool,
    overrides: toml::Table,
) -> Result<SiteConfig, ConfigError> {
    let mut merged = stock_defaults_value()?;
    if required || path.exists() {
        merged = merge_toml(merged, load_raw_config(path)?);
    }
    let overlay = (!overrides.is_empty()).then_some(toml::Value::Table(overrides));
    resolve_config(merged, overlay)
}

/// Documented stock config, printed by `hw-index gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# hw-index Configuration
# ======================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Unknown keys will cause an error.

# Folder holding the homework pages.
source_dir = "hw"

# Directory the index is written into.
output_dir = "."

# Filename of the generated index inside output_dir.
index_name = "index.html"

# Links in the index point to "<link_prefix>/<filename>".
link_prefix = "hw"

# Page extensions picked up from source_dir (no leading dot).
extensions = ["html"]

# Add the navigation bar (back link + download button) to each page.
# Already-processed pages are detected and left alone.
inject = true

# Copy source_dir into <output_dir>/<link_prefix>/ so output_dir is a
# self-contained site. The copy must not land inside source_dir.
mirror_source = false

# ---------------------------------------------------------------------------
# Page text
# ---------------------------------------------------------------------------
title = "Homework"
description = "Homework collection"

# External repository link shown under the heading.
# repo_link = "https://github.com/you/your-homework"

# ---------------------------------------------------------------------------
# Colors - Light mode (prefers-color-scheme: light)
# ---------------------------------------------------------------------------
[colors.light]
background = "#ffffff"
text = "#24292e"
text_muted = "#6a737d"    # Build time, placeholder, list counters
border = "#eaecef"
accent = "#0366d6"        # Hover and focus
surface = "#f6f8fa"       # Empty-state background

# ---------------------------------------------------------------------------
# Colors - Dark mode (prefers-color-scheme: dark)
# ---------------------------------------------------------------------------
[colors.dark]
background = "#0d1117"
text = "#c9d1d9"
text_muted = "#8b949e"
border = "#30363d"
accent = "#58a6ff"
surface = "#161b22"
"##
}

/// Generate CSS custom properties from the color config.
pub fn generate_color_css(colors: &ColorConfig) -> String {
    format!(
        r#":root {{
    --color-bg: {light_bg};
    --color-text: {light_text};
    --color-text-muted: {light_muted};
    --color-border: {light_border};
    --color-accent: {light_accent};
    --color-surface: {light_surface};
}}

@media (prefers-color-scheme: dark) {{
    :root {{
        --color-bg: {dark_bg};
        --color-text: {dark_text};
        --color-text-muted: {dark_muted};
        --color-border: {dark_border};
        --color-accent: {dark_accent};
        --color-surface: {dark_surface};
    }}
}}"#,
        light_bg = colors.light.background,
        light_text = colors.light.text,
        light_muted = colors.light.text_muted,
        light_border = colors.light.border,
        light_accent = colors.light.accent,
        light_surface = colors.light.surface,
        dark_bg = colors.dark.background,
        dark_text = colors.dark.text,
        dark_muted = colors.dark.text_muted,
        dark_border = colors.dark.border,
        dark_accent = colors.dark.accent,
        dark_surface = colors.dark.surface,
    )
}
