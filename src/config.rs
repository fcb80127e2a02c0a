//! Run configuration.
//!
//! Settings come from three layers, each overriding the one before:
//!
//! 1. Stock defaults (below).
//! 2. An optional TOML file passed with `--config`.
//! 3. Flags given explicitly on the command line.
//!
//! Layers are merged as TOML values, then deserialized and validated once,
//! so a config file only needs the keys it wants to change.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! input = "input_images"    # Folder with source images
//! output = "output_images"  # Folder for converted images (created if missing)
//!
//! [processing]
//! width = 800               # Target box width in pixels
//! height = 800              # Target box height in pixels
//! keep_aspect = false       # Fit inside the box instead of stretching to it
//! auto_orientation = false  # Swap the box for portrait sources
//! format = "JPEG"           # JPEG, PNG, WEBP, BMP, or another extension
//! quality = 85              # 0-100, used by JPEG and WEBP only
//! # rename_prefix = "photo" # photo_001.jpg, photo_002.jpg, ...
//! # jobs = 4                # Parallel workers (omit for sequential)
//! ```
//!
//! Unknown keys are rejected to catch typos early.

use crate::imaging::{OutputFormat, Quality};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Complete settings for one run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Folder with source images.
    pub input: PathBuf,
    /// Folder for converted images; created if missing.
    pub output: PathBuf,
    /// How each image is converted.
    pub processing: ProcessingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: PathBuf::from("input_images"),
            output: PathBuf::from("output_images"),
            processing: ProcessingConfig::default(),
        }
    }
}

impl Config {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.processing.validate()
    }
}

/// Per-image conversion settings, fixed for the whole batch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProcessingConfig {
    /// Target box width in pixels.
    pub width: u32,
    /// Target box height in pixels.
    pub height: u32,
    /// Fit inside the box preserving aspect ratio; otherwise stretch to it.
    pub keep_aspect: bool,
    /// Swap the box to portrait shape for portrait sources.
    pub auto_orientation: bool,
    /// Output encoding.
    pub format: OutputFormat,
    /// Encoder quality, 0-100. Only JPEG and WEBP use it.
    pub quality: u32,
    /// Number outputs `{prefix}_001`, `{prefix}_002`, ... instead of
    /// deriving names from the originals.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rename_prefix: Option<String>,
    /// Parallel workers. When absent, images are processed one at a time.
    /// Values larger than the core count are clamped down.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 800,
            keep_aspect: false,
            auto_orientation: false,
            format: OutputFormat::Jpeg,
            quality: 85,
            rename_prefix: None,
            jobs: None,
        }
    }
}

impl ProcessingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::Validation(
                "processing.width and processing.height must be at least 1".into(),
            ));
        }
        if self.quality > 100 {
            return Err(ConfigError::Validation(
                "processing.quality must be 0-100".into(),
            ));
        }
        if self.format.extension().is_empty() {
            return Err(ConfigError::Validation(
                "processing.format must not be empty".into(),
            ));
        }
        if let Some(prefix) = &self.rename_prefix {
            if prefix.contains(['/', '\\']) {
                return Err(ConfigError::Validation(
                    "processing.rename_prefix must not contain path separators".into(),
                ));
            }
        }
        if self.jobs == Some(0) {
            return Err(ConfigError::Validation(
                "processing.jobs must be at least 1".into(),
            ));
        }
        Ok(())
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.quality)
    }

    /// The rename prefix, treating an empty string as absent.
    pub fn rename_prefix(&self) -> Option<&str> {
        self.rename_prefix.as_deref().filter(|p| !p.is_empty())
    }
}

/// Resolve the effective worker count.
///
/// - `None` → 1 (sequential)
/// - `Some(n)` → `min(n, cores)` (user can constrain down, not up)
pub fn effective_threads(jobs: Option<usize>) -> usize {
    let cores = std::thread::available_parallelism()
        .map(|n| n.get())
        .unwrap_or(1);
    jobs.map(|n| n.clamp(1, cores)).unwrap_or(1)
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the canonical representation of all default values, used as the
/// base layer for merging user overrides on top.
pub fn stock_defaults_value() -> toml::Value {
    toml::Value::try_from(Config::default()).expect("default config must serialize")
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
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

/// Load a config file as a raw TOML value.
pub fn load_raw_config(path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(value)
}

/// Merge overlays in order onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlays: impl IntoIterator<Item = toml::Value>,
) -> Result<Config, ConfigError> {
    let merged = overlays.into_iter().fold(base, merge_toml);
    let config: Config = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Build the run config: stock defaults ← `config_file` ← `cli_overrides`.
pub fn load_config(
    config_file: Option<&Path>,
    cli_overrides: toml::Value,
) -> Result<Config, ConfigError> {
    let mut overlays = Vec::with_capacity(2);
    if let Some(path) = config_file {
        overlays.push(load_raw_config(path)?);
    }
    overlays.push(cli_overrides);
    resolve_config(stock_defaults_value(), overlays)
}

/// Returns a fully-commented stock config file with all keys and explanations.
///
/// Printed by `--gen-config`.
pub fn stock_config_toml() -> &'static str {
    r##"# batch-resize configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults. Command-line flags override this file.
# Unknown keys will cause an error.

# Folder with source images (jpg, jpeg, png, webp, bmp, tiff).
input = "input_images"

# Folder for converted images. Created if missing; files are written flat.
output = "output_images"

[processing]
# Target box in pixels.
width = 800
height = 800

# Fit inside the box keeping the aspect ratio. When false, every image is
# stretched to exactly width x height.
keep_aspect = false

# With keep_aspect, swap width and height for portrait sources so they fit a
# portrait-shaped box.
auto_orientation = false

# JPEG, PNG, WEBP, BMP, or any other extension the encoder knows (e.g. TIFF).
format = "JPEG"

# Encoding quality (0 = worst, 100 = best). Used by JPEG and WEBP only.
quality = 85

# Name outputs <prefix>_001.<ext>, <prefix>_002.<ext>, ... in input order
# instead of <original>_resized.<ext>.
# rename_prefix = "photo"

# Parallel workers, capped at the number of CPU cores.
# Omit to process one image at a time.
# jobs = 4
"##
}
