//! Parameter types for image operations.
//!
//! These structs describe *what* to do, not *how* to do it. They are the
//! interface between the batch executor (which decides what each output
//! should look like) and the [`backend`](super::backend) (which does the
//! actual pixel work). This separation allows swapping backends (e.g. for
//! testing with a mock) without changing the executor.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (0–100, default 85). Clamped on construction.
//! - [`OutputFormat`]: Target encoding: the four named formats plus a literal-extension fallback.
//! - [`ConvertParams`]: Everything needed for one conversion: source, output path, exact dimensions, format, optional quality.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// Quality setting for lossy image encoding (0-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.min(100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(85)
    }
}

/// Output encoding requested for every image in a batch.
///
/// Parsing is case-insensitive. `JPG` is an alias for `JPEG`. Any other name
/// is kept as a literal extension and resolved against the encoders compiled
/// into the backend at write time, so `TIFF` or `AVIF` work while `GIF`
/// fails per item with an encode error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OutputFormat {
    Jpeg,
    Png,
    WebP,
    Bmp,
    /// Lowercased format name, used verbatim as the file extension.
    Other(String),
}

impl OutputFormat {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_uppercase().as_str() {
            "JPEG" | "JPG" => Self::Jpeg,
            "PNG" => Self::Png,
            "WEBP" => Self::WebP,
            "BMP" => Self::Bmp,
            _ => Self::Other(name.trim().to_ascii_lowercase()),
        }
    }

    /// File extension written for this format.
    pub fn extension(&self) -> &str {
        match self {
            Self::Jpeg => "jpg",
            Self::Png => "png",
            Self::WebP => "webp",
            Self::Bmp => "bmp",
            Self::Other(ext) => ext,
        }
    }

    /// Whether the encoder takes a quality setting. Everything else ignores it.
    pub fn supports_quality(&self) -> bool {
        matches!(self, Self::Jpeg | Self::WebP)
    }

    /// Whether the encoder rejects alpha and palette input and needs plain RGB.
    pub fn requires_opaque_rgb(&self) -> bool {
        matches!(self, Self::Jpeg)
    }
}

impl Default for OutputFormat {
    fn default() -> Self {
        Self::Jpeg
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Jpeg => f.write_str("JPEG"),
            Self::Png => f.write_str("PNG"),
            Self::WebP => f.write_str("WEBP"),
            Self::Bmp => f.write_str("BMP"),
            Self::Other(ext) => f.write_str(&ext.to_ascii_uppercase()),
        }
    }
}

impl From<String> for OutputFormat {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<OutputFormat> for String {
    fn from(value: OutputFormat) -> Self {
        value.to_string()
    }
}

/// Parameters for a single decode → resample → encode conversion.
#[derive(Debug, Clone, PartialEq)]
pub struct ConvertParams {
    pub source: PathBuf,
    pub output: PathBuf,
    /// Exact output dimensions; the backend does not re-fit them.
    pub width: u32,
    pub height: u32,
    pub format: OutputFormat,
    /// Set only for formats whose encoder takes a quality
    /// (see [`OutputFormat::supports_quality`]).
    pub quality: Option<Quality>,
}
