//! Output filename scheme.
//!
//! Every output lands flat in the output directory under one of two names:
//!
//! - **Rename mode** (non-empty prefix): `{prefix}_{NNN}.{ext}`, numbered by
//!   processing position. `vacation` → `vacation_001.jpg`, `vacation_002.jpg`.
//!   Positions above 999 simply grow wider (`vacation_1000.jpg`).
//! - **Derived mode**: `{stem}_resized.{ext}`, where the stem is the original
//!   filename without its last extension. `photo.JPG` → `photo_resized.jpg`.
//!
//! Names are not checked against files already in the output directory; a
//! later item (or a later run) with the same name overwrites the earlier one.

use std::path::Path;

/// Compute the output filename for the item at 1-based `index`.
///
/// - `(1, "photo.JPG", "jpg", Some("vacation"))` → `"vacation_001.jpg"`
/// - `(1, "photo.jpg", "jpg", None)` → `"photo_resized.jpg"`
/// - `(7, "scan.tiff", "png", Some(""))` → `"scan_resized.png"`
pub fn output_filename(
    index: usize,
    original: &str,
    extension: &str,
    rename_prefix: Option<&str>,
) -> String {
    match rename_prefix {
        Some(prefix) if !prefix.is_empty() => format!("{prefix}_{index:03}.{extension}"),
        _ => format!("{}_resized.{extension}", file_stem(original)),
    }
}

/// Filename without its last extension. Dotfiles keep their full name.
fn file_stem(filename: &str) -> &str {
    Path::new(filename)
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or(filename)
}
