//! Source image discovery.
//!
//! Lists the image files directly inside the input directory. Subdirectories
//! are not entered and their contents are never processed.
//!
//! ## Eligibility
//!
//! A file is eligible when its lowercased extension is one of
//! [`IMAGE_EXTENSIONS`]. Content is not inspected here: a corrupt file with
//! a `.jpg` name is listed and fails later, on its own, in the executor.
//!
//! ## Ordering
//!
//! Results are sorted by filename (byte-wise), not left in directory listing
//! order. Rename-prefix numbering follows this order, so the same folder
//! always yields the same output names regardless of the host filesystem.

use crate::types::SourceImage;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

/// Extensions (lowercase) accepted as source images.
pub const IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "bmp", "tiff"];

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("Input folder does not exist: {}", .0.display())]
    DirectoryNotFound(PathBuf),
    #[error("Failed to read input folder {}: {source}", .path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Whether `path` has an extension from [`IMAGE_EXTENSIONS`], ignoring case.
pub fn is_supported_image(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| IMAGE_EXTENSIONS.contains(&e.to_lowercase().as_str()))
}

/// List eligible images directly inside `dir`, sorted by filename.
///
/// Returns [`ScanError::DirectoryNotFound`] when `dir` does not exist or is
/// not a directory. An existing directory with no eligible files yields an
/// empty list.
pub fn list_images(dir: &Path) -> Result<Vec<SourceImage>, ScanError> {
    if !dir.is_dir() {
        return Err(ScanError::DirectoryNotFound(dir.to_path_buf()));
    }

    let mut images = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(entry) => entry,
            // The directory itself could not be read
            Err(source) if source.depth() == 0 => {
                return Err(ScanError::Walk {
                    path: dir.to_path_buf(),
                    source,
                });
            }
            // A single unreadable entry (e.g. dangling symlink) is skipped
            Err(e) => {
                tracing::warn!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() || !is_supported_image(entry.path()) {
            continue;
        }
        images.push(SourceImage {
            filename: entry.file_name().to_string_lossy().into_owned(),
            path: entry.into_path(),
        });
    }

    tracing::debug!(dir = %dir.display(), count = images.len(), "resolved source images");
    Ok(images)
}
