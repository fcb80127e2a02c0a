//! Shared test utilities for the batch-resize test suite.
//!
//! Writes small real image files so backend and executor tests can run
//! against the filesystem without checked-in fixtures.
//!
//! ```rust,ignore
//! use crate::test_helpers::*;
//!
//! let tmp = tempfile::TempDir::new().unwrap();
//! create_test_jpeg(&tmp.path().join("a.jpg"), 200, 100);
//! write_corrupt(&tmp.path().join("broken.jpg"));
//! ```

use image::{ImageBuffer, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::path::Path;

/// Write an opaque gradient JPEG of the given size. The content is JPEG
/// whatever extension `path` has.
pub fn create_test_jpeg(path: &Path, width: u32, height: u32) {
    let img: RgbImage = ImageBuffer::from_fn(width, height, |x, y| {
        Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    });
    img.save_with_format(path, ImageFormat::Jpeg).unwrap();
}

/// Write a PNG with a half-transparent alpha channel. The content is PNG
/// whatever extension `path` has.
pub fn create_test_png_rgba(path: &Path, width: u32, height: u32) {
    let img: RgbaImage = ImageBuffer::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 64, 128])
    });
    img.save_with_format(path, ImageFormat::Png).unwrap();
}

/// Write a file with an image extension but garbage content.
pub fn write_corrupt(path: &Path) {
    std::fs::write(path, b"this is not an image").unwrap();
}
