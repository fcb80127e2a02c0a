//! # Batch Resize
//!
//! Resize and convert every image in a folder in one go. Point it at an input
//! directory, pick a target box and an output format, and each eligible image
//! is resampled and re-encoded into a flat output directory.
//!
//! # Architecture: One Pass Per Image
//!
//! ```text
//! scan      input/  →  sorted [SourceImage]
//! process   for each image:
//!             identify → plan size → plan name → decode → resample → encode → write
//! output    progress lines + "Processed: N, Errors: M"
//! ```
//!
//! Planning is pure: [`imaging::plan_dimensions`] and
//! [`naming::output_filename`] take numbers and strings, not files, so the
//! sizing and naming rules are unit-tested without touching the disk.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Lists eligible images directly inside the input folder, sorted by name |
//! | [`process`] | Runs the batch: per-item error isolation, optional parallel workers, progress events |
//! | [`imaging`] | Geometry planning, format parameters, and the pure-Rust decode/resize/encode backend |
//! | [`naming`] | Output filename scheme (`{prefix}_NNN.ext` or `{stem}_resized.ext`) |
//! | [`config`] | Layered settings: stock defaults, optional TOML file, CLI flags |
//! | [`types`] | Shared types (`SourceImage`, `OutputPlan`, `BatchResult`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Per-Item Error Isolation
//!
//! A broken file must not cost the user the rest of the batch. Every image
//! runs in its own error boundary; failures are counted and reported and the
//! batch continues. The only fatal errors are the ones that make the whole
//! run impossible: an unreadable config or an output folder that can't be
//! created.
//!
//! ## Deterministic Order
//!
//! Sources are sorted by filename before numbering. Rename-prefix output names
//! therefore don't depend on the filesystem or on how parallel work is
//! scheduled.
//!
//! ## Pure-Rust Imaging
//!
//! Decoding, Lanczos3 resampling, and encoding use the
//! [`image`](https://docs.rs/image) crate (plus [`webp`](https://docs.rs/webp)
//! for lossy WebP). No ImageMagick or other system libraries are needed; the
//! binary is self-contained.
//!
//! ## Atomic Writes
//!
//! Each output is encoded to a hidden sibling file and renamed into place, so
//! a failed encode never leaves a truncated image under the final name.

pub mod config;
pub mod imaging;
pub mod naming;
pub mod output;
pub mod process;
pub mod scan;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
