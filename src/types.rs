//! Shared types passed between the resolver, the executor, and the CLI output.

use crate::imaging::OutputFormat;
use std::fmt;
use std::path::PathBuf;

/// An eligible source file found by [`scan::list_images`](crate::scan::list_images).
///
/// Dimensions are not read here; the executor identifies each image when
/// it gets to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceImage {
    /// Full path to the file.
    pub path: PathBuf,
    /// File name inside the input directory; the image's identity.
    pub filename: String,
}

/// Everything decided about one output before the backend runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputPlan {
    pub width: u32,
    pub height: u32,
    pub filename: String,
    pub format: OutputFormat,
}

/// Running success/error counters for a batch.
///
/// Parallel workers each fold their own `BatchResult`; [`merge`](Self::merge)
/// is associative and commutative with `default()` as identity, so partial
/// results can be combined in any order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchResult {
    pub processed: usize,
    pub errors: usize,
}

impl BatchResult {
    pub fn success() -> Self {
        Self {
            processed: 1,
            errors: 0,
        }
    }

    pub fn failure() -> Self {
        Self {
            processed: 0,
            errors: 1,
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            processed: self.processed + other.processed,
            errors: self.errors + other.errors,
        }
    }

    pub fn total(&self) -> usize {
        self.processed + self.errors
    }
}

impl fmt::Display for BatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Processed: {}, Errors: {}", self.processed, self.errors)
    }
}
