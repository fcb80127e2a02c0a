//! Image processing backend trait and shared types.
//!
//! The [`ImageBackend`] trait defines the two operations the batch executor
//! needs: identify (read pixel dimensions) and convert (decode, normalize,
//! resample, encode, write).
//!
//! The production implementation is
//! [`RustBackend`](super::rust_backend::RustBackend): pure Rust decoders and
//! encoders from the `image` crate, plus `webp` for lossy WebP output.

use super::params::ConvertParams;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Failure of a single image operation.
///
/// Every variant is scoped to one item: the executor counts it and moves on.
#[derive(Error, Debug)]
pub enum BackendError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode {}: {reason}", .path.display())]
    Decode { path: PathBuf, reason: String },
    #[error("Failed to encode {format}: {reason}")]
    Encode { format: String, reason: String },
    #[error("Color mode {mode} is not supported by the {format} encoder")]
    UnsupportedMode { mode: String, format: String },
}

/// Result of an identify operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
}

/// Trait for image processing backends.
///
/// `Sync` so a single backend can be shared by every rayon worker.
pub trait ImageBackend: Sync {
    /// Get image dimensions. Fails with [`BackendError::Decode`] for anything
    /// that is not a readable image.
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError>;

    /// Decode `params.source`, resample to exactly `width`x`height`, and
    /// write it to `params.output`. Either the full output file appears or
    /// nothing does.
    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError>;
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use crate::imaging::params::{OutputFormat, Quality};
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Mock backend that records operations without executing them.
    /// Uses Mutex (not RefCell) so it is Sync and works with rayon's par_iter.
    ///
    /// Dimensions are looked up by file name; names listed in `corrupt`
    /// fail to identify and names in `unwritable` fail to convert.
    #[derive(Default)]
    pub struct MockBackend {
        pub dimensions: Mutex<HashMap<String, Dimensions>>,
        pub corrupt: Mutex<Vec<String>>,
        pub unwritable: Mutex<Vec<String>>,
        pub operations: Mutex<Vec<RecordedOp>>,
        /// `rayon::current_thread_index()` seen by each `identify` call.
        pub workers: Mutex<Vec<Option<usize>>>,
    }

    #[derive(Debug, Clone, PartialEq)]
    pub enum RecordedOp {
        Identify(String),
        Convert {
            source: String,
            output: String,
            width: u32,
            height: u32,
            format: OutputFormat,
            quality: Option<u32>,
        },
    }

    fn file_name(path: &Path) -> String {
        path.file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    impl MockBackend {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_dimensions(dims: &[(&str, u32, u32)]) -> Self {
            let map = dims
                .iter()
                .map(|&(name, width, height)| (name.to_string(), Dimensions { width, height }))
                .collect();
            Self {
                dimensions: Mutex::new(map),
                ..Self::default()
            }
        }

        pub fn corrupt(self, name: &str) -> Self {
            self.corrupt.lock().unwrap().push(name.to_string());
            self
        }

        pub fn unwritable(self, name: &str) -> Self {
            self.unwritable.lock().unwrap().push(name.to_string());
            self
        }

        pub fn get_operations(&self) -> Vec<RecordedOp> {
            self.operations.lock().unwrap().clone()
        }

        pub fn worker_indices(&self) -> Vec<Option<usize>> {
            self.workers.lock().unwrap().clone()
        }

        pub fn converts(&self) -> Vec<RecordedOp> {
            self.get_operations()
                .into_iter()
                .filter(|op| matches!(op, RecordedOp::Convert { .. }))
                .collect()
        }
    }

    impl ImageBackend for MockBackend {
        fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
            let name = file_name(path);
            self.workers
                .lock()
                .unwrap()
                .push(rayon::current_thread_index());
            self.operations
                .lock()
                .unwrap()
                .push(RecordedOp::Identify(name.clone()));

            if self.corrupt.lock().unwrap().contains(&name) {
                return Err(BackendError::Decode {
                    path: path.to_path_buf(),
                    reason: "not an image".to_string(),
                });
            }

            self.dimensions
                .lock()
                .unwrap()
                .get(&name)
                .copied()
                .ok_or_else(|| BackendError::Decode {
                    path: path.to_path_buf(),
                    reason: "No mock dimensions".to_string(),
                })
        }

        fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
            let source = file_name(&params.source);
            self.operations.lock().unwrap().push(RecordedOp::Convert {
                source: source.clone(),
                output: file_name(&params.output),
                width: params.width,
                height: params.height,
                format: params.format.clone(),
                quality: params.quality.map(Quality::value),
            });

            if self.unwritable.lock().unwrap().contains(&source) {
                return Err(BackendError::Encode {
                    format: params.format.to_string(),
                    reason: "disk full".to_string(),
                });
            }
            Ok(())
        }
    }

    #[test]
    fn mock_records_identify() {
        let backend = MockBackend::with_dimensions(&[("image.jpg", 800, 600)]);

        let result = backend.identify(Path::new("/test/image.jpg")).unwrap();
        assert_eq!(result.width, 800);
        assert_eq!(result.height, 600);

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(&ops[0], RecordedOp::Identify(p) if p == "image.jpg"));
    }

    #[test]
    fn mock_corrupt_file_fails_to_identify() {
        let backend = MockBackend::with_dimensions(&[("bad.jpg", 10, 10)]).corrupt("bad.jpg");
        let err = backend.identify(Path::new("/in/bad.jpg")).unwrap_err();
        assert!(matches!(err, BackendError::Decode { .. }));
        assert!(err.to_string().contains("/in/bad.jpg"));
    }

    #[test]
    fn mock_records_convert() {
        let backend = MockBackend::new();

        backend
            .convert(&ConvertParams {
                source: "/in/source.png".into(),
                output: "/out/source_resized.jpg".into(),
                width: 800,
                height: 600,
                format: OutputFormat::Jpeg,
                quality: Some(Quality::new(90)),
            })
            .unwrap();

        let ops = backend.get_operations();
        assert_eq!(ops.len(), 1);
        assert!(matches!(
            &ops[0],
            RecordedOp::Convert {
                width: 800,
                height: 600,
                quality: Some(90),
                format: OutputFormat::Jpeg,
                ..
            }
        ));
    }

    #[test]
    fn error_messages_name_the_cause() {
        let err = BackendError::UnsupportedMode {
            mode: "Rgba32F".into(),
            format: "BMP".into(),
        };
        assert_eq!(
            err.to_string(),
            "Color mode Rgba32F is not supported by the BMP encoder"
        );
    }
}
