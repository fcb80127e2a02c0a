//! Batch execution.
//!
//! Takes the resolved source list and converts every image into the output
//! directory:
//!
//! ```text
//! identify → plan (dimensions + name) → decode → normalize → resample → encode → write
//! ```
//!
//! ## Failure isolation
//!
//! Each item runs inside its own error boundary. A decode, encode, or write
//! failure is logged, reported as a [`ProcessEvent::ImageFailed`], counted in
//! [`BatchResult::errors`], and the batch moves on. Nothing an individual
//! image does can abort the batch; the only error [`process_with_backend`]
//! returns is failure to set up the output directory or the worker pool.
//!
//! ## Numbering
//!
//! Items are numbered 1..=N by their position in the source list before any
//! work starts. Rename-prefix names are derived from that number, so output
//! names are the same whether the batch runs sequentially or in parallel.
//!
//! ## Parallel Processing
//!
//! With `jobs > 1`, items are processed on a dedicated
//! [rayon](https://docs.rs/rayon) pool. Each worker folds its own partial
//! [`BatchResult`]; partials are combined with [`BatchResult::merge`].
//! Progress events then arrive in completion order, not list order.

use crate::config::{self, ProcessingConfig};
use crate::imaging::{
    BackendError, ConvertParams, Dimensions, ImageBackend, RustBackend, plan_dimensions,
};
use crate::naming::output_filename;
use crate::types::{BatchResult, OutputPlan, SourceImage};
use rayon::prelude::*;
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessError {
    #[error("Failed to create output folder {}: {source}", .path.display())]
    OutputDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to start worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

/// Progress notification for one finished item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProcessEvent {
    ImageProcessed {
        /// 1-based position in the source list.
        index: usize,
        total: usize,
        source: String,
        output: String,
        width: u32,
        height: u32,
    },
    ImageFailed {
        index: usize,
        total: usize,
        source: String,
        reason: String,
    },
}

/// Work out dimensions and filename for one image. Pure.
pub fn plan_output(
    source: &SourceImage,
    dimensions: Dimensions,
    index: usize,
    config: &ProcessingConfig,
) -> OutputPlan {
    let (width, height) = plan_dimensions(
        (dimensions.width, dimensions.height),
        (config.width, config.height),
        config.keep_aspect,
        config.auto_orientation,
    );
    OutputPlan {
        width,
        height,
        filename: output_filename(
            index,
            &source.filename,
            config.format.extension(),
            config.rename_prefix(),
        ),
        format: config.format.clone(),
    }
}

/// Convert every source image into `output_dir` with the pure Rust backend.
pub fn process(
    sources: &[SourceImage],
    output_dir: &Path,
    config: &ProcessingConfig,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchResult, ProcessError> {
    let backend = RustBackend::new();
    let threads = config::effective_threads(config.jobs);
    process_with_backend(&backend, sources, output_dir, config, threads, events)
}

/// Convert images using a specific backend (allows testing with mock).
///
/// `threads` is the worker count already resolved by the caller; 1 runs on
/// the calling thread, more runs on a dedicated rayon pool of that size.
/// Creates `output_dir` first (no error if it already exists). Per-item
/// failures are counted, never returned.
pub fn process_with_backend(
    backend: &impl ImageBackend,
    sources: &[SourceImage],
    output_dir: &Path,
    config: &ProcessingConfig,
    threads: usize,
    events: Option<Sender<ProcessEvent>>,
) -> Result<BatchResult, ProcessError> {
    std::fs::create_dir_all(output_dir).map_err(|source| ProcessError::OutputDir {
        path: output_dir.to_path_buf(),
        source,
    })?;

    let total = sources.len();
    let threads = threads.min(total.max(1));
    tracing::info!(
        total,
        threads,
        format = %config.format,
        output = %output_dir.display(),
        "starting batch"
    );

    let item = |events: &Option<Sender<ProcessEvent>>, (i, source): (usize, &SourceImage)| {
        let index = i + 1;
        let outcome = process_image(backend, source, index, output_dir, config);
        report(outcome, source, index, total, events.as_ref())
    };

    let result = if threads <= 1 {
        sources
            .iter()
            .enumerate()
            .map(|entry| item(&events, entry))
            .fold(BatchResult::default(), BatchResult::merge)
    } else {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()?;
        pool.install(|| {
            sources
                .par_iter()
                .enumerate()
                .map_with(events.clone(), |events, entry| item(events, entry))
                .reduce(BatchResult::default, BatchResult::merge)
        })
    };

    tracing::info!(
        processed = result.processed,
        errors = result.errors,
        total = result.total(),
        "batch finished"
    );
    Ok(result)
}

/// Run one item through identify → plan → convert.
fn process_image(
    backend: &impl ImageBackend,
    source: &SourceImage,
    index: usize,
    output_dir: &Path,
    config: &ProcessingConfig,
) -> Result<OutputPlan, BackendError> {
    let dimensions = backend.identify(&source.path)?;
    let plan = plan_output(source, dimensions, index, config);
    tracing::debug!(
        source = %source.filename,
        from = %format!("{}x{}", dimensions.width, dimensions.height),
        to = %format!("{}x{}", plan.width, plan.height),
        output = %plan.filename,
        "planned"
    );

    backend.convert(&ConvertParams {
        source: source.path.clone(),
        output: output_dir.join(&plan.filename),
        width: plan.width,
        height: plan.height,
        format: plan.format.clone(),
        quality: plan.format.supports_quality().then(|| config.quality()),
    })?;
    Ok(plan)
}

/// Turn an item outcome into counters, a log line, and a progress event.
fn report(
    outcome: Result<OutputPlan, BackendError>,
    source: &SourceImage,
    index: usize,
    total: usize,
    events: Option<&Sender<ProcessEvent>>,
) -> BatchResult {
    let (result, event) = match outcome {
        Ok(plan) => (
            BatchResult::success(),
            ProcessEvent::ImageProcessed {
                index,
                total,
                source: source.filename.clone(),
                output: plan.filename,
                width: plan.width,
                height: plan.height,
            },
        ),
        Err(e) => {
            tracing::warn!(source = %source.filename, error = %e, "could not process image");
            (
                BatchResult::failure(),
                ProcessEvent::ImageFailed {
                    index,
                    total,
                    source: source.filename.clone(),
                    reason: e.to_string(),
                },
            )
        }
    };

    if let Some(tx) = events {
        // A dropped receiver only means nobody is listening
        tx.send(event).ok();
    }
    result
}
