//! CLI output formatting.
//!
//! Everything the user sees on stdout goes through here. Diagnostics for
//! developers go through `tracing` to stderr instead.
//!
//! # Output Format
//!
//! ```text
//! Found 3 images in 'input_images'.
//! Output format: JPEG, quality: 85
//! Keep aspect ratio: true, auto-orientation: false
//! Output folder: output_images
//! --------------------------------------------------
//! 001/003 beach.png → beach_resized.jpg (800x600)
//! 002/003 Could not process broken.jpg: Failed to decode input_images/broken.jpg: ...
//! 003/003 tower.jpg → tower_resized.jpg (450x800)
//! --------------------------------------------------
//! Processed: 2, Errors: 1
//! ```
//!
//! With parallel jobs, item lines appear in completion order; the `NNN/TTT`
//! counter always shows the item's position in the sorted source list.
//!
//! # Architecture
//!
//! Each piece has a `format_*` function (returns `Vec<String>`) for testability.
//! Format functions are pure: no I/O, no side effects. `main` does the printing.

use crate::config::Config;
use crate::process::ProcessEvent;
use crate::types::BatchResult;
use std::path::Path;

const RULE_WIDTH: usize = 50;

/// Format a 1-based position as a zero-padded 3-digit string.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

fn rule() -> String {
    "-".repeat(RULE_WIDTH)
}

/// Lines printed once before any image is processed.
pub fn format_run_header(count: usize, config: &Config) -> Vec<String> {
    let p = &config.processing;
    vec![
        format!(
            "Found {} images in '{}'.",
            count,
            config.input.display()
        ),
        format!("Output format: {}, quality: {}", p.format, p.quality),
        format!(
            "Keep aspect ratio: {}, auto-orientation: {}",
            p.keep_aspect, p.auto_orientation
        ),
        format!("Output folder: {}", config.output.display()),
        rule(),
    ]
}

pub fn format_no_images() -> Vec<String> {
    vec!["No images found to process.".to_string()]
}

pub fn format_missing_input(input: &Path) -> Vec<String> {
    vec![format!("Input folder does not exist: {}", input.display())]
}

/// One line per finished item.
pub fn format_process_event(event: &ProcessEvent) -> Vec<String> {
    match event {
        ProcessEvent::ImageProcessed {
            index,
            total,
            source,
            output,
            width,
            height,
        } => vec![format!(
            "{}/{} {} → {} ({}x{})",
            format_index(*index),
            format_index(*total),
            source,
            output,
            width,
            height
        )],
        ProcessEvent::ImageFailed {
            index,
            total,
            source,
            reason,
        } => vec![format!(
            "{}/{} Could not process {}: {}",
            format_index(*index),
            format_index(*total),
            source,
            reason
        )],
    }
}

/// Closing lines. Printed on every run that got past config loading.
pub fn format_summary(result: &BatchResult) -> Vec<String> {
    vec![rule(), result.to_string()]
}
