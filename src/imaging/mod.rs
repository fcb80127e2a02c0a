//! Image processing: pure Rust, no system libraries beyond bundled libwebp.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **Identify** | `image::ImageReader::into_dimensions` |
//! | **Plan** | [`plan_dimensions`] (pure) |
//! | **Resample** | Lanczos3 via `DynamicImage::resize_exact` |
//! | **Encode** | `image` encoders; `webp` for lossy WebP |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for dimension math (unit testable)
//! - **Parameters**: Data structures describing image operations
//! - **Backend**: [`ImageBackend`] trait + [`RustBackend`]

pub mod backend;
mod calculations;
mod params;
pub mod rust_backend;

pub use backend::{BackendError, Dimensions, ImageBackend};
pub use calculations::{fitting_box, plan_dimensions};
pub use params::{ConvertParams, OutputFormat, Quality};
pub use rust_backend::RustBackend;
