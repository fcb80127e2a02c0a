//! Pure Rust image processing backend.
//!
//! ## Crate mapping
//!
//! | Operation | Crate / function |
//! |---|---|
//! | Identify | `image::ImageReader::into_dimensions` (header only) |
//! | Decode (JPEG, PNG, TIFF, WebP, BMP) | `image` crate, format guessed from content |
//! | Normalize | `DynamicImage::to_rgb8` / `to_rgba8` |
//! | Resample | `DynamicImage::resize_exact` with `Lanczos3` filter |
//! | Encode → JPEG | `image::codecs::jpeg::JpegEncoder` (quality) |
//! | Encode → WebP | `webp` crate, lossy (quality) |
//! | Encode → PNG, BMP, other | `DynamicImage::write_to` |
//!
//! Output is written to a uniquely named hidden `.partial` sibling
//! (`tempfile::NamedTempFile`) and persisted onto the final name once the
//! encoder has finished, so a failed encode never leaves a truncated file
//! under the final name.

use super::backend::{BackendError, Dimensions, ImageBackend};
use super::params::{ConvertParams, OutputFormat, Quality};
use image::error::UnsupportedErrorKind;
use image::imageops::FilterType;
use image::{ColorType, DynamicImage, ImageError, ImageFormat, ImageReader};
use std::fs;
use std::io::{BufWriter, Seek, Write};
use std::path::Path;

/// Pure Rust backend using the `image` crate ecosystem.
///
/// See the [module docs](self) for the crate-to-operation mapping.
pub struct RustBackend;

impl RustBackend {
    pub fn new() -> Self {
        Self
    }
}

impl Default for RustBackend {
    fn default() -> Self {
        Self::new()
    }
}

fn decode_error(path: &Path, reason: impl std::fmt::Display) -> BackendError {
    BackendError::Decode {
        path: path.to_path_buf(),
        reason: reason.to_string(),
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<std::io::BufReader<fs::File>>, BackendError> {
    ImageReader::open(path)
        .and_then(|reader| reader.with_guessed_format())
        .map_err(|e| decode_error(path, e))
}

/// Load and decode an image from disk.
fn load_image(path: &Path) -> Result<DynamicImage, BackendError> {
    open_reader(path)?
        .decode()
        .map_err(|e| decode_error(path, e))
}

/// Bring the decoded pixels into a layout the target encoder accepts.
///
/// JPEG has no alpha and no palette, so everything except 8-bit gray and RGB
/// is flattened to RGB8. BMP and WebP only take 8-bit channels.
fn normalize(img: DynamicImage, format: &OutputFormat) -> DynamicImage {
    if format.requires_opaque_rgb() {
        return match img.color() {
            ColorType::L8 | ColorType::Rgb8 => img,
            _ => DynamicImage::ImageRgb8(img.to_rgb8()),
        };
    }

    match format {
        OutputFormat::Bmp | OutputFormat::WebP => match img.color() {
            ColorType::L8 | ColorType::La8 | ColorType::Rgb8 | ColorType::Rgba8 => img,
            color if color.has_alpha() => DynamicImage::ImageRgba8(img.to_rgba8()),
            _ => DynamicImage::ImageRgb8(img.to_rgb8()),
        },
        _ => img,
    }
}

fn encode_error(format: &OutputFormat, err: ImageError) -> BackendError {
    match err {
        ImageError::IoError(e) => BackendError::Io(e),
        ImageError::Unsupported(ref unsupported) => match unsupported.kind() {
            UnsupportedErrorKind::Color(color) => BackendError::UnsupportedMode {
                mode: format!("{color:?}"),
                format: format.to_string(),
            },
            _ => BackendError::Encode {
                format: format.to_string(),
                reason: err.to_string(),
            },
        },
        other => BackendError::Encode {
            format: format.to_string(),
            reason: other.to_string(),
        },
    }
}

/// Resolve a literal-extension format against the encoders compiled in.
fn fallback_format(ext: &str) -> Option<ImageFormat> {
    ImageFormat::from_extension(ext).filter(|f| f.writing_enabled())
}

fn encode<W: Write + Seek>(
    img: &DynamicImage,
    writer: &mut W,
    format: &OutputFormat,
    quality: Option<Quality>,
) -> Result<(), BackendError> {
    match format {
        OutputFormat::Jpeg => {
            // The JPEG encoder rejects quality 0
            let q = quality.unwrap_or_default().value().clamp(1, 100) as u8;
            let encoder = image::codecs::jpeg::JpegEncoder::new_with_quality(writer, q);
            img.write_with_encoder(encoder)
                .map_err(|e| encode_error(format, e))
        }
        OutputFormat::WebP => encode_webp(img, writer, quality.unwrap_or_default()),
        OutputFormat::Png => img
            .write_to(writer, ImageFormat::Png)
            .map_err(|e| encode_error(format, e)),
        OutputFormat::Bmp => img
            .write_to(writer, ImageFormat::Bmp)
            .map_err(|e| encode_error(format, e)),
        OutputFormat::Other(ext) => {
            let image_format = fallback_format(ext).ok_or_else(|| BackendError::Encode {
                format: format.to_string(),
                reason: format!("no encoder available for .{ext}"),
            })?;
            img.write_to(writer, image_format)
                .map_err(|e| encode_error(format, e))
        }
    }
}

/// Lossy WebP via libwebp; the `image` crate's own WebP encoder is lossless only.
fn encode_webp<W: Write>(
    img: &DynamicImage,
    writer: &mut W,
    quality: Quality,
) -> Result<(), BackendError> {
    let (width, height) = (img.width(), img.height());
    let q = quality.value() as f32;

    let result = if img.color().has_alpha() {
        let rgba = img.to_rgba8();
        let encoder = webp::Encoder::from_rgba(rgba.as_raw(), width, height);
        encoder.encode_simple(false, q)
    } else {
        let rgb = img.to_rgb8();
        let encoder = webp::Encoder::from_rgb(rgb.as_raw(), width, height);
        encoder.encode_simple(false, q)
    };
    let encoded = result.map_err(|e| BackendError::Encode {
        format: OutputFormat::WebP.to_string(),
        reason: format!("{e:?}"),
    })?;

    writer.write_all(&encoded)?;
    Ok(())
}

/// Encode into a hidden temporary file next to `path` and persist it onto
/// `path` only on success. The temporary file is removed on any failure.
fn save_image(
    img: &DynamicImage,
    path: &Path,
    format: &OutputFormat,
    quality: Option<Quality>,
) -> Result<(), BackendError> {
    let dir = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));

    let mut builder = tempfile::Builder::new();
    builder.prefix(".").suffix(".partial");
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        // Same mode as File::create; NamedTempFile defaults to 0600
        builder.permissions(fs::Permissions::from_mode(0o666));
    }
    let mut temp = builder.tempfile_in(dir)?;

    {
        let mut writer = BufWriter::new(temp.as_file_mut());
        encode(img, &mut writer, format, quality)?;
        writer.flush()?;
    }

    temp.persist(path).map_err(|e| BackendError::Io(e.error))?;
    Ok(())
}

impl ImageBackend for RustBackend {
    fn identify(&self, path: &Path) -> Result<Dimensions, BackendError> {
        let (width, height) = open_reader(path)?
            .into_dimensions()
            .map_err(|e| decode_error(path, e))?;
        Ok(Dimensions { width, height })
    }

    fn convert(&self, params: &ConvertParams) -> Result<(), BackendError> {
        let img = normalize(load_image(&params.source)?, &params.format);
        let resized = img.resize_exact(params.width, params.height, FilterType::Lanczos3);
        save_image(&resized, &params.output, &params.format, params.quality)
    }
}
