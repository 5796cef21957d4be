//! Image reader implementation using the `image` crate.
//!
//! Formats are sniffed from file content first and fall back to the file
//! extension, so a mislabeled file is still decoded by the right codec and a
//! non-image file with an image extension fails cleanly in the decoder.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use image::{DynamicImage, ImageFormat};
use tracing::debug;

use crate::steganalysis::common::error::{AnalysisError, Result};
use crate::steganalysis::sample::reader::ImageReader;
use crate::steganalysis::sample::types::{ColorMode, ImageSample, display_name};

/// Reader for every raster format the `image` crate was built with
/// (PNG, JPEG, GIF, BMP, TIFF, ...).
pub struct ImageCrateReader;

/// Upper-case label for a decoder format, e.g. `PNG`.
fn format_label(format: ImageFormat) -> String {
    match format {
        ImageFormat::Png => "PNG".to_string(),
        ImageFormat::Jpeg => "JPEG".to_string(),
        ImageFormat::Gif => "GIF".to_string(),
        ImageFormat::Bmp => "BMP".to_string(),
        ImageFormat::Tiff => "TIFF".to_string(),
        ImageFormat::WebP => "WEBP".to_string(),
        other => format!("{other:?}").to_uppercase(),
    }
}

/// Enough leading bytes to cover the PNG IHDR and the BMP info header.
const HEADER_LEN: u64 = 32;

fn read_header(path: &Path) -> Result<Vec<u8>> {
    let file = File::open(path)
        .map_err(|e| AnalysisError::InputReadError(format!("{}: {}", path.display(), e)))?;
    let mut header = Vec::with_capacity(HEADER_LEN as usize);
    file.take(HEADER_LEN)
        .read_to_end(&mut header)
        .map_err(|e| AnalysisError::InputReadError(format!("{}: {}", path.display(), e)))?;
    Ok(header)
}

/// Whether the file stores color-table indices instead of color samples.
/// The decoder expands such images to RGB(A), so this has to be read from
/// the container header.
pub(crate) fn is_indexed(format: Option<ImageFormat>, header: &[u8]) -> bool {
    match format {
        Some(ImageFormat::Gif) => true,
        // IHDR color type 3
        Some(ImageFormat::Png) => header.get(25) == Some(&3),
        Some(ImageFormat::Bmp) => {
            // OS/2 core headers are 12 bytes and keep a shorter bit count offset
            let bit_count_at = if header.get(14) == Some(&12) { 24 } else { 28 };
            header
                .get(bit_count_at..bit_count_at + 2)
                .map(|bytes| u16::from_le_bytes([bytes[0], bytes[1]]))
                .is_some_and(|bits| (1..=8).contains(&bits))
        }
        _ => false,
    }
}

fn color_mode(image: &DynamicImage) -> ColorMode {
    let color = image.color();
    match (color.has_color(), color.has_alpha()) {
        (true, true) => ColorMode::Rgba,
        (true, false) => ColorMode::Rgb,
        (false, true) => ColorMode::LumaAlpha,
        (false, false) => ColorMode::Luma,
    }
}

/// Flattens the decoded image to interleaved 8-bit samples. Deeper sources
/// (16-bit, float) are scaled down by the conversion.
fn to_8bit_samples(image: DynamicImage, mode: ColorMode) -> Vec<u8> {
    match mode {
        ColorMode::Luma | ColorMode::Palette => image.into_luma8().into_raw(),
        ColorMode::LumaAlpha => image.into_luma_alpha8().into_raw(),
        ColorMode::Rgb => image.into_rgb8().into_raw(),
        ColorMode::Rgba => image.into_rgba8().into_raw(),
    }
}

impl ImageReader for ImageCrateReader {
    fn read_image(&self, path: &Path) -> Result<ImageSample> {
        let size_bytes = std::fs::metadata(path)
            .map_err(|e| AnalysisError::InputReadError(format!("{}: {}", path.display(), e)))?
            .len();

        let reader = image::ImageReader::open(path)
            .map_err(|e| AnalysisError::InputReadError(format!("{}: {}", path.display(), e)))?
            .with_guessed_format()
            .map_err(|e| AnalysisError::InputReadError(format!("{}: {}", path.display(), e)))?;

        let format = reader.format();
        let indexed = is_indexed(format, &read_header(path)?);
        debug!(
            "Decoding {} ({} bytes, format {:?}, indexed {})",
            path.display(),
            size_bytes,
            format,
            indexed
        );

        let decoded = reader
            .decode()
            .map_err(|e| AnalysisError::DecodeError(e.to_string()))?;

        let width = decoded.width();
        let height = decoded.height();
        let mode = if indexed {
            ColorMode::Palette
        } else {
            color_mode(&decoded)
        };

        debug!("Decoded image: {}x{} {}", width, height, mode);

        Ok(ImageSample {
            path: path.to_path_buf(),
            file_name: display_name(path),
            width,
            height,
            pixels: to_8bit_samples(decoded, mode),
            format: format.map(format_label),
            mode,
            size_bytes,
        })
    }
}
