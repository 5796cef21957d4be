//! Decoded image sample types

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Serialize;

/// Base name of `path`, falling back to the whole path when it has none.
pub fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Color layout of a decoded sample, named the way imaging tools usually
/// label them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ColorMode {
    /// Single luminance channel
    #[serde(rename = "L")]
    Luma,
    /// Luminance plus alpha
    #[serde(rename = "LA")]
    LumaAlpha,
    #[serde(rename = "RGB")]
    Rgb,
    #[serde(rename = "RGBA")]
    Rgba,
    /// Indices into a color table (GIF, indexed PNG, low bit depth BMP)
    #[serde(rename = "P")]
    Palette,
}

impl ColorMode {
    pub fn channel_count(self) -> usize {
        match self {
            ColorMode::Luma | ColorMode::Palette => 1,
            ColorMode::LumaAlpha => 2,
            ColorMode::Rgb => 3,
            ColorMode::Rgba => 4,
        }
    }

    /// Whether the sample carries the three color planes the channel
    /// heuristics need. Palette sources store one index per pixel and do not.
    pub fn is_multi_channel(self) -> bool {
        self.channel_count() >= 3
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ColorMode::Luma => "L",
            ColorMode::LumaAlpha => "LA",
            ColorMode::Rgb => "RGB",
            ColorMode::Rgba => "RGBA",
            ColorMode::Palette => "P",
        }
    }
}

impl fmt::Display for ColorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Represents one decoded image, ready for channel analysis
#[derive(Debug, Clone)]
pub struct ImageSample {
    /// Location the sample was loaded from
    pub path: PathBuf,
    /// Base name of `path`
    pub file_name: String,
    /// Width of the image in pixels
    pub width: u32,
    /// Height of the image in pixels
    pub height: u32,
    /// Interleaved 8-bit samples, `mode.channel_count()` per pixel. Palette
    /// sources hold the luma of each pixel's table entry.
    pub pixels: Vec<u8>,
    /// Declared container format (e.g. "PNG"), when the decoder could tell
    pub format: Option<String>,
    pub mode: ColorMode,
    /// Size of the file on disk in bytes
    pub size_bytes: u64,
}

impl ImageSample {
    pub fn channel_count(&self) -> usize {
        self.mode.channel_count()
    }

    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// Iterates the samples of one channel in row-major order.
    pub fn channel(&self, index: usize) -> impl Iterator<Item = u8> + '_ {
        self.pixels
            .iter()
            .skip(index)
            .step_by(self.channel_count())
            .copied()
    }
}
