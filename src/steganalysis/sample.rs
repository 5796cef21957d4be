//! Image sample loading module
//!
//! This module turns files on disk into decoded 8-bit samples for analysis.

mod reader;
mod image_crate_reader;
pub mod types;

#[cfg(test)]
mod tests;

pub use reader::ImageReader;
pub use image_crate_reader::ImageCrateReader;
pub use types::{ColorMode, ImageSample, display_name};
