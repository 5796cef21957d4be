use std::path::Path;

use crate::steganalysis::common::error::Result;
use crate::steganalysis::sample::types::ImageSample;

pub trait ImageReader {
    fn read_image(&self, path: &Path) -> Result<ImageSample>;
}
