use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use tracing::{debug, instrument, warn};

use crate::steganalysis::{
    channel::{rules, ChannelStatistics, Warning},
    common::error::{AnalysisError, Result},
    report::{AnalysisResult, ImageReport},
    sample::{ImageCrateReader, ImageReader, ImageSample},
};

/// Only the first three channels are analyzed; alpha and extras are ignored.
pub const ANALYZED_CHANNELS: usize = 3;

/// Computes statistics for the first three channels of a multi-channel
/// sample. Single and dual channel samples yield no statistics.
pub fn channel_statistics(sample: &ImageSample) -> Result<Vec<ChannelStatistics>> {
    if !sample.mode.is_multi_channel() {
        return Ok(Vec::new());
    }

    (0..ANALYZED_CHANNELS)
        .map(|channel| {
            ChannelStatistics::from_samples(channel, sample.channel(channel))
                .ok_or(AnalysisError::EmptyImage(sample.width, sample.height))
        })
        .collect()
}

/// Applies every rule to every channel; warnings come out channel-major.
pub fn evaluate_channels(channels: &[ChannelStatistics]) -> Vec<Warning> {
    channels.iter().flat_map(rules::evaluate).collect()
}

fn panic_message(payload: Box<dyn std::any::Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "decoder panicked".to_string()
    }
}

pub struct ChannelAnalyzer<R: ImageReader> {
    reader: R,
}

impl ChannelAnalyzer<ImageCrateReader> {
    pub fn new() -> Self {
        Self {
            reader: ImageCrateReader,
        }
    }
}

impl Default for ChannelAnalyzer<ImageCrateReader> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ImageReader> ChannelAnalyzer<R> {
    pub fn with_reader(reader: R) -> Self {
        Self { reader }
    }

    /// Analyzes one file. Never fails: load, decode and statistics errors,
    /// as well as decoder panics, come back as a failure record.
    #[instrument(skip(self, path), fields(path = %path.display()))]
    pub fn analyze(&self, path: &Path) -> AnalysisResult {
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| self.try_analyze(path)))
            .unwrap_or_else(|payload| Err(AnalysisError::Panicked(panic_message(payload))));

        match outcome {
            Ok(report) => {
                debug!(
                    flagged = report.flagged,
                    warnings = report.warnings.len(),
                    "Analysis complete"
                );
                AnalysisResult::Success(report)
            }
            Err(e) => {
                warn!("Analysis failed for {}: {}", path.display(), e);
                AnalysisResult::failure(path, &e)
            }
        }
    }

    /// Runs the channel heuristics on an already decoded sample.
    pub fn analyze_sample(&self, sample: &ImageSample) -> Result<ImageReport> {
        let channels = {
            let _span = tracing::debug_span!("channel_statistics",
                width = sample.width,
                height = sample.height,
                mode = %sample.mode
            ).entered();
            channel_statistics(sample)?
        };

        let warnings = evaluate_channels(&channels);
        Ok(ImageReport::new(sample, channels, warnings))
    }

    fn try_analyze(&self, path: &Path) -> Result<ImageReport> {
        let sample = {
            let _span = tracing::debug_span!("decode_image").entered();
            self.reader.read_image(path)?
        };

        self.analyze_sample(&sample)
    }
}
