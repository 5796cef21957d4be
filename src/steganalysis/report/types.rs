//! Analysis result and scan report types

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::steganalysis::channel::{ChannelStatistics, Warning};
use crate::steganalysis::common::error::AnalysisError;
use crate::steganalysis::sample::{ColorMode, ImageSample, display_name};
use crate::steganalysis::scan::ScanTimings;

/// Outcome of analyzing one discovered file
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum AnalysisResult {
    Success(ImageReport),
    Failure(FailedAnalysis),
}

/// Verdict for a file that decoded successfully
#[derive(Debug, Clone, Serialize)]
pub struct ImageReport {
    pub path: PathBuf,
    pub file_name: String,
    pub size_bytes: u64,
    pub width: u32,
    pub height: u32,
    pub format: Option<String>,
    pub mode: ColorMode,
    /// True exactly when `warnings` is non-empty
    pub flagged: bool,
    /// Channel-major, rule order LSB, variance, entropy
    pub warnings: Vec<Warning>,
    /// Empty for single and dual channel images, which skip the heuristics
    pub channels: Vec<ChannelStatistics>,
    pub analyzed_at: DateTime<Local>,
}

/// A file that could not be loaded or analyzed
#[derive(Debug, Clone, Serialize)]
pub struct FailedAnalysis {
    pub path: PathBuf,
    pub file_name: String,
    pub error: String,
    pub analyzed_at: DateTime<Local>,
}

impl ImageReport {
    pub fn new(
        sample: &ImageSample,
        channels: Vec<ChannelStatistics>,
        warnings: Vec<Warning>,
    ) -> Self {
        Self {
            path: sample.path.clone(),
            file_name: sample.file_name.clone(),
            size_bytes: sample.size_bytes,
            width: sample.width,
            height: sample.height,
            format: sample.format.clone(),
            mode: sample.mode,
            flagged: !warnings.is_empty(),
            warnings,
            channels,
            analyzed_at: Local::now(),
        }
    }
}

impl FailedAnalysis {
    pub fn new(path: &Path, error: &AnalysisError) -> Self {
        Self {
            path: path.to_path_buf(),
            file_name: display_name(path),
            error: error.to_string(),
            analyzed_at: Local::now(),
        }
    }
}

impl AnalysisResult {
    pub fn failure(path: &Path, error: &AnalysisError) -> Self {
        AnalysisResult::Failure(FailedAnalysis::new(path, error))
    }

    pub fn path(&self) -> &Path {
        match self {
            AnalysisResult::Success(report) => &report.path,
            AnalysisResult::Failure(failure) => &failure.path,
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            AnalysisResult::Success(report) => &report.file_name,
            AnalysisResult::Failure(failure) => &failure.file_name,
        }
    }

    /// Failures are never flagged.
    pub fn is_flagged(&self) -> bool {
        matches!(self, AnalysisResult::Success(report) if report.flagged)
    }

    pub fn as_success(&self) -> Option<&ImageReport> {
        match self {
            AnalysisResult::Success(report) => Some(report),
            AnalysisResult::Failure(_) => None,
        }
    }

    pub fn as_failure(&self) -> Option<&FailedAnalysis> {
        match self {
            AnalysisResult::Success(_) => None,
            AnalysisResult::Failure(failure) => Some(failure),
        }
    }
}

/// Everything one scan produced, in discovery order
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub root: PathBuf,
    pub generated_at: DateTime<Local>,
    /// Number of candidate files discovered, one result each
    pub total_files: usize,
    pub flagged_files: Vec<String>,
    pub results: Vec<AnalysisResult>,
    /// Directory entries that could not be traversed and were skipped
    pub discovery_errors: Vec<String>,
    /// Duration of each scan phase, serialized in milliseconds
    pub timings: ScanTimings,
}

impl ScanReport {
    pub fn new(
        root: impl Into<PathBuf>,
        results: Vec<AnalysisResult>,
        discovery_errors: Vec<String>,
        timings: ScanTimings,
    ) -> Self {
        let flagged_files = results
            .iter()
            .filter(|result| result.is_flagged())
            .map(|result| result.file_name().to_string())
            .collect();

        Self {
            root: root.into(),
            generated_at: Local::now(),
            total_files: results.len(),
            flagged_files,
            results,
            discovery_errors,
            timings,
        }
    }

    pub fn flagged_count(&self) -> usize {
        self.flagged_files.len()
    }

    pub fn successes(&self) -> impl Iterator<Item = &ImageReport> {
        self.results.iter().filter_map(AnalysisResult::as_success)
    }

    pub fn failures(&self) -> impl Iterator<Item = &FailedAnalysis> {
        self.results.iter().filter_map(AnalysisResult::as_failure)
    }

    pub fn failure_count(&self) -> usize {
        self.failures().count()
    }
}
