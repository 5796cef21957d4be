use std::path::{Path, PathBuf};

use rayon::prelude::*;
use tracing::{info, instrument};

use crate::steganalysis::{
    channel::ChannelAnalyzer,
    report::{AnalysisResult, ScanReport},
    sample::{ImageCrateReader, ImageReader},
    scan::{discover, ScanConfig, ScanTimings},
};

pub struct BatchScanner<R: ImageReader + Sync> {
    analyzer: ChannelAnalyzer<R>,
    config: ScanConfig,
}

impl BatchScanner<ImageCrateReader> {
    pub fn new(config: ScanConfig) -> Self {
        Self {
            analyzer: ChannelAnalyzer::new(),
            config,
        }
    }
}

impl<R: ImageReader + Sync> BatchScanner<R> {
    pub fn with_reader(reader: R, config: ScanConfig) -> Self {
        Self {
            analyzer: ChannelAnalyzer::with_reader(reader),
            config,
        }
    }

    /// Discovers every candidate under `root`, analyzes them all on the
    /// rayon pool and returns once the last analysis has finished.
    ///
    /// Never fails: unreadable entries and undecodable files show up in the
    /// report instead.
    #[instrument(skip_all)]
    pub fn scan<P: AsRef<Path>>(&self, root: P) -> ScanReport {
        let root = root.as_ref();
        info!(root = %root.display(), "Starting scan");
        let mut timings = ScanTimings::new();

        let discovery = timings.time("discover", || discover(root, &self.config));
        info!("Found {} images to analyze", discovery.files.len());

        let results = timings.time("analyze", || self.analyze_all(&discovery.files));

        let report = ScanReport::new(root, results, discovery.errors, timings);
        info!(
            total = report.total_files,
            flagged = report.flagged_count(),
            failed = report.failure_count(),
            elapsed_ms = report.timings.total_duration().as_secs_f64() * 1000.0,
            "Scan complete"
        );
        report
    }

    /// One result per path, in the same order as `paths`. Each task writes
    /// only its own slot of the collected vector.
    pub fn analyze_all(&self, paths: &[PathBuf]) -> Vec<AnalysisResult> {
        paths
            .par_iter()
            .map(|path| self.analyzer.analyze(path))
            .collect()
    }

    pub fn analyzer(&self) -> &ChannelAnalyzer<R> {
        &self.analyzer
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    pub fn set_config(&mut self, config: ScanConfig) {
        self.config = config;
    }
}
