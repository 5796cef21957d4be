//! Plain-text report layout, shared by the console output, the report file
//! and the upload endpoint.

use std::fmt;
use std::path::Path;

use tracing::debug;

use crate::steganalysis::common::error::{AnalysisError, Result};
use crate::steganalysis::report::types::{AnalysisResult, ScanReport};

pub const REPORT_TITLE: &str = "Steganography Analysis Report";
pub const FLAGGED_BANNER: &str = "⚠️  POTENTIAL STEGANOGRAPHY DETECTED!";
pub const CLEAN_BANNER: &str = "✓ No obvious signs of steganography";

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const RULE_WIDTH: usize = 80;

/// Display adapter rendering a [`ScanReport`] in the text layout
pub struct TextReport<'a>(pub &'a ScanReport);

impl TextReport<'_> {
    fn write_result(f: &mut fmt::Formatter<'_>, result: &AnalysisResult) -> fmt::Result {
        match result {
            AnalysisResult::Failure(failure) => {
                writeln!(f, "\nError analyzing {}: {}", failure.file_name, failure.error)
            }
            AnalysisResult::Success(report) => {
                writeln!(f, "\nFile: {}", report.file_name)?;
                writeln!(f, "Size: {} bytes", report.size_bytes)?;
                writeln!(f, "Dimensions: {}x{}", report.width, report.height)?;
                writeln!(f, "Format: {}", report.format.as_deref().unwrap_or("unknown"))?;
                writeln!(f, "Mode: {}", report.mode)?;

                if report.flagged {
                    writeln!(f, "{FLAGGED_BANNER}")?;
                    writeln!(f, "Warnings:")?;
                    for warning in &report.warnings {
                        writeln!(f, "  - {warning}")?;
                    }
                    Ok(())
                } else {
                    writeln!(f, "{CLEAN_BANNER}")
                }
            }
        }
    }
}

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let rule = "=".repeat(RULE_WIDTH);

        writeln!(f, "{REPORT_TITLE}")?;
        writeln!(f, "{rule}\n")?;
        writeln!(
            f,
            "Analysis performed on: {}",
            report.generated_at.format(TIMESTAMP_FORMAT)
        )?;

        for result in &report.results {
            Self::write_result(f, result)?;
        }

        for problem in &report.discovery_errors {
            writeln!(f, "\nSkipped: {problem}")?;
        }

        writeln!(f, "\nSummary:")?;
        writeln!(f, "{rule}")?;
        writeln!(f, "Total images analyzed: {}", report.total_files)?;
        writeln!(f, "Suspicious files found: {}", report.flagged_count())?;
        writeln!(f, "Failed to analyze: {}", report.failure_count())?;

        if !report.flagged_files.is_empty() {
            writeln!(f, "\nSuspicious files:")?;
            for name in &report.flagged_files {
                writeln!(f, "  - {name}")?;
            }
        }
        Ok(())
    }
}

pub fn render_text(report: &ScanReport) -> String {
    TextReport(report).to_string()
}

pub fn write_text_report<P: AsRef<Path>>(report: &ScanReport, path: P) -> Result<()> {
    let path = path.as_ref();
    debug!("Writing text report to {}", path.display());

    std::fs::write(path, render_text(report)).map_err(|e| {
        AnalysisError::ReportWriteError(format!("{}: {}", path.display(), e))
    })
}
