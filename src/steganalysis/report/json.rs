use crate::steganalysis::common::error::{AnalysisError, Result};
use crate::steganalysis::report::types::ScanReport;

/// Pretty-printed JSON; each result carries a `"status"` of `"success"` or
/// `"failure"`.
pub fn render_json(report: &ScanReport) -> Result<String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| AnalysisError::ReportWriteError(e.to_string()))
}
