//! Scan results and their renderings
//!
//! Result types produced by the analyzer and scanner, plus the text and JSON
//! renderers consumed by the CLI and the upload endpoint.

pub mod types;
mod text;
mod json;


pub use types::{AnalysisResult, FailedAnalysis, ImageReport, ScanReport};
pub use text::{render_text, write_text_report, TextReport, CLEAN_BANNER, FLAGGED_BANNER, REPORT_TITLE};
pub use json::render_json;
