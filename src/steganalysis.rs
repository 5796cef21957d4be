//! Heuristic LSB steganalysis
//!
//! This module scans directory trees for raster images and flags the ones
//! whose per-channel statistics look unlike natural photos. It estimates
//! likelihood only; payloads are never extracted.

pub mod common;
pub mod sample;
pub mod channel;
pub mod scan;
pub mod report;

pub use common::{
    AnalysisError,
    Result,
};

pub use sample::{
    ColorMode,
    ImageCrateReader,
    ImageReader,
    ImageSample,
};

pub use channel::{
    ChannelAnalyzer,
    ChannelStatistics,
    Warning,
    WarningKind,
};

pub use scan::{
    BatchScanner,
    ScanConfig,
    ScanConfigBuilder,
};

pub use report::{
    AnalysisResult,
    FailedAnalysis,
    ImageReport,
    ScanReport,
    render_json,
    render_text,
    write_text_report,
};
