//! Channel analysis module
//!
//! Per-channel statistics, the threshold rules evaluated against them, and
//! the analyzer that turns one image file into one verdict.

pub mod stats;
pub mod rules;
mod analyzer;


pub use stats::{ChannelStatistics, Histogram, HISTOGRAM_BINS};
pub use rules::{Warning, WarningKind};
pub use analyzer::{ChannelAnalyzer, ANALYZED_CHANNELS, channel_statistics, evaluate_channels};
