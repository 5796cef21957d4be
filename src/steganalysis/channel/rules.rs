//! Threshold rules applied to each channel's statistics.
//!
//! The constants are fixed for compatibility with existing reports; they were
//! never calibrated against a reference corpus, so expect false positives on
//! flat artwork and heavily compressed JPEGs.

use std::fmt;

use serde::{Serialize, Serializer};

use crate::steganalysis::channel::stats::ChannelStatistics;

/// LSB-plane mean above this is unbalanced.
pub const LSB_MEAN_UPPER: f64 = 0.6;
/// LSB-plane mean below this is unbalanced.
pub const LSB_MEAN_LOWER: f64 = 0.4;
/// Channels flatter than this (on the 0-255 scale) are suspicious.
pub const MIN_STD_DEV: f64 = 10.0;
/// Minimum entropy, in bits, expected of a natural 8-bit channel.
pub const MIN_ENTROPY_BITS: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WarningKind {
    UnusualLsbPattern,
    UnusualPixelDistribution,
    LowEntropy,
}

/// A rule that fired for one channel
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub channel: usize,
}

impl Warning {
    pub fn new(kind: WarningKind, channel: usize) -> Self {
        Self { kind, channel }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            WarningKind::UnusualLsbPattern => {
                write!(f, "Unusual LSB pattern in channel {}", self.channel)
            }
            WarningKind::UnusualPixelDistribution => {
                write!(f, "Unusual pixel distribution in channel {}", self.channel)
            }
            WarningKind::LowEntropy => write!(f, "Low entropy in channel {}", self.channel),
        }
    }
}

impl Serialize for Warning {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

pub fn lsb_unbalanced(stats: &ChannelStatistics) -> bool {
    stats.lsb_mean > LSB_MEAN_UPPER || stats.lsb_mean < LSB_MEAN_LOWER
}

pub fn low_variance(stats: &ChannelStatistics) -> bool {
    stats.std_dev < MIN_STD_DEV
}

pub fn low_entropy(stats: &ChannelStatistics) -> bool {
    stats.entropy < MIN_ENTROPY_BITS
}

/// Evaluates every rule against one channel, in LSB, variance, entropy order.
pub fn evaluate(stats: &ChannelStatistics) -> Vec<Warning> {
    let checks: [(fn(&ChannelStatistics) -> bool, WarningKind); 3] = [
        (lsb_unbalanced, WarningKind::UnusualLsbPattern),
        (low_variance, WarningKind::UnusualPixelDistribution),
        (low_entropy, WarningKind::LowEntropy),
    ];

    checks
        .iter()
        .filter(|(fired, _)| fired(stats))
        .map(|&(_, kind)| Warning::new(kind, stats.channel))
        .collect()
}
