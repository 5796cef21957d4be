//! Per-channel statistics, all derived from a single 256-bin histogram pass.

use serde::Serialize;

/// Number of histogram bins; one per 8-bit value, covering `[0, 256)`.
pub const HISTOGRAM_BINS: usize = 256;

/// Value histogram of one 8-bit channel
#[derive(Debug, Clone)]
pub struct Histogram {
    counts: [u64; HISTOGRAM_BINS],
    total: u64,
}

impl Histogram {
    pub fn from_samples<I: IntoIterator<Item = u8>>(samples: I) -> Self {
        let mut counts = [0u64; HISTOGRAM_BINS];
        let mut total = 0u64;
        for value in samples {
            counts[value as usize] += 1;
            total += 1;
        }
        Self { counts, total }
    }

    pub fn total(&self) -> u64 {
        self.total
    }

    pub fn counts(&self) -> &[u64; HISTOGRAM_BINS] {
        &self.counts
    }

    /// Fraction of samples whose least significant bit is set.
    pub fn lsb_mean(&self) -> f64 {
        let odd: u64 = self.counts.iter().skip(1).step_by(2).sum();
        odd as f64 / self.total as f64
    }

    pub fn mean(&self) -> f64 {
        let sum: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, &count)| value as f64 * count as f64)
            .sum();
        sum / self.total as f64
    }

    /// Population standard deviation (divides by `n`, not `n - 1`).
    pub fn std_dev(&self) -> f64 {
        let mean = self.mean();
        let squared: f64 = self
            .counts
            .iter()
            .enumerate()
            .map(|(value, &count)| {
                let delta = value as f64 - mean;
                delta * delta * count as f64
            })
            .sum();
        (squared / self.total as f64).sqrt()
    }

    /// Shannon entropy in bits: `-Σ p·log2(p)` over non-empty bins.
    pub fn entropy(&self) -> f64 {
        let total = self.total as f64;
        let entropy: f64 = self
            .counts
            .iter()
            .filter(|&&count| count > 0)
            .map(|&count| {
                let p = count as f64 / total;
                -p * p.log2()
            })
            .sum();
        // A single occupied bin sums to -0.0.
        entropy.max(0.0)
    }
}

/// Statistical signature of one color channel
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChannelStatistics {
    /// Channel index within the pixel (0 = red for RGB sources)
    pub channel: usize,
    /// Mean of the LSB plane, in `[0, 1]`
    pub lsb_mean: f64,
    /// Standard deviation of the full 8-bit values
    pub std_dev: f64,
    /// Shannon entropy of the value histogram, in `[0, 8]` bits
    pub entropy: f64,
}

impl ChannelStatistics {
    /// Returns `None` for a histogram with no samples, where none of the
    /// statistics are defined.
    pub fn from_histogram(channel: usize, histogram: &Histogram) -> Option<Self> {
        if histogram.total() == 0 {
            return None;
        }

        Some(Self {
            channel,
            lsb_mean: histogram.lsb_mean(),
            std_dev: histogram.std_dev(),
            entropy: histogram.entropy(),
        })
    }

    pub fn from_samples<I: IntoIterator<Item = u8>>(channel: usize, samples: I) -> Option<Self> {
        Self::from_histogram(channel, &Histogram::from_samples(samples))
    }
}
