//! Valid-range scan over the histogram
//!
//! Bins are walked in ascending raw-value order. Bins at or below the noise
//! threshold are skipped. A jump larger than the maximum gap between two
//! accepted bins either discards everything accepted so far (when it is a
//! small fraction of the counted bins) or ends the scan.

use super::histogram::Histogram;
use super::sample::SampleDomain;
use super::Tuning;

/// Bounds and accumulated values of the accepted bins
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScanResult {
    pub low: i64,
    pub high: i64,
    /// Sum of accepted raw values, once per bin
    pub sum: i64,
    /// Accepted bins, floored at 1
    pub valid_bin_count: u32,
    /// No bin was accepted; bounds are the first sample
    pub empty: bool,
}

impl ScanResult {
    /// Integer mean of the accepted raw values, truncated toward zero.
    #[inline]
    #[must_use]
    pub fn mean(&self) -> i64 {
        self.sum / i64::from(self.valid_bin_count)
    }
}

/// Find the visually significant range of `histogram`.
#[must_use]
pub fn scan(histogram: &Histogram, domain: SampleDomain, tuning: &Tuning) -> ScanResult {
    let num_bins = u64::from(histogram.counted_bins().max(1));
    let first = histogram.first_sample();

    let mut low = first;
    let mut high = first;
    let mut prev_bin = domain.min_value();
    let mut valid_bins: u32 = 0;
    let mut sum: i64 = 0;

    let mut index: u16 = 0;
    loop {
        let bin = index.wrapping_add(domain.offset());
        if histogram.count(bin) > tuning.noise_threshold {
            let value = domain.value_at(index);

            if value - prev_bin > tuning.max_gap && valid_bins > 0 {
                if u64::from(valid_bins) * 100 / num_bins < tuning.outlier_percent {
                    // Everything so far was a stray outlier population
                    valid_bins = 0;
                    sum = 0;
                    low = value;
                } else {
                    break;
                }
            }

            if valid_bins == 0 {
                low = value;
            }

            valid_bins += 1;
            sum += value;
            prev_bin = value;
            high = value;
        }

        index = index.wrapping_add(1);
        if index == 0 {
            break;
        }
    }

    let empty = valid_bins == 0;
    ScanResult {
        low,
        high,
        sum,
        valid_bin_count: valid_bins.max(1),
        empty,
    }
}
