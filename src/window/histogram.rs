//! Per-value histogram over the full 16-bit domain

use super::error::WindowError;
use super::sample::{Sample, SampleDomain, padding_bin};
use crate::types::ValueRange;

/// Number of histogram bins, one per 16-bit value
pub const BIN_COUNT: usize = 0x10000;

/// Pixel counts indexed by 16-bit bin, scoped to a single computation
pub struct Histogram {
    counts: Box<[u64]>,
    counted_bins: u32,
    considered: u64,
    min_sample: i64,
    max_sample: i64,
    first_sample: i64,
}

impl std::fmt::Debug for Histogram {
    // Don't print all 65536 counts
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Histogram")
            .field("counted_bins", &self.counted_bins)
            .field("considered", &self.considered)
            .field("min_sample", &self.min_sample)
            .field("max_sample", &self.max_sample)
            .field("first_sample", &self.first_sample)
            .finish_non_exhaustive()
    }
}

impl Histogram {
    /// Scan every sample once and accumulate per-bin counts.
    ///
    /// Padding pixels (matched on the low 16 bits) and, when `range` is set,
    /// raw values outside it are left out of the counts. A bin is added to
    /// [`counted_bins`](Self::counted_bins) the moment its count first
    /// exceeds `noise_threshold`.
    ///
    /// # Errors
    /// - [`WindowError::EmptyBuffer`] if `samples` is empty.
    /// - [`WindowError::SampleOutOfRange`] for the first sample outside `domain`.
    pub fn build<T: Sample>(
        samples: &[T],
        domain: SampleDomain,
        padding: Option<i32>,
        range: Option<ValueRange>,
        noise_threshold: u64,
    ) -> Result<Self, WindowError> {
        let first_sample = samples.first().ok_or(WindowError::EmptyBuffer)?.to_i64();

        let mut counts = vec![0_u64; BIN_COUNT].into_boxed_slice();
        let mut counted_bins: u32 = 0;
        let mut considered: u64 = 0;
        let mut min_sample = first_sample;
        let mut max_sample = first_sample;
        let pad_bin = padding.map(padding_bin);

        for (index, &sample) in samples.iter().enumerate() {
            let value = sample.to_i64();
            let tagged = domain
                .classify(value)
                .ok_or(WindowError::SampleOutOfRange { index, value, domain })?;

            min_sample = min_sample.min(value);
            max_sample = max_sample.max(value);

            let bin = tagged.bin();
            if pad_bin == Some(bin) {
                continue;
            }
            if range.is_some_and(|r| !r.contains(tagged.value())) {
                continue;
            }

            let count = &mut counts[usize::from(bin)];
            if *count == noise_threshold {
                counted_bins += 1;
            }
            *count += 1;
            considered += 1;
        }

        Ok(Self {
            counts,
            counted_bins,
            considered,
            min_sample,
            max_sample,
            first_sample,
        })
    }

    #[inline(always)]
    #[must_use]
    pub fn count(&self, bin: u16) -> u64 {
        self.counts[usize::from(bin)]
    }

    /// Distinct bins whose count exceeded the noise threshold.
    #[inline]
    #[must_use]
    pub fn counted_bins(&self) -> u32 {
        self.counted_bins
    }

    /// Pixels that made it into the counts.
    #[inline]
    #[must_use]
    pub fn considered(&self) -> u64 {
        self.considered
    }

    #[inline]
    #[must_use]
    pub fn first_sample(&self) -> i64 {
        self.first_sample
    }

    /// Raw (min, max) over every sample, padding and range-excluded included.
    #[inline]
    #[must_use]
    pub fn sample_bounds(&self) -> (i64, i64) {
        (self.min_sample, self.max_sample)
    }

    #[must_use]
    pub fn total(&self) -> u64 {
        self.counts.iter().sum()
    }
}
