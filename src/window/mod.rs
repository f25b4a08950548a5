//! Automatic window/level computation
//!
//! A single pass over the pixels builds a 16-bit histogram, a second pass
//! over the histogram finds the range of values that carries the image
//! content, and that range is rescaled into a window and level. Nothing is
//! kept between calls, so independent images can be processed concurrently.

pub mod apply;
mod error;
mod histogram;
mod level;
mod sample;
mod scan;

pub use error::WindowError;
pub use histogram::{BIN_COUNT, Histogram};
pub use level::{Thresholds, WindowLevel};
pub use sample::{Sample, SampleDomain, TaggedSample};
pub use scan::ScanResult;

use crate::types::{Dimensions, RescaleParams, ValueRange};
use tracing::{debug, warn};

/// Bins with this many pixels or fewer are treated as noise
pub const NOISE_THRESHOLD: u64 = 2;

/// Largest jump between accepted raw values that is not a population split
pub const MAX_GAP: i64 = 1000;

/// Populations before a gap holding fewer than this percentage of the
/// counted bins are discarded as outliers
pub const OUTLIER_PERCENT: u64 = 10;

/// Heuristic constants of the range scan
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tuning {
    pub noise_threshold: u64,
    pub max_gap: i64,
    pub outlier_percent: u64,
    /// Subtracted from the level; zero keeps the computed center
    pub level_adjust: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            noise_threshold: NOISE_THRESHOLD,
            max_gap: MAX_GAP,
            outlier_percent: OUTLIER_PERCENT,
            level_adjust: 0.0,
        }
    }
}

impl Tuning {
    /// # Errors
    /// Returns [`WindowError::InvalidTuning`] for a negative gap, a percentage
    /// above 100, or a non-finite level adjustment.
    pub fn validate(&self) -> Result<(), WindowError> {
        if self.max_gap < 0 {
            return Err(WindowError::InvalidTuning(format!(
                "max gap must not be negative, got {}",
                self.max_gap
            )));
        }
        if self.outlier_percent > 100 {
            return Err(WindowError::InvalidTuning(format!(
                "outlier percentage must be at most 100, got {}",
                self.outlier_percent
            )));
        }
        if !self.level_adjust.is_finite() {
            return Err(WindowError::InvalidTuning("level adjustment must be finite".to_string()));
        }
        Ok(())
    }
}

/// Everything the computation needs besides the pixels
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoWindowConfig {
    pub rescale: RescaleParams,
    /// Sentinel value excluded from the histogram
    pub padding: Option<i32>,
    /// Optional inclusive restriction on raw values; disabled by default
    pub value_range: Option<ValueRange>,
    /// Overrides the signedness derived from the element type
    pub domain: Option<SampleDomain>,
    pub tuning: Tuning,
}

impl AutoWindowConfig {
    #[must_use]
    pub fn new(rescale: RescaleParams) -> Self {
        Self {
            rescale,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_padding(mut self, padding: Option<i32>) -> Self {
        self.padding = padding;
        self
    }

    #[must_use]
    pub fn with_value_range(mut self, value_range: Option<ValueRange>) -> Self {
        self.value_range = value_range;
        self
    }

    #[must_use]
    pub fn with_domain(mut self, domain: Option<SampleDomain>) -> Self {
        self.domain = domain;
        self
    }

    #[must_use]
    pub fn with_tuning(mut self, tuning: Tuning) -> Self {
        self.tuning = tuning;
        self
    }
}

/// Histogram statistics kept after the histogram itself is dropped
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistogramSummary {
    /// Pixels left after padding and range exclusion
    pub considered: u64,
    /// Bins that exceeded the noise threshold
    pub counted_bins: u32,
    pub min_sample: i64,
    pub max_sample: i64,
}

/// Result of a computation together with its intermediate values
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Analysis {
    pub window_level: WindowLevel,
    pub scan: ScanResult,
    pub histogram: HistogramSummary,
    pub domain: SampleDomain,
    /// No bin passed the noise threshold; the result only reflects the intercept
    pub degenerate: bool,
}

/// Compute the automatic window and level of a single-channel image.
///
/// # Errors
/// See [`analyze`].
pub fn compute_auto_window_level<T: Sample>(
    samples: &[T],
    dimensions: Dimensions,
    config: &AutoWindowConfig,
) -> Result<WindowLevel, WindowError> {
    analyze(samples, dimensions, config).map(|analysis| analysis.window_level)
}

/// Compute the automatic window and level, keeping the intermediate results.
///
/// # Errors
/// - [`WindowError::EmptyBuffer`] if the image has no pixels.
/// - [`WindowError::DimensionMismatch`] if `samples` does not hold exactly
///   `width * height` values.
/// - [`WindowError::SampleOutOfRange`] if a sample does not fit the 16-bit domain.
/// - [`WindowError::InvalidValueRange`] / [`WindowError::InvalidTuning`] for a
///   malformed configuration.
pub fn analyze<T: Sample>(
    samples: &[T],
    dimensions: Dimensions,
    config: &AutoWindowConfig,
) -> Result<Analysis, WindowError> {
    let expected = dimensions.pixel_count();
    if expected == 0 || samples.is_empty() {
        return Err(WindowError::EmptyBuffer);
    }
    if samples.len() != expected {
        return Err(WindowError::DimensionMismatch {
            expected,
            actual: samples.len(),
        });
    }
    if let Some(range) = config.value_range
        && range.min > range.max
    {
        return Err(WindowError::InvalidValueRange {
            min: range.min,
            max: range.max,
        });
    }
    config.tuning.validate()?;

    let domain = config.domain.unwrap_or_else(SampleDomain::of::<T>);
    let tuning = &config.tuning;

    let histogram = Histogram::build(
        samples,
        domain,
        config.padding,
        config.value_range,
        tuning.noise_threshold,
    )?;
    let (min_sample, max_sample) = histogram.sample_bounds();
    debug!(%domain, min = min_sample, max = max_sample, "sample bounds");
    debug!(
        considered = histogram.considered(),
        counted_bins = histogram.counted_bins(),
        "histogram built"
    );

    let scan = scan::scan(&histogram, domain, tuning);
    let summary = HistogramSummary {
        considered: histogram.considered(),
        counted_bins: histogram.counted_bins(),
        min_sample,
        max_sample,
    };
    drop(histogram);

    if scan.empty {
        warn!(
            considered = summary.considered,
            "no histogram bin exceeded the noise threshold, window/level is degenerate"
        );
    }

    let window_level = WindowLevel::from_scan(&scan, config.rescale, tuning.level_adjust);
    debug!(
        low = scan.low,
        high = scan.high,
        valid_bins = scan.valid_bin_count,
        window = window_level.window,
        level = window_level.level,
        "auto window/level"
    );

    Ok(Analysis {
        window_level,
        scan,
        histogram: summary,
        domain,
        degenerate: scan.empty,
    })
}
