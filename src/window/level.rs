//! Window/level derivation from the scanned range

use super::sample::SampleDomain;
use super::scan::ScanResult;
use crate::types::RescaleParams;
use std::fmt;

/// Display window (contrast range) and level (brightness center)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowLevel {
    pub window: f64,
    pub level: f64,
}

/// Inclusive clipping bounds derived from a window/level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Thresholds {
    pub low: f64,
    pub high: f64,
}

impl Thresholds {
    /// Limit both bounds to the values representable in `domain`.
    #[must_use]
    pub fn clamp_to(self, domain: SampleDomain) -> Self {
        Self {
            low: self.low.max(domain.min_value() as f64),
            high: self.high.min(domain.max_value() as f64),
        }
    }
}

impl WindowLevel {
    #[must_use]
    pub fn new(window: f64, level: f64) -> Self {
        Self { window, level }
    }

    /// Rescale the scanned bounds into physical units.
    ///
    /// A non-positive scaled window falls back to the unscaled raw range.
    #[must_use]
    pub fn from_scan(scan: &ScanResult, rescale: RescaleParams, level_adjust: f64) -> Self {
        let level = (scan.mean() as f64 * rescale.slope).trunc() + rescale.intercept - level_adjust;

        let range = (scan.high - scan.low) as f64;
        let mut window = (range * rescale.slope).trunc();
        if window <= 0.0 {
            window = range;
        }

        Self { window, level }
    }

    /// Clipping bounds for this window, clamped to `domain`.
    ///
    /// A window of exactly 1 means "leave the image alone" and yields `None`.
    #[must_use]
    pub fn thresholds(&self, domain: SampleDomain) -> Option<Thresholds> {
        self.unclamped_thresholds().map(|t| t.clamp_to(domain))
    }

    /// Clipping bounds in the units of the window, before any domain clamp.
    ///
    /// Callers that map the bounds back to stored values must clamp after
    /// the mapping, not before.
    #[must_use]
    pub fn unclamped_thresholds(&self) -> Option<Thresholds> {
        if self.window == 1.0 {
            return None;
        }

        let center = self.level - 0.5;
        let half_width = (self.window - 1.0) / 2.0;
        // +1 because the upper test is exclusive
        Some(Thresholds {
            low: center - half_width,
            high: center + half_width + 1.0,
        })
    }

    /// Lower and upper bounds of the window in physical units.
    #[must_use]
    pub fn bounds(&self) -> (f64, f64) {
        let half = self.window / 2.0;
        (self.level - half, self.level + half)
    }
}

impl fmt::Display for WindowLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "window={window}, level={level}", window = self.window, level = self.level)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn scan_result(low: i64, high: i64, sum: i64, valid_bin_count: u32) -> ScanResult {
        ScanResult {
            low,
            high,
            sum,
            valid_bin_count,
            empty: false,
        }
    }

    #[test]
    fn test_identity_rescale() {
        let wl = WindowLevel::from_scan(&scan_result(100, 300, 600, 3), RescaleParams::identity(), 0.0);
        assert_relative_eq!(wl.window, 200.0);
        assert_relative_eq!(wl.level, 200.0);
    }

    #[test]
    fn test_slope_and_intercept() {
        let rescale = RescaleParams::new(0.5, -1024.0);
        let wl = WindowLevel::from_scan(&scan_result(1000, 3001, 4001, 2), rescale, 0.0);
        // mean = 2000 (integer), 2000 * 0.5 = 1000
        assert_relative_eq!(wl.level, -24.0);
        // 2001 * 0.5 = 1000.5 truncated
        assert_relative_eq!(wl.window, 1000.0);
    }

    #[test]
    fn test_level_truncates_before_intercept() {
        let rescale = RescaleParams::new(0.25, 0.75);
        let wl = WindowLevel::from_scan(&scan_result(0, 20, 10, 1), rescale, 0.0);
        // 10 * 0.25 = 2.5 -> 2
        assert_relative_eq!(wl.level, 2.75);
        assert_relative_eq!(wl.window, 5.0);
    }

    #[test]
    fn test_flat_range_falls_back_to_zero() {
        let wl = WindowLevel::from_scan(&scan_result(50, 50, 50, 1), RescaleParams::new(2.0, 10.0), 0.0);
        assert_relative_eq!(wl.window, 0.0);
        assert_relative_eq!(wl.level, 110.0);
    }

    #[test]
    fn test_small_slope_falls_back_to_unscaled_range() {
        // 3 * 0.1 truncates to 0, so the raw range is used
        let wl = WindowLevel::from_scan(&scan_result(10, 13, 23, 2), RescaleParams::new(0.1, 0.0), 0.0);
        assert_relative_eq!(wl.window, 3.0);
    }

    #[test]
    fn test_level_adjust_is_subtracted() {
        let wl = WindowLevel::from_scan(&scan_result(0, 100, 100, 2), RescaleParams::identity(), 5.0);
        assert_relative_eq!(wl.level, 45.0);
    }

    #[test]
    fn test_thresholds() {
        let wl = WindowLevel::new(201.0, 100.0);
        let t = wl.thresholds(SampleDomain::Signed).unwrap();
        assert_relative_eq!(t.low, -0.5);
        assert_relative_eq!(t.high, 200.5);

        let t = wl.thresholds(SampleDomain::Unsigned).unwrap();
        assert_relative_eq!(t.low, 0.0);
    }

    #[test]
    fn test_thresholds_clamped_to_domain() {
        let wl = WindowLevel::new(60000.0, 0.0);
        let unsigned = wl.thresholds(SampleDomain::Unsigned).unwrap();
        assert_relative_eq!(unsigned.low, 0.0);
        assert_relative_eq!(unsigned.high, 30000.0);

        let signed = WindowLevel::new(80000.0, 0.0).thresholds(SampleDomain::Signed).unwrap();
        assert_relative_eq!(signed.low, -32768.0);
        assert_relative_eq!(signed.high, 32767.0);
    }

    #[test]
    fn test_unclamped_thresholds_keep_negative_bounds() {
        let t = WindowLevel::new(1001.0, 0.0).unclamped_thresholds().unwrap();
        assert_relative_eq!(t.low, -500.5);
        assert_relative_eq!(t.high, 500.5);

        let clamped = t.clamp_to(SampleDomain::Unsigned);
        assert_relative_eq!(clamped.low, 0.0);
        assert_relative_eq!(clamped.high, 500.5);
    }

    #[test]
    fn test_unit_window_has_no_thresholds() {
        assert!(WindowLevel::new(1.0, 10.0).thresholds(SampleDomain::Signed).is_none());
        assert!(WindowLevel::new(1.0, 10.0).unclamped_thresholds().is_none());
    }

    #[test]
    fn test_bounds() {
        let (low, high) = WindowLevel::new(400.0, 40.0).bounds();
        assert_relative_eq!(low, -160.0);
        assert_relative_eq!(high, 240.0);
    }
}
