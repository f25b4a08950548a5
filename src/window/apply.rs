//! Post-processing of raw samples with a computed window

use super::level::Thresholds;

/// Clamp every sample into the (integer-truncated) threshold bounds.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn clip_to_window(samples: &[i32], thresholds: Thresholds) -> Vec<i32> {
    let low = thresholds.low as i32;
    let high = (thresholds.high as i32).max(low);
    samples.iter().map(|&v| v.clamp(low, high)).collect()
}

/// Shift samples so the smallest one becomes zero.
#[must_use]
pub fn offset_to_zero(samples: &[i32]) -> Vec<i32> {
    let Some(&min) = samples.iter().min() else {
        return Vec::new();
    };
    samples.iter().map(|&v| v - min).collect()
}

/// Requantize samples to half as many intensity levels, relative to the minimum.
///
/// `n` distinct levels spanning `[min, max]` are mapped onto `(n + 1) / 2`
/// bins and truncated. The result starts at 0. A flat input maps to all zeros.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn rebin_to_half(samples: &[i32]) -> Vec<i32> {
    let Some((min, max)) = samples
        .iter()
        .fold(None, |acc: Option<(i32, i32)>, &v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
    else {
        return Vec::new();
    };

    let range = f64::from(max) - f64::from(min);
    if range == 0.0 {
        return vec![0; samples.len()];
    }

    let bins = (range + 1.0) / 2.0;
    samples
        .iter()
        .map(|&v| ((f64::from(v) - f64::from(min)) * bins / range) as i32)
        .collect()
}

/// Bring a wide sample into the unsigned 16-bit domain.
///
/// Negative values clamp to 0, values above 65535 clamp to 65535, the rest
/// round half up.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn cast_to_u16(value: f64) -> u16 {
    let clamped = value.clamp(0.0, f64::from(u16::MAX));
    (clamped + 0.5).min(f64::from(u16::MAX)) as u16
}
