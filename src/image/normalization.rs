/// Linear VOI transfer from a rescaled value to an 8-bit gray level.
///
/// `center` and `width` follow the window center/width convention: values at
/// or below `center - 0.5 - (width - 1) / 2` map to 0, values above
/// `center - 0.5 + (width - 1) / 2` map to 255.
#[inline]
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn window_to_u8(value: f64, center: f64, width: f64) -> u8 {
    let center = center - 0.5;
    let width = width.max(1.0) - 1.0;
    let half_width = width / 2.0;

    if value <= center - half_width {
        u8::MIN
    } else if value > center + half_width {
        u8::MAX
    } else {
        // Saturating cast guards against rounding just outside [0, 255]
        (((value - center) / width + 0.5) * 255.0) as u8
    }
}

#[inline]
#[must_use]
pub fn find_min_max(values: &[i32]) -> Option<(i32, i32)> {
    values.iter().fold(None, |acc, &val| match acc {
        None => Some((val, val)),
        Some((min, max)) => Some((min.min(val), max.max(val))),
    })
}
