mod normalization;

pub use normalization::window_to_u8;

use crate::dicom::GrayscaleImage;
use crate::types::RescaleParams;
use crate::window::apply::{clip_to_window, offset_to_zero, rebin_to_half};
use crate::window::{Thresholds, WindowLevel};
use anyhow::{Context, Result, bail};
use image::{DynamicImage, GrayImage, ImageBuffer, Luma};
use normalization::find_min_max;
use std::path::{Path, PathBuf};

/// Render the image to 8-bit gray through the given window/level
///
/// The window/level is in rescaled units, so every sample is rescaled before
/// the linear VOI transfer. MONOCHROME1 images are inverted.
pub fn render_windowed(image: &GrayscaleImage, window_level: WindowLevel) -> Result<DynamicImage> {
    let rescale = image.rescale;
    let should_invert = image.photometric_interpretation.should_invert();

    let gray_pixels: Vec<u8> = image
        .pixels
        .to_i32()
        .into_iter()
        .map(|raw| {
            let value = rescale.apply(i64::from(raw));
            let gray = window_to_u8(value, window_level.level, window_level.window);
            if should_invert { u8::MAX - gray } else { gray }
        })
        .collect();

    let gray_image: GrayImage = ImageBuffer::from_raw(
        image.dimensions.width,
        image.dimensions.height,
        gray_pixels,
    )
    .context("Failed to create grayscale image buffer")?;

    Ok(DynamicImage::ImageLuma8(gray_image))
}

/// Clip the raw samples to the window's thresholds and shift them to start at 0
///
/// With `rebin`, the clipped samples are requantized to half their intensity
/// levels before the shift. The result is a 16-bit image holding stored
/// values, not display levels.
pub fn render_clipped(image: &GrayscaleImage, window_level: WindowLevel, rebin: bool) -> Result<DynamicImage> {
    let samples = image.pixels.to_i32();
    let domain = image.pixels.domain();

    let clipped = match window_level.unclamped_thresholds() {
        Some(thresholds) => {
            let raw = raw_thresholds(thresholds, image.rescale)?.clamp_to(domain);
            tracing::debug!(low = raw.low, high = raw.high, "stored value thresholds");
            let clipped = clip_to_window(&samples, raw);
            if rebin { rebin_to_half(&clipped) } else { clipped }
        }
        None => samples,
    };
    let shifted = offset_to_zero(&clipped);

    if let Some((min, max)) = find_min_max(&shifted) {
        tracing::debug!(min, max, "clipped sample range");
    }

    let gray_pixels: Vec<u16> = shifted
        .into_iter()
        .map(|v| u16::try_from(v).unwrap_or(u16::MAX))
        .collect();

    let gray_image: ImageBuffer<Luma<u16>, Vec<u16>> = ImageBuffer::from_raw(
        image.dimensions.width,
        image.dimensions.height,
        gray_pixels,
    )
    .context("Failed to create 16-bit grayscale image buffer")?;

    Ok(DynamicImage::ImageLuma16(gray_image))
}

/// Map thresholds in rescaled units back to stored values
fn raw_thresholds(thresholds: Thresholds, rescale: RescaleParams) -> Result<Thresholds> {
    if rescale.slope == 0.0 || !rescale.slope.is_finite() {
        bail!("Cannot invert rescale slope {}", rescale.slope);
    }

    let a = (thresholds.low - rescale.intercept) / rescale.slope;
    let b = (thresholds.high - rescale.intercept) / rescale.slope;
    Ok(Thresholds {
        low: a.min(b),
        high: a.max(b),
    })
}

/// `<dir>/<stem>_awl.png` for an input file
#[must_use]
pub fn output_path(dir: &Path, input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "image".into(), |s| s.to_string_lossy());
    dir.join(format!("{stem}_awl.png"))
}

/// Write the image as PNG
pub fn save_png(image: &DynamicImage, path: &Path) -> Result<()> {
    image
        .save_with_format(path, image::ImageFormat::Png)
        .with_context(|| format!("Failed to write {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dicom::{GrayscalePixels, PhotometricInterpretation};
    use crate::types::{BitDepth, Dimensions, TransferSyntax};

    fn grayscale(pixels: GrayscalePixels, width: u32, rescale: RescaleParams) -> GrayscaleImage {
        let height = u32::try_from(pixels.len()).unwrap() / width;
        GrayscaleImage {
            dimensions: Dimensions::new(width, height),
            bit_depth: BitDepth::new(16, 16),
            signed: pixels.domain().is_signed(),
            rescale,
            padding: None,
            photometric_interpretation: PhotometricInterpretation::Monochrome2,
            pixel_aspect_ratio: None,
            number_of_frames: 1,
            pixels,
            modality: None,
            sop_class: None,
            transfer_syntax: TransferSyntax::new("1.2.840.10008.1.2.1".to_string(), String::new()),
        }
    }

    #[test]
    fn test_render_windowed() {
        let image = grayscale(GrayscalePixels::U16(vec![0, 100, 200, 1000]), 2, RescaleParams::identity());
        let rendered = render_windowed(&image, WindowLevel::new(200.0, 100.0)).unwrap();
        let gray = rendered.as_luma8().unwrap();
        assert_eq!(gray.dimensions(), (2, 2));
        assert_eq!(gray.get_pixel(0, 0)[0], 0);
        assert_eq!(gray.get_pixel(1, 0)[0], 128);
        assert_eq!(gray.get_pixel(0, 1)[0], 255);
        assert_eq!(gray.get_pixel(1, 1)[0], 255);
    }

    #[test]
    fn test_render_windowed_applies_rescale_and_inversion() {
        let mut image = grayscale(GrayscalePixels::I16(vec![-1000, 1124]), 2, RescaleParams::new(1.0, -1024.0));
        image.photometric_interpretation = PhotometricInterpretation::Monochrome1;
        let rendered = render_windowed(&image, WindowLevel::new(400.0, 0.0)).unwrap();
        let gray = rendered.as_luma8().unwrap();
        // -2024 is below the window, 100 is inside it
        assert_eq!(gray.get_pixel(0, 0)[0], 255);
        assert!(gray.get_pixel(1, 0)[0] < 128);
    }

    #[test]
    fn test_render_clipped() {
        let image = grayscale(GrayscalePixels::I16(vec![-500, 0, 150, 900]), 4, RescaleParams::identity());
        let rendered = render_clipped(&image, WindowLevel::new(201.0, 100.0), false).unwrap();
        let gray = rendered.as_luma16().unwrap();
        // Clipped to [0, 200], then offset by 0
        let values: Vec<u16> = gray.pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 0, 150, 200]);
    }

    #[test]
    fn test_render_clipped_in_rescaled_units() {
        let image = grayscale(GrayscalePixels::U16(vec![0, 1100, 1200, 5000]), 4, RescaleParams::new(1.0, -1024.0));
        // Thresholds [99.5, 300.5] in rescaled units are [1123.5, 1324.5] raw
        let rendered = render_clipped(&image, WindowLevel::new(201.0, 200.0), false).unwrap();
        let values: Vec<u16> = rendered.as_luma16().unwrap().pixels().map(|p| p[0]).collect();
        assert_eq!(values, vec![0, 0, 77, 201]);
    }

    fn clipped_values(image: &GrayscaleImage, window_level: WindowLevel, rebin: bool) -> Vec<u16> {
        let rendered = render_clipped(image, window_level, rebin).unwrap();
        rendered.as_luma16().unwrap().pixels().map(|p| p[0]).collect()
    }

    #[test]
    fn test_render_clipped_keeps_negative_rescaled_bounds() {
        // Unsigned CT: the window [-500.5, 500.5] HU is [523.5, 1524.5] stored
        let image = grayscale(GrayscalePixels::U16(vec![0, 524, 1024, 1524]), 4, RescaleParams::new(1.0, -1024.0));
        let window_level = WindowLevel::new(1001.0, 0.0);
        assert_eq!(clipped_values(&image, window_level, false), vec![0, 1, 501, 1001]);
        // 1002 levels onto 501 bins
        assert_eq!(clipped_values(&image, window_level, true), vec![0, 0, 250, 501]);
    }

    #[test]
    fn test_render_clipped_clamps_stored_bounds_to_domain() {
        // Window reaches below stored 0 once mapped back
        let image = grayscale(GrayscalePixels::U16(vec![0, 100, 3000]), 3, RescaleParams::new(1.0, -1024.0));
        let values = clipped_values(&image, WindowLevel::new(2001.0, -1024.0), false);
        assert_eq!(values, vec![0, 100, 1000]);
    }

    #[test]
    fn test_render_clipped_rebins_before_offset() {
        let image = grayscale(GrayscalePixels::I16(vec![-500, 0, 150, 900]), 4, RescaleParams::identity());
        assert_eq!(clipped_values(&image, WindowLevel::new(201.0, 100.0), true), vec![0, 0, 75, 100]);
    }

    #[test]
    fn test_zero_slope_cannot_be_clipped() {
        let image = grayscale(GrayscalePixels::U16(vec![1, 2]), 2, RescaleParams::new(0.0, 0.0));
        assert!(render_clipped(&image, WindowLevel::new(10.0, 5.0), true).is_err());
    }

    #[test]
    fn test_output_path() {
        let path = output_path(Path::new("/tmp/out"), Path::new("/data/ct/slice01.dcm"));
        assert_eq!(path, PathBuf::from("/tmp/out/slice01_awl.png"));
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let source = grayscale(GrayscalePixels::U8(vec![0, 64, 128, 255]), 2, RescaleParams::identity());
        let rendered = render_windowed(&source, WindowLevel::new(256.0, 128.0)).unwrap();
        let path = dir.path().join("out.png");
        save_png(&rendered, &path).unwrap();

        let reloaded = image::open(&path).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (2, 2));
    }
}
