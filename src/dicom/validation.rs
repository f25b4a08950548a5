use super::PhotometricInterpretation;
use crate::types::{BitDepth, Dimensions};
use anyhow::{Result, bail};

#[inline]
pub fn validate_photometric_samples(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
) -> Result<()> {
    if !photometric_interpretation.is_grayscale() {
        bail!("Unsupported photometric interpretation {photometric_interpretation} (expected MONOCHROME1 or MONOCHROME2)");
    }

    if samples_per_pixel != 1 {
        bail!(
            "Inconsistent photometric interpretation {photometric_interpretation} with samples per pixel {samples_per_pixel}"
        );
    }

    Ok(())
}

#[inline]
pub fn validate_bit_depth(bit_depth: BitDepth) -> Result<()> {
    if !matches!(bit_depth.allocated, 8 | 16 | 32) {
        bail!(
            "Unsupported bits allocated: {} (expected 8, 16, or 32)",
            bit_depth.allocated
        );
    }

    if bit_depth.stored == 0 || bit_depth.stored > bit_depth.allocated {
        bail!("Invalid bit depth: {bit_depth}");
    }

    Ok(())
}

#[inline]
pub fn validate_dimensions(dimensions: Dimensions) -> Result<()> {
    if !dimensions.is_valid() {
        bail!("Image has no pixels: {dimensions}");
    }

    Ok(())
}

pub fn validate_metadata(
    photometric_interpretation: &PhotometricInterpretation,
    samples_per_pixel: u16,
    bit_depth: BitDepth,
    dimensions: Dimensions,
) -> Result<()> {
    validate_photometric_samples(photometric_interpretation, samples_per_pixel)?;
    validate_bit_depth(bit_depth)?;
    validate_dimensions(dimensions)?;
    Ok(())
}
