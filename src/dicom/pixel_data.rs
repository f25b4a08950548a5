//! DICOM pixel data extraction
//!
//! This module pulls the first frame out of the Pixel Data element, handling
//! compression and endianness, and turns its bytes into typed samples.

use super::DicomFile;
use super::metadata::GrayscalePixels;
use crate::types::{BitDepth, TransferSyntax};
use crate::window::apply::cast_to_u16;
use anyhow::{Context, Result, bail};
use dicom::dictionary_std::tags;
use dicom::object::InMemDicomObject;
use dicom::pixeldata::PixelDecoder;

/// Extract pixel data bytes in little-endian order
pub fn extract_pixel_data(
    obj: &DicomFile,
    transfer_syntax: &TransferSyntax,
    bit_depth: BitDepth,
) -> Result<Vec<u8>> {
    if transfer_syntax.is_compressed() {
        extract_decoded_pixel_data(obj)
    } else if transfer_syntax.is_big_endian() && bit_depth.allocated > 8 {
        extract_big_endian(obj, bit_depth.bytes_per_sample())
    } else {
        extract_raw_pixel_data(obj)
    }
}

/// Extract raw native pixel data
pub fn extract_raw_pixel_data(obj: &InMemDicomObject) -> Result<Vec<u8>> {
    let pixel_data_obj = obj.get(tags::PIXEL_DATA).context("Missing pixel data")?;

    Ok(pixel_data_obj
        .to_bytes()
        .context("Failed to get raw pixel data bytes")?
        .to_vec())
}

/// Extract big-endian pixel data and reorder each sample to little-endian
fn extract_big_endian(obj: &InMemDicomObject, bytes_per_sample: usize) -> Result<Vec<u8>> {
    let raw_bytes = extract_raw_pixel_data(obj)?;

    if !raw_bytes.len().is_multiple_of(bytes_per_sample) {
        bail!("Invalid {}-bit pixel data length", bytes_per_sample * 8);
    }

    Ok(raw_bytes
        .chunks_exact(bytes_per_sample)
        .flat_map(|chunk| chunk.iter().rev().copied())
        .collect())
}

/// Extract decoded pixel data (handles compression)
fn extract_decoded_pixel_data(obj: &DicomFile) -> Result<Vec<u8>> {
    let decoded_pixel_data = obj
        .decode_pixel_data()
        .context("Failed to decode pixel data")?;

    Ok(decoded_pixel_data.data().to_vec())
}

/// Interpret the first `count` samples of little-endian `bytes`
///
/// 32-bit samples are brought into the unsigned 16-bit domain by clamping.
pub fn decode_samples(
    bytes: &[u8],
    bit_depth: BitDepth,
    signed: bool,
    count: usize,
) -> Result<GrayscalePixels> {
    let bytes_per_sample = bit_depth.bytes_per_sample();
    let needed = count * bytes_per_sample;
    if bytes.len() < needed {
        bail!(
            "Pixel data too short: {} bytes for {count} samples of {} bits",
            bytes.len(),
            bit_depth.allocated
        );
    }
    let frame = &bytes[..needed];

    let pixels = match (bit_depth.allocated, signed) {
        (8, false) => GrayscalePixels::U8(frame.to_vec()),
        (8, true) => GrayscalePixels::I8(
            frame
                .iter()
                .map(|&b| sign_extend_i8(i8::from_le_bytes([b]), bit_depth.stored))
                .collect(),
        ),
        (16, false) => GrayscalePixels::U16(
            frame
                .chunks_exact(2)
                .map(|chunk| u16::from_le_bytes([chunk[0], chunk[1]]))
                .collect(),
        ),
        (16, true) => GrayscalePixels::I16(
            frame
                .chunks_exact(2)
                .map(|chunk| sign_extend_i16(i16::from_le_bytes([chunk[0], chunk[1]]), bit_depth.stored))
                .collect(),
        ),
        (32, false) => GrayscalePixels::U16(
            frame
                .chunks_exact(4)
                .map(|chunk| {
                    let value = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    cast_to_u16(f64::from(value))
                })
                .collect(),
        ),
        (32, true) => GrayscalePixels::U16(
            frame
                .chunks_exact(4)
                .map(|chunk| {
                    let value = i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
                    cast_to_u16(f64::from(value))
                })
                .collect(),
        ),
        (other, _) => bail!("Unsupported bits allocated for grayscale: {other}"),
    };

    Ok(pixels)
}

/// Extend the sign bit of a `stored`-bit value held in a 16-bit container.
#[inline(always)]
fn sign_extend_i16(value: i16, stored: u16) -> i16 {
    if stored == 0 || stored >= 16 {
        return value;
    }
    let shift = 16 - u32::from(stored);
    (value << shift) >> shift
}

#[inline(always)]
fn sign_extend_i8(value: i8, stored: u16) -> i8 {
    if stored == 0 || stored >= 8 {
        return value;
    }
    let shift = 8 - u32::from(stored);
    (value << shift) >> shift
}
