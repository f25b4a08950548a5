//! DICOM file parsing and grayscale image extraction
//!
//! This module opens DICOM files and extracts the first frame of a
//! single-channel image together with the rescale and padding tags the
//! window/level computation needs.

mod error;
mod metadata;
mod parser;
mod photometric;
mod pixel_data;
mod validation;

// Re-export public API
pub use error::ProcessError;
pub use metadata::{GrayscaleImage, GrayscalePixels};
pub use photometric::PhotometricInterpretation;

use anyhow::{Context, Result};
use dicom::object::{FileDicomObject, InMemDicomObject, StandardDataDictionary, open_file};
use crate::types::TransferSyntax;
use parser::ErrorContext;
use std::path::Path;

pub type DicomFile = FileDicomObject<InMemDicomObject<StandardDataDictionary>>;

/// Open and parse a DICOM file
pub fn open_dicom_file(file_path: &Path) -> Result<DicomFile> {
    open_file(file_path)
        .with_context(|| format!("Failed to open DICOM file: {}", file_path.display()))
}

/// Extract the first grayscale frame and its metadata from a DICOM file
pub fn extract_grayscale_image(obj: &DicomFile) -> Result<GrayscaleImage> {
    let transfer_syntax = parser::extract_transfer_syntax(obj.meta().transfer_syntax());
    let error_context = ErrorContext::from(&**obj);
    let bit_depth = parser::extract_bit_depth(obj, &error_context)?;

    let pixel_data = pixel_data::extract_pixel_data(obj, &transfer_syntax, bit_depth)?;
    grayscale_from_parts(obj, transfer_syntax, &pixel_data)
}

/// Build a [`GrayscaleImage`] from a data set and its little-endian pixel bytes
pub fn grayscale_from_parts(
    obj: &InMemDicomObject,
    transfer_syntax: TransferSyntax,
    pixel_data: &[u8],
) -> Result<GrayscaleImage> {
    let error_context = ErrorContext::from(obj);

    let dimensions = parser::extract_dimensions(obj, &error_context)?;
    let bit_depth = parser::extract_bit_depth(obj, &error_context)?;
    let samples_per_pixel = parser::extract_samples_per_pixel(obj);
    let photometric_interpretation = parser::extract_photometric_interpretation(obj);

    validation::validate_metadata(
        &photometric_interpretation,
        samples_per_pixel,
        bit_depth,
        dimensions,
    )?;

    let signed = parser::extract_is_signed(obj);
    let pixels = pixel_data::decode_samples(pixel_data, bit_depth, signed, dimensions.pixel_count())
        .context("Failed to decode pixel data")?;

    Ok(GrayscaleImage {
        dimensions,
        bit_depth,
        signed,
        rescale: parser::extract_rescale_params(obj),
        padding: parser::extract_pixel_padding_value(obj),
        photometric_interpretation,
        pixel_aspect_ratio: parser::extract_pixel_aspect_ratio(obj),
        number_of_frames: parser::extract_number_of_frames(obj),
        pixels,
        modality: error_context.modality,
        sop_class: error_context.sop_class,
        transfer_syntax,
    })
}
