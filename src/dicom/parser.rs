use super::PhotometricInterpretation;
use crate::types::{BitDepth, Dimensions, PixelAspectRatio, RescaleParams, SOPClass, TransferSyntax};
use anyhow::{Context, Result};
use dicom::core::dictionary::UidDictionary;
use dicom::dictionary_std::sop_class;
use dicom::dictionary_std::tags;
use dicom::encoding::TransferSyntaxIndex;
use dicom::object::InMemDicomObject;
use dicom::transfer_syntax::TransferSyntaxRegistry;
use std::str::FromStr;

/// Partial metadata for error message context
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
}

impl ErrorContext {
    pub fn format_error(&self, tag_name: &str) -> String {
        let mut parts = Vec::new();

        if let Some(modality) = &self.modality {
            parts.push(format!("Modality: {modality}"));
        }

        if let Some(sc) = &self.sop_class {
            parts.push(format!("SOP Class: {sc}"));
        }

        if parts.is_empty() {
            format!("Missing or invalid {tag_name} tag")
        } else {
            format!(
                "Missing or invalid {tag_name} tag - this may be a non-image DICOM file ({})",
                parts.join(", ")
            )
        }
    }
}

impl From<&InMemDicomObject> for ErrorContext {
    fn from(obj: &InMemDicomObject) -> Self {
        ErrorContext {
            modality: extract_modality(obj),
            sop_class: extract_sop_class(obj),
        }
    }
}

pub fn extract_dimensions(obj: &InMemDicomObject, error_context: &ErrorContext) -> Result<Dimensions> {
    let rows = obj
        .get(tags::ROWS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Rows"))?;

    let cols = obj
        .get(tags::COLUMNS)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Columns"))?;

    Ok(Dimensions::new(u32::from(cols), u32::from(rows)))
}

pub fn extract_rescale_params(obj: &InMemDicomObject) -> RescaleParams {
    // Optional; absent for most non-CT/PET modalities
    let slope = obj
        .get(tags::RESCALE_SLOPE)
        .and_then(|e| e.to_float64().ok())
        .unwrap_or(1.0);

    let intercept = obj
        .get(tags::RESCALE_INTERCEPT)
        .and_then(|e| e.to_float64().ok())
        .unwrap_or(0.0);

    RescaleParams::new(slope, intercept)
}

pub fn extract_pixel_aspect_ratio(obj: &InMemDicomObject) -> Option<PixelAspectRatio> {
    obj.get(tags::PIXEL_ASPECT_RATIO)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|s| {
            let (vertical, horizontal) = s.split_once('\\')?;
            let vertical = vertical.trim().parse::<f64>().ok()?;
            let horizontal = horizontal.trim().parse::<f64>().ok()?;
            Some(PixelAspectRatio::new(vertical, horizontal))
        })
}

#[inline]
pub fn extract_number_of_frames(obj: &InMemDicomObject) -> u32 {
    obj.get(tags::NUMBER_OF_FRAMES)
        .and_then(|e| e.to_int::<u32>().ok())
        .unwrap_or(1)
}

#[inline]
pub fn extract_samples_per_pixel(obj: &InMemDicomObject) -> u16 {
    obj.get(tags::SAMPLES_PER_PIXEL)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(1)
}

pub fn extract_bit_depth(obj: &InMemDicomObject, error_context: &ErrorContext) -> Result<BitDepth> {
    let allocated = obj
        .get(tags::BITS_ALLOCATED)
        .and_then(|e| e.to_int::<u16>().ok())
        .with_context(|| error_context.format_error("Bits Allocated"))?;

    // Bits Stored defaults to Bits Allocated when absent
    let stored = obj
        .get(tags::BITS_STORED)
        .and_then(|e| e.to_int::<u16>().ok())
        .unwrap_or(allocated);

    Ok(BitDepth::new(allocated, stored))
}

/// Whether samples are two's complement (Pixel Representation 1)
#[inline]
pub fn extract_is_signed(obj: &InMemDicomObject) -> bool {
    obj.get(tags::PIXEL_REPRESENTATION)
        .and_then(|e| e.to_int::<u16>().ok())
        .is_some_and(|representation| representation == 1)
}

/// Pixel Padding Value, as stored (US or SS)
#[inline]
pub fn extract_pixel_padding_value(obj: &InMemDicomObject) -> Option<i32> {
    obj.get(tags::PIXEL_PADDING_VALUE)
        .and_then(|e| e.to_int::<i32>().ok())
}

pub fn extract_photometric_interpretation(obj: &InMemDicomObject) -> PhotometricInterpretation {
    obj.get(tags::PHOTOMETRIC_INTERPRETATION)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|s| PhotometricInterpretation::from_str(&s).ok())
        .unwrap_or(PhotometricInterpretation::Monochrome2)
}

pub fn extract_modality(obj: &InMemDicomObject) -> Option<String> {
    obj.get(tags::MODALITY)
        .and_then(|e| e.value().to_str().ok())
        .map(|s| s.trim().to_string())
}

pub fn extract_sop_class(obj: &InMemDicomObject) -> Option<SOPClass> {
    obj.get(tags::SOP_CLASS_UID)
        .and_then(|e| e.value().to_str().ok())
        .and_then(|uid| {
            let uid = uid.trim_end_matches('\0');
            sop_class::StandardSopClassDictionary
                .by_uid(uid)
                .map(|entry| SOPClass::new(uid.to_string(), entry.name.to_string()))
        })
}

pub fn extract_transfer_syntax(uid: &str) -> TransferSyntax {
    let uid = uid.trim_end_matches('\0').to_string();
    let name = TransferSyntaxRegistry
        .get(&uid)
        .map_or_else(|| "Unknown".to_string(), |ts| ts.name().to_string());

    TransferSyntax::new(uid, name)
}
