//! Grayscale image extracted from a DICOM file

use super::photometric::PhotometricInterpretation;
use crate::types::*;
use crate::window::{self, Analysis, AutoWindowConfig, SampleDomain, WindowError};

/// First-frame samples in their stored element type
#[derive(Clone, PartialEq, Eq)]
pub enum GrayscalePixels {
    U8(Vec<u8>),
    I8(Vec<i8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
}

impl std::fmt::Debug for GrayscalePixels {
    // Don't print all samples, just the length
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::U8(_) => "U8",
            Self::I8(_) => "I8",
            Self::U16(_) => "U16",
            Self::I16(_) => "I16",
        };
        write!(f, "GrayscalePixels::{name}(len={})", self.len())
    }
}

impl GrayscalePixels {
    #[must_use]
    pub fn len(&self) -> usize {
        match self {
            Self::U8(v) => v.len(),
            Self::I8(v) => v.len(),
            Self::U16(v) => v.len(),
            Self::I16(v) => v.len(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Domain implied by the element type
    #[must_use]
    pub fn domain(&self) -> SampleDomain {
        match self {
            Self::U8(_) => SampleDomain::of::<u8>(),
            Self::I8(_) => SampleDomain::of::<i8>(),
            Self::U16(_) => SampleDomain::of::<u16>(),
            Self::I16(_) => SampleDomain::of::<i16>(),
        }
    }

    /// Widen every sample to `i32`.
    #[must_use]
    pub fn to_i32(&self) -> Vec<i32> {
        match self {
            Self::U8(v) => v.iter().map(|&s| i32::from(s)).collect(),
            Self::I8(v) => v.iter().map(|&s| i32::from(s)).collect(),
            Self::U16(v) => v.iter().map(|&s| i32::from(s)).collect(),
            Self::I16(v) => v.iter().map(|&s| i32::from(s)).collect(),
        }
    }

    /// Run the auto window/level computation on these samples.
    ///
    /// # Errors
    /// See [`window::analyze`].
    pub fn analyze(
        &self,
        dimensions: Dimensions,
        config: &AutoWindowConfig,
    ) -> Result<Analysis, WindowError> {
        match self {
            Self::U8(v) => window::analyze(v.as_slice(), dimensions, config),
            Self::I8(v) => window::analyze(v.as_slice(), dimensions, config),
            Self::U16(v) => window::analyze(v.as_slice(), dimensions, config),
            Self::I16(v) => window::analyze(v.as_slice(), dimensions, config),
        }
    }
}

/// Single-channel image and the metadata the window/level needs
#[derive(Debug, Clone)]
pub struct GrayscaleImage {
    pub dimensions: Dimensions,
    pub bit_depth: BitDepth,
    pub signed: bool,
    pub rescale: RescaleParams,
    pub padding: Option<i32>,
    pub photometric_interpretation: PhotometricInterpretation,
    pub pixel_aspect_ratio: Option<PixelAspectRatio>,
    pub number_of_frames: u32,
    pub pixels: GrayscalePixels,

    // Descriptive metadata for the report
    pub modality: Option<String>,
    pub sop_class: Option<SOPClass>,
    pub transfer_syntax: TransferSyntax,
}

impl GrayscaleImage {
    /// Configuration derived from the file's own rescale and padding tags
    #[must_use]
    pub fn window_config(&self) -> AutoWindowConfig {
        AutoWindowConfig::new(self.rescale).with_padding(self.padding)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_and_widening() {
        let pixels = GrayscalePixels::I16(vec![-3, 0, 7]);
        assert_eq!(pixels.domain(), SampleDomain::Signed);
        assert_eq!(pixels.to_i32(), vec![-3, 0, 7]);

        let pixels = GrayscalePixels::U8(vec![255]);
        assert_eq!(pixels.domain(), SampleDomain::Unsigned);
        assert_eq!(pixels.to_i32(), vec![255]);
    }

    #[test]
    fn test_debug_hides_samples() {
        let pixels = GrayscalePixels::U16(vec![1, 2, 3]);
        assert_eq!(format!("{pixels:?}"), "GrayscalePixels::U16(len=3)");
    }

    #[test]
    fn test_analyze_dispatch() {
        let pixels = GrayscalePixels::I8(vec![-10, -10, -10, 5, 5, 5]);
        let config = AutoWindowConfig::new(RescaleParams::identity());
        let analysis = pixels.analyze(Dimensions::new(3, 2), &config).unwrap();
        assert_eq!(analysis.domain, SampleDomain::Signed);
        assert_eq!((analysis.scan.low, analysis.scan.high), (-10, 5));
    }
}
