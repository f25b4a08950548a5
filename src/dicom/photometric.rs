//! Photometric interpretation of single-channel images

use std::fmt::Display;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PhotometricInterpretation {
    /// Minimum value is displayed as white
    Monochrome1,
    /// Minimum value is displayed as black
    Monochrome2,
    /// Anything else, kept for error messages
    Other(String),
}

impl FromStr for PhotometricInterpretation {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.trim().trim_end_matches('\0') {
            "MONOCHROME1" => Self::Monochrome1,
            "MONOCHROME2" => Self::Monochrome2,
            other => Self::Other(other.to_string()),
        })
    }
}

impl PhotometricInterpretation {
    #[inline(always)]
    #[must_use]
    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::Monochrome1 | Self::Monochrome2)
    }

    #[inline(always)]
    #[must_use]
    pub fn should_invert(&self) -> bool {
        matches!(self, Self::Monochrome1)
    }
}

impl Display for PhotometricInterpretation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Monochrome1 => write!(f, "MONOCHROME1"),
            Self::Monochrome2 => write!(f, "MONOCHROME2"),
            Self::Other(s) => write!(f, "{s}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        let parse = |s: &str| s.parse::<PhotometricInterpretation>();
        assert_eq!(parse("MONOCHROME1"), Ok(PhotometricInterpretation::Monochrome1));
        assert_eq!(parse(" MONOCHROME2 "), Ok(PhotometricInterpretation::Monochrome2));
        assert_eq!(parse("RGB"), Ok(PhotometricInterpretation::Other("RGB".to_string())));
    }

    #[test]
    fn test_flags() {
        assert!(PhotometricInterpretation::Monochrome1.should_invert());
        assert!(!PhotometricInterpretation::Monochrome2.should_invert());
        assert!(!PhotometricInterpretation::Other("RGB".to_string()).is_grayscale());
    }
}
