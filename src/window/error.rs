use super::sample::SampleDomain;
use thiserror::Error;

/// Precondition violations detected before any histogram work is done
#[derive(Error, Debug, Clone, PartialEq)]
pub enum WindowError {
    #[error("Pixel buffer is empty")]
    EmptyBuffer,

    #[error("Pixel buffer holds {actual} samples but the dimensions require {expected}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("Sample {value} at index {index} does not fit the {domain} 16-bit domain")]
    SampleOutOfRange {
        index: usize,
        value: i64,
        domain: SampleDomain,
    },

    #[error("Invalid value range: min {min} is greater than max {max}")]
    InvalidValueRange { min: i64, max: i64 },

    #[error("Invalid tuning: {0}")]
    InvalidTuning(String),
}
