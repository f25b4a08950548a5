use crate::window::WindowError;
use std::fmt;

/// Per-file failure, tagged with the stage that produced it
#[derive(Debug)]
pub enum ProcessError {
    /// File could not be opened or parsed as DICOM
    NotADicomFile(String),

    /// Valid DICOM file but no usable grayscale image could be extracted
    ExtractionFailed(String),

    /// Samples violated a precondition of the window/level computation
    ComputationFailed(WindowError),

    /// Window/level computed, but rendering or writing the image failed
    OutputFailed(String),
}

impl fmt::Display for ProcessError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessError::NotADicomFile(msg) => write!(f, "{msg}"),
            ProcessError::ExtractionFailed(msg) => write!(f, "{msg}"),
            ProcessError::ComputationFailed(error) => write!(f, "{error}"),
            ProcessError::OutputFailed(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ProcessError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProcessError::ComputationFailed(error) => Some(error),
            _ => None,
        }
    }
}

impl From<WindowError> for ProcessError {
    fn from(error: WindowError) -> Self {
        ProcessError::ComputationFailed(error)
    }
}
