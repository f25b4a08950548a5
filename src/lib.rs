pub mod cli;
pub mod dicom;
pub mod display;
pub mod image;
pub mod input;
pub mod report;
pub mod types;
pub mod window;

// Re-export commonly used items
pub use types::{Dimensions, RescaleParams, ValueRange};
pub use window::{
    Analysis, AutoWindowConfig, SampleDomain, Tuning, WindowError, WindowLevel, analyze,
    compute_auto_window_level,
};
