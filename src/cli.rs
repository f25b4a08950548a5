use crate::input::DEFAULT_EXTENSION;
use crate::types::ValueRange;
use crate::window::{MAX_GAP, NOISE_THRESHOLD, OUTLIER_PERCENT, Tuning};
use clap::Parser;
use std::path::PathBuf;

/// Automatic window/level for grayscale DICOM images
#[derive(Parser, Debug, Clone)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// DICOM file(s) or directories of DICOM files to analyze
    #[arg(value_name = "FILE")]
    pub files: Vec<PathBuf>,

    /// Also descend into subdirectories of directory inputs
    #[arg(short, long)]
    pub recursive: bool,

    /// File extension picked up from directory inputs
    #[arg(long, default_value = DEFAULT_EXTENSION, value_name = "EXT")]
    pub extension: String,

    /// Show metadata, intermediate values and debug logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Padding value to exclude, overriding the file's Pixel Padding Value
    #[arg(long, allow_negative_numbers = true, conflicts_with = "no_padding")]
    pub padding: Option<i32>,

    /// Ignore the file's Pixel Padding Value
    #[arg(long)]
    pub no_padding: bool,

    /// Lowest raw value to include in the histogram
    #[arg(long, allow_negative_numbers = true, requires = "max")]
    pub min: Option<i64>,

    /// Highest raw value to include in the histogram
    #[arg(long, allow_negative_numbers = true, requires = "min")]
    pub max: Option<i64>,

    /// Largest jump between populated values that is not a population split
    #[arg(long, default_value_t = MAX_GAP)]
    pub max_gap: i64,

    /// Bins with at most this many pixels are ignored as noise
    #[arg(long, default_value_t = NOISE_THRESHOLD)]
    pub noise_threshold: u64,

    /// Populations before a gap below this share of populated values are discarded
    #[arg(long, default_value_t = OUTLIER_PERCENT)]
    pub outlier_percent: u64,

    /// Render the windowed image in the terminal
    #[arg(long)]
    pub show: bool,

    /// Output width in terminal columns
    #[arg(short = 'W', long, requires = "show")]
    pub width: Option<u32>,

    /// Output height in terminal rows
    #[arg(short = 'H', long, requires = "show")]
    pub height: Option<u32>,

    /// Directory to write `<name>_awl.png` images to
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Write clipped 16-bit stored values instead of an 8-bit display image
    #[arg(long, requires = "output")]
    pub clipped: bool,

    /// Keep every clipped intensity level instead of halving them
    #[arg(long, requires = "clipped")]
    pub no_rebin: bool,
}

impl Args {
    #[must_use]
    pub fn tuning(&self) -> Tuning {
        Tuning {
            noise_threshold: self.noise_threshold,
            max_gap: self.max_gap,
            outlier_percent: self.outlier_percent,
            ..Tuning::default()
        }
    }

    #[must_use]
    pub fn value_range(&self) -> Option<ValueRange> {
        self.min.zip(self.max).map(|(min, max)| ValueRange::new(min, max))
    }

    /// Padding to use given the value found in the file
    #[must_use]
    pub fn padding_for(&self, file_padding: Option<i32>) -> Option<i32> {
        if self.no_padding {
            None
        } else {
            self.padding.or(file_padding)
        }
    }
}
