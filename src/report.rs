use crate::dicom::GrayscaleImage;
use crate::window::Analysis;

/// Print the computed window/level, with metadata and scan details when verbose
pub fn print_report(image: &GrayscaleImage, analysis: &Analysis, padding: Option<i32>, verbose: bool) {
    if verbose {
        print_metadata(image, padding);
        print_analysis(analysis);
    }

    println!("{:20}: {}", "Window", analysis.window_level.window);
    println!("{:20}: {}", "Level", analysis.window_level.level);

    if analysis.degenerate {
        println!("{:20}: no value exceeded the noise threshold", "Note");
    }
}

fn print_metadata(image: &GrayscaleImage, padding: Option<i32>) {
    print_field("Modality", image.modality.as_ref());
    if let Some(sop_class) = &image.sop_class {
        println!("{:20}: {}", "SOP Class UID", sop_class);
    }
    println!("{:20}: {}", "Transfer Syntax", image.transfer_syntax);
    println!(
        "{:20}: {} [{}, {}]",
        "Dimensions", image.dimensions, image.photometric_interpretation, image.bit_depth
    );
    if image.number_of_frames > 1 {
        println!("{:20}: 1 of {}", "Frame", image.number_of_frames);
    }
    println!(
        "{:20}: {}",
        "Pixel Representation",
        if image.signed { "signed" } else { "unsigned" }
    );
    println!("{:20}: {}", "Rescale", image.rescale);
    match padding {
        Some(value) => println!("{:20}: {}", "Padding Value", value),
        None => println!("{:20}: none", "Padding Value"),
    }
}

fn print_analysis(analysis: &Analysis) {
    let hist = &analysis.histogram;
    let scan = &analysis.scan;
    println!("{:20}: {}", "Sample Domain", analysis.domain);
    println!("{:20}: {} to {}", "Sample Min/Max", hist.min_sample, hist.max_sample);
    println!("{:20}: {}", "Pixels Considered", hist.considered);
    println!("{:20}: {}", "Populated Values", hist.counted_bins);
    println!("{:20}: {} to {}", "Valid Range", scan.low, scan.high);
    println!("{:20}: {}", "Valid Values", scan.valid_bin_count);

    let (low, high) = analysis.window_level.bounds();
    println!("{:20}: {} to {}", "Window Bounds", low, high);
}

fn print_field(name: &str, value: Option<&String>) {
    if let Some(v) = value {
        println!("{name:20}: {v}");
    }
}
