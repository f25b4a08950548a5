use clap::{CommandFactory, Parser};
use dcmawl::cli::Args;
use dcmawl::dicom::{self, ProcessError};
use dcmawl::display;
use dcmawl::image;
use dcmawl::input;
use dcmawl::report;
use std::path::Path;
use tracing_subscriber::EnvFilter;

fn main() {
    let args = Args::parse();

    if args.files.is_empty() {
        let _ = Args::command().print_help();
        println!();
        return;
    }

    init_tracing(args.verbose);

    let files = match input::expand_inputs(&args.files, args.recursive, &args.extension) {
        Ok(files) => files,
        Err(e) => {
            println!("Error: {e:#}");
            std::process::exit(1);
        }
    };
    if files.is_empty() {
        println!("Error: no .{} files found", args.extension.trim_start_matches('.'));
        std::process::exit(1);
    }

    let multiple_files = files.len() > 1;
    let mut any_failed = false;

    for (idx, file_path) in files.iter().enumerate() {
        if multiple_files {
            println!("{}", file_path.display());
        }

        if let Err(e) = process_file(file_path, &args) {
            println!("Error: {e}");
            any_failed = true;
        }

        if multiple_files && idx < files.len() - 1 {
            println!();
        }
    }

    if any_failed {
        std::process::exit(1);
    }
}

/// Log to stderr; `RUST_LOG` wins over the verbosity flag
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Process a single DICOM file
fn process_file(file_path: &Path, args: &Args) -> Result<(), ProcessError> {
    // Stage 1: Open DICOM file
    let obj = dicom::open_dicom_file(file_path)
        .map_err(|e| ProcessError::NotADicomFile(format!("{e:#}")))?;

    // Stage 2: Extract the first grayscale frame
    let gray = dicom::extract_grayscale_image(&obj)
        .map_err(|e| ProcessError::ExtractionFailed(format!("{e:#}")))?;

    // Stage 3: Compute the auto window/level
    let padding = args.padding_for(gray.padding);
    let config = gray
        .window_config()
        .with_padding(padding)
        .with_value_range(args.value_range())
        .with_tuning(args.tuning());
    let analysis = gray.pixels.analyze(gray.dimensions, &config)?;

    // Stage 4: Report
    report::print_report(&gray, &analysis, padding, args.verbose);

    // Stage 5: Optional rendering
    if args.show {
        let rendered = image::render_windowed(&gray, analysis.window_level)
            .map_err(|e| ProcessError::OutputFailed(format!("{e:#}")))?;
        display::print_image(&rendered, gray.pixel_aspect_ratio, args)
            .map_err(|e| ProcessError::OutputFailed(format!("{e:#}")))?;
    }

    if let Some(dir) = &args.output {
        let rendered = if args.clipped {
            image::render_clipped(&gray, analysis.window_level, !args.no_rebin)
        } else {
            image::render_windowed(&gray, analysis.window_level)
        }
        .map_err(|e| ProcessError::OutputFailed(format!("{e:#}")))?;

        let path = image::output_path(dir, file_path);
        image::save_png(&rendered, &path).map_err(|e| ProcessError::OutputFailed(format!("{e:#}")))?;
        tracing::info!(path = %path.display(), "wrote windowed image");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use std::io::Write;

    #[test]
    fn test_missing_file_returns_notadicomfile_error() {
        let args = Args::try_parse_from(["dcmawl", "missing.dcm"]).unwrap();
        let result = process_file(Path::new("missing.dcm"), &args);
        assert_matches!(result, Err(ProcessError::NotADicomFile(_)));
    }

    fn write_ct_file(path: &Path) {
        use ::dicom::core::{DataElement, PrimitiveValue, VR};
        use ::dicom::dictionary_std::tags;
        use ::dicom::object::{FileMetaTableBuilder, InMemDicomObject};

        // Background of -100 and a body of 400, four pixels each
        let samples: [i16; 8] = [-100, -100, -100, -100, 400, 400, 400, 400];
        let bytes: Vec<u8> = samples.iter().flat_map(|v| v.to_le_bytes()).collect();

        let obj: InMemDicomObject = InMemDicomObject::from_element_iter([
            DataElement::new(tags::MODALITY, VR::CS, PrimitiveValue::from("CT")),
            DataElement::new(tags::SAMPLES_PER_PIXEL, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::PHOTOMETRIC_INTERPRETATION, VR::CS, PrimitiveValue::from("MONOCHROME2")),
            DataElement::new(tags::ROWS, VR::US, PrimitiveValue::from(2_u16)),
            DataElement::new(tags::COLUMNS, VR::US, PrimitiveValue::from(4_u16)),
            DataElement::new(tags::BITS_ALLOCATED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::BITS_STORED, VR::US, PrimitiveValue::from(16_u16)),
            DataElement::new(tags::PIXEL_REPRESENTATION, VR::US, PrimitiveValue::from(1_u16)),
            DataElement::new(tags::RESCALE_INTERCEPT, VR::DS, PrimitiveValue::from("-1024")),
            DataElement::new(tags::RESCALE_SLOPE, VR::DS, PrimitiveValue::from("1")),
            DataElement::new(tags::PIXEL_DATA, VR::OW, PrimitiveValue::from(bytes)),
        ]);
        let file = obj
            .with_meta(
                FileMetaTableBuilder::new()
                    .transfer_syntax("1.2.840.10008.1.2.1")
                    .media_storage_sop_class_uid("1.2.840.10008.5.1.4.1.1.2")
                    .media_storage_sop_instance_uid("1.2.3.4.5.6"),
            )
            .unwrap();
        file.write_to_file(path).unwrap();
    }

    #[test]
    fn test_process_file_writes_output() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ct.dcm");
        write_ct_file(&input);

        let out = dir.path().to_str().unwrap();
        let args = Args::try_parse_from(["dcmawl", "-o", out, "ct.dcm"]).unwrap();
        process_file(&input, &args).unwrap();
        assert!(dir.path().join("ct_awl.png").exists());

        let args = Args::try_parse_from(["dcmawl", "-o", out, "--clipped", "ct.dcm"]).unwrap();
        process_file(&input, &args).unwrap();
        let clipped = ::image::open(dir.path().join("ct_awl.png")).unwrap();
        assert!(clipped.as_luma16().is_some());
    }

    #[test]
    fn test_out_of_range_value_range_is_a_computation_error() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("ct.dcm");
        write_ct_file(&input);

        let args = Args::try_parse_from(["dcmawl", "--min", "10", "--max", "0", "ct.dcm"]).unwrap();
        let result = process_file(&input, &args);
        assert_matches!(result, Err(ProcessError::ComputationFailed(_)));
    }

    #[test]
    fn test_garbage_file_returns_notadicomfile_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"definitely not a DICOM file").unwrap();

        let args = Args::try_parse_from(["dcmawl", "x.dcm"]).unwrap();
        let result = process_file(file.path(), &args);
        assert_matches!(result, Err(ProcessError::NotADicomFile(_)));
    }
}
