//! Expansion of command-line inputs into the list of files to process

use anyhow::{Context, Result, bail};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extension picked up from directory inputs unless overridden
pub const DEFAULT_EXTENSION: &str = "dcm";

/// Expand files and directories into a sorted list of files.
///
/// Explicit files are kept whatever their extension. Directories contribute
/// the files whose extension matches `extension` (case-insensitive); only
/// their direct children unless `recursive` is set.
pub fn expand_inputs(inputs: &[PathBuf], recursive: bool, extension: &str) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for input in inputs {
        if input.is_dir() {
            let before = files.len();
            collect_from_dir(input, recursive, extension, &mut files)?;
            tracing::debug!(
                dir = %input.display(),
                found = files.len() - before,
                "expanded directory input"
            );
        } else if input.is_file() {
            files.push(input.clone());
        } else {
            bail!("Path not found: {}", input.display());
        }
    }

    files.sort();
    files.dedup();
    Ok(files)
}

fn collect_from_dir(dir: &Path, recursive: bool, extension: &str, files: &mut Vec<PathBuf>) -> Result<()> {
    let walker = WalkDir::new(dir).min_depth(1);
    let walker = if recursive { walker } else { walker.max_depth(1) };

    for entry in walker {
        let entry = entry.with_context(|| format!("Failed to read directory {}", dir.display()))?;
        if entry.file_type().is_file() && has_extension(entry.path(), extension) {
            files.push(entry.into_path());
        }
    }

    Ok(())
}

#[inline]
fn has_extension(path: &Path, extension: &str) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case(extension.trim_start_matches('.')))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn touch(path: &Path) {
        fs::write(path, b"").unwrap();
    }

    #[test]
    fn test_directory_is_expanded_by_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("b.dcm"));
        touch(&dir.path().join("a.DCM"));
        touch(&dir.path().join("notes.txt"));
        fs::create_dir(dir.path().join("series")).unwrap();
        touch(&dir.path().join("series").join("c.dcm"));

        let files = expand_inputs(&[dir.path().to_path_buf()], false, DEFAULT_EXTENSION).unwrap();
        assert_eq!(files, vec![dir.path().join("a.DCM"), dir.path().join("b.dcm")]);

        let files = expand_inputs(&[dir.path().to_path_buf()], true, DEFAULT_EXTENSION).unwrap();
        assert_eq!(files.len(), 3);
        assert!(files.contains(&dir.path().join("series").join("c.dcm")));
    }

    #[test]
    fn test_explicit_files_ignore_extension() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("IM0001");
        touch(&file);

        let files = expand_inputs(&[file.clone(), file.clone()], false, DEFAULT_EXTENSION).unwrap();
        assert_eq!(files, vec![file]);
    }

    #[test]
    fn test_custom_extension() {
        let dir = tempfile::tempdir().unwrap();
        touch(&dir.path().join("x.ima"));
        touch(&dir.path().join("y.dcm"));

        let files = expand_inputs(&[dir.path().to_path_buf()], false, ".ima").unwrap();
        assert_eq!(files, vec![dir.path().join("x.ima")]);
    }

    #[test]
    fn test_missing_path_is_an_error() {
        let err = expand_inputs(&[PathBuf::from("no/such/path.dcm")], false, DEFAULT_EXTENSION).unwrap_err();
        assert!(err.to_string().contains("Path not found"));
    }
}
