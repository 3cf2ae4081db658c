//! Input collection for batch diagnosis.

use crate::constants::IMAGE_EXTENSIONS;
use crate::error::Result;
use crate::pipeline::ImageSource;
use std::path::{Path, PathBuf};
use tracing::warn;

/// Resolve command-line inputs into image sources.
///
/// URLs are passed through. Files given explicitly are kept whatever their
/// extension (the decoder decides). Directories are walked recursively for
/// known image extensions. Missing paths are skipped with a warning.
pub fn collect_inputs(inputs: &[String]) -> Result<Vec<ImageSource>> {
    let mut sources = Vec::new();

    for input in inputs {
        if let Some(source) = ImageSource::url(input) {
            sources.push(source);
            continue;
        }

        let path = Path::new(input);
        if path.is_file() {
            sources.push(ImageSource::File(path.to_path_buf()));
        } else if path.is_dir() {
            let mut files = Vec::new();
            collect_image_files_recursive(path, &mut files)?;
            files.sort();
            sources.extend(files.into_iter().map(ImageSource::File));
        } else {
            warn!("Skipping non-existent path: {}", path.display());
        }
    }

    Ok(sources)
}

/// Recursively collect image files from a directory.
fn collect_image_files_recursive(dir: &Path, files: &mut Vec<PathBuf>) -> Result<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();

        if path.is_dir() {
            collect_image_files_recursive(&path, files)?;
        } else if is_image_file(&path) {
            files.push(path);
        }
    }

    Ok(())
}

/// Check if a file has a supported image extension.
fn is_image_file(path: &Path) -> bool {
    use std::ffi::OsStr;

    path.extension().is_some_and(|ext| {
        IMAGE_EXTENSIONS
            .iter()
            .any(|known| ext.eq_ignore_ascii_case(OsStr::new(known)))
    })
}
