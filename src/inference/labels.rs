//! Label vocabulary file reading.

use crate::error::{Error, Result};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// Read an ordered label vocabulary.
///
/// # File Format
/// - One label per line, index-aligned with the model output vector
/// - Surrounding whitespace is trimmed
/// - Trailing blank lines are dropped; interior blank lines are kept as
///   empty labels so later indices stay aligned
///
/// # Errors
/// - Returns error if the file cannot be read or is not valid UTF-8
/// - Returns error if the file holds no labels
pub fn read_labels(path: &Path) -> Result<Vec<String>> {
    let file = File::open(path).map_err(|e| Error::LabelsRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    let reader = BufReader::new(file);
    let mut labels = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|e| Error::LabelsRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        labels.push(line.trim().to_string());
    }

    while labels.last().is_some_and(String::is_empty) {
        labels.pop();
    }

    if labels.is_empty() {
        return Err(Error::LabelsEmpty {
            path: path.to_path_buf(),
        });
    }

    Ok(labels)
}
