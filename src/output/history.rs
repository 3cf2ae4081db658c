//! Append-only detection history in CSV.

use crate::error::{Error, Result};
use crate::pipeline::Diagnosis;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};

/// Column names, written once when the file is created.
const HEADER: [&str; 5] = ["timestamp", "source", "status", "label", "confidence"];

#[derive(Debug, Serialize)]
struct HistoryRecord<'a> {
    timestamp: DateTime<Utc>,
    source: &'a str,
    status: &'a str,
    label: &'a str,
    confidence: String,
}

/// Appends one row per diagnosis to a CSV file.
pub struct HistoryWriter {
    path: PathBuf,
    writer: csv::Writer<File>,
}

impl HistoryWriter {
    /// Open the history file for appending, writing the header if it is new.
    pub fn open(path: &Path) -> Result<Self> {
        let is_new = std::fs::metadata(path).map_or(true, |m| m.len() == 0);

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|e| Error::HistoryWrite {
                path: path.to_path_buf(),
                source: e.into(),
            })?;

        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);

        if is_new {
            writer
                .write_record(HEADER)
                .map_err(|e| Error::HistoryWrite {
                    path: path.to_path_buf(),
                    source: e,
                })?;
        }

        Ok(Self {
            path: path.to_path_buf(),
            writer,
        })
    }

    /// Append a record for one diagnosis.
    pub fn append(&mut self, diagnosis: &Diagnosis) -> Result<()> {
        self.append_at(diagnosis, Utc::now())
    }

    fn append_at(&mut self, diagnosis: &Diagnosis, timestamp: DateTime<Utc>) -> Result<()> {
        let record = HistoryRecord {
            timestamp,
            source: &diagnosis.source,
            status: diagnosis.result.status.as_str(),
            label: &diagnosis.result.label,
            confidence: format!("{:.2}", diagnosis.result.confidence),
        };

        self.writer
            .serialize(record)
            .map_err(|e| self.write_error(e))?;
        self.writer
            .flush()
            .map_err(|e| self.write_error(e.into()))?;
        Ok(())
    }

    fn write_error(&self, source: csv::Error) -> Error {
        Error::HistoryWrite {
            path: self.path.clone(),
            source,
        }
    }
}
