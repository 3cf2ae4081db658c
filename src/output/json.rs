//! JSON report writer.

use crate::error::{Error, Result};
use crate::output::ReportWriter;
use crate::pipeline::Diagnosis;
use std::io::Write;

/// Writes one compact JSON document per line.
pub struct JsonReporter<W: Write> {
    writer: W,
}

impl<W: Write> JsonReporter<W> {
    /// Create a new JSON reporter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportWriter for JsonReporter<W> {
    fn write_diagnosis(&mut self, diagnosis: &Diagnosis) -> Result<()> {
        serde_json::to_writer(&mut self.writer, diagnosis)
            .map_err(|e| Error::JsonSerialize { source: e })?;
        writeln!(self.writer)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}
