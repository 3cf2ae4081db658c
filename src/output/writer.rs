//! Report writer trait definition.

use crate::config::OutputFormat;
use crate::error::Result;
use crate::output::{JsonReporter, TextReporter};
use crate::pipeline::Diagnosis;
use std::io::Write;

/// Trait for writing diagnosis reports.
pub trait ReportWriter {
    /// Write the report for one input.
    fn write_diagnosis(&mut self, diagnosis: &Diagnosis) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}

/// Create the reporter for a format over any sink.
pub fn create_reporter(format: OutputFormat, sink: Box<dyn Write>) -> Box<dyn ReportWriter> {
    match format {
        OutputFormat::Text => Box::new(TextReporter::new(sink)),
        OutputFormat::Json => Box::new(JsonReporter::new(sink)),
    }
}
