//! Human-readable report writer.

use crate::error::Result;
use crate::inference::Status;
use crate::output::ReportWriter;
use crate::pipeline::Diagnosis;
use std::io::Write;

/// Writes one indented block per input.
pub struct TextReporter<W: Write> {
    writer: W,
}

impl<W: Write> TextReporter<W> {
    /// Create a new text reporter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Consume the reporter and return the sink.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportWriter for TextReporter<W> {
    fn write_diagnosis(&mut self, diagnosis: &Diagnosis) -> Result<()> {
        let result = &diagnosis.result;

        writeln!(self.writer, "{}", diagnosis.source)?;
        writeln!(self.writer, "  Status:     {}", result.status)?;
        writeln!(self.writer, "  Label:      {}", result.label)?;
        writeln!(self.writer, "  Confidence: {:.2}%", result.confidence)?;

        match result.status {
            Status::PlantRejected => {
                writeln!(
                    self.writer,
                    "  Note:       too few green pixels, no classifier was run"
                )?;
            }
            Status::ModelUnavailable => {
                if let Some(message) = &result.message {
                    writeln!(self.writer, "  Error:      {message}")?;
                }
            }
            Status::Corn | Status::Apple | Status::General => {}
        }

        if let Some(remedy) = &diagnosis.remedy {
            writeln!(self.writer, "  Temporary:  {}", remedy.temporary)?;
            writeln!(self.writer, "  Permanent:  {}", remedy.permanent)?;
        }

        writeln!(self.writer)?;
        Ok(())
    }

    fn finalize(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::inference::ClassificationResult;
    use crate::remediation::Remedy;

    fn render(diagnosis: &Diagnosis) -> String {
        let mut reporter = TextReporter::new(Vec::new());
        reporter.write_diagnosis(diagnosis).unwrap();
        reporter.finalize().unwrap();
        String::from_utf8(reporter.into_inner()).unwrap()
    }

    #[test]
    fn test_accepted_report_includes_remedy() {
        let text = render(&Diagnosis {
            source: "leaf.jpg".to_string(),
            result: ClassificationResult {
                status: Status::Corn,
                label: "Corn_Common_Rust".to_string(),
                confidence: 93.456,
                message: None,
            },
            remedy: Some(Remedy {
                temporary: "Remove infected leaves".to_string(),
                permanent: "Plant resistant hybrids".to_string(),
            }),
        });

        assert!(text.starts_with("leaf.jpg\n"));
        assert!(text.contains("Status:     corn"));
        assert!(text.contains("Confidence: 93.46%"));
        assert!(text.contains("Temporary:  Remove infected leaves"));
        assert!(text.contains("Permanent:  Plant resistant hybrids"));
    }

    #[test]
    fn test_rejected_report_explains() {
        let text = render(&Diagnosis {
            source: "wall.jpg".to_string(),
            result: ClassificationResult {
                status: Status::PlantRejected,
                label: "Not a Plant (Low Green Pixels)".to_string(),
                confidence: 2.5,
                message: None,
            },
            remedy: None,
        });

        assert!(text.contains("plant-rejected"));
        assert!(text.contains("too few green pixels"));
        assert!(!text.contains("Temporary"));
    }

    #[test]
    fn test_unavailable_report_shows_message() {
        let text = render(&Diagnosis {
            source: "leaf.jpg".to_string(),
            result: ClassificationResult {
                status: Status::ModelUnavailable,
                label: "Model Load Error".to_string(),
                confidence: 0.0,
                message: Some("no corn model configured".to_string()),
            },
            remedy: None,
        });

        assert!(text.contains("Error:      no corn model configured"));
    }
}
