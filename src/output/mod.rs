//! Report writers and detection history.

mod history;
mod json;
pub mod progress;
mod text;
mod writer;

pub use history::HistoryWriter;
pub use json::JsonReporter;
pub use text::TextReporter;
pub use writer::{ReportWriter, create_reporter};
