//! Progress bar utilities for batch diagnosis.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for processing multiple inputs.
///
/// A single input gets no bar.
pub fn create_input_progress(total_inputs: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_inputs < 2 {
        return None;
    }

    let pb = ProgressBar::new(total_inputs as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}
