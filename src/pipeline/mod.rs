//! Processing pipeline components.

mod coordinator;
mod detector;
mod source;

pub use coordinator::collect_inputs;
pub use detector::{Detector, Diagnosis};
pub use source::{ImageLoader, ImageSource, decode_image};
