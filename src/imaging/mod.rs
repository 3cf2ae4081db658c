//! Image preparation for the classifier cascade.

mod plant_filter;
mod preprocess;

pub use plant_filter::{PlantCheck, PlantFilter};
pub use preprocess::{ImageTensor, preprocess};
