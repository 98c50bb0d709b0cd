//! Cleaning and filtering of OCR'd step text.

pub mod fuzzy;
mod normalize;
mod quality;

pub use normalize::{dedupe, dedupe_with_threshold, normalize};
pub use quality::{QualityFilter, is_good};
