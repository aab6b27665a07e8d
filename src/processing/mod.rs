pub mod confidence;
pub mod normalization;
pub mod sources;

pub use confidence::ConfidenceCombiner;
pub use normalization::FieldNormalizer;
pub use sources::{FieldDetector, MrzReader, TextRecognizer};
