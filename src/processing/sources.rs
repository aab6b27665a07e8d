// Upstream recognition collaborators. Model loading and inference live behind
// these traits; the engine only sees what they return.

use crate::models::{BoundingBox, Detection, MrzRecord, RecognizedSpan};
use crate::utils::SourceError;

/// Finds field regions on an ID card image.
pub trait FieldDetector {
    /// Short name reported in result metadata.
    fn name(&self) -> &str;

    fn detect(&self, image: &[u8]) -> Result<Vec<Detection>, SourceError>;
}

/// Reads text inside one region of an image.
pub trait TextRecognizer {
    fn name(&self) -> &str;

    fn recognize(&self, image: &[u8], region: &BoundingBox) -> Result<Vec<RecognizedSpan>, SourceError>;
}

/// Locates and decodes a passport MRZ.
pub trait MrzReader {
    fn name(&self) -> &str;

    /// `Ok(None)` when no MRZ was found on the image.
    fn read(&self, image: &[u8]) -> Result<Option<MrzRecord>, SourceError>;
}
