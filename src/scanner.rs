use crate::models::*;
use crate::pipelines::{keep_best, Extractor};
use crate::processing::*;
use crate::utils::{EngineConfig, ScanError, SourceError};
use std::time::Instant;

/// Runs the field detector and text recognizer over an Emirates ID image and
/// feeds what they report through the extraction engine.
pub struct EmiratesIdScanner<D, R> {
    detector: D,
    recognizer: R,
    extractor: Extractor,
}

impl<D: FieldDetector, R: TextRecognizer> EmiratesIdScanner<D, R> {
    pub fn new(detector: D, recognizer: R, mut config: EngineConfig) -> Self {
        config.id_card_model = format!("{} + {}", detector.name(), recognizer.name());
        EmiratesIdScanner {
            detector,
            recognizer,
            extractor: Extractor::new(config),
        }
    }

    pub fn scan(&self, image: &[u8]) -> Result<ExtractionResult, ScanError> {
        let started = Instant::now();

        let evidence = self
            .collect_evidence(image)
            .map_err(|source| internal_error("Emirates ID", source))?;

        self.extractor
            .extract_since(&Evidence::EmiratesId(evidence), started)
    }

    /// Detect field regions, drop weak and duplicate detections, then read the
    /// text inside each remaining region.
    pub fn collect_evidence(&self, image: &[u8]) -> Result<IdCardEvidence, SourceError> {
        let min_confidence = self.extractor.config().min_detection_confidence;
        let detections: Vec<Detection> = self
            .detector
            .detect(image)?
            .into_iter()
            .filter(|d| d.confidence >= min_confidence)
            .collect();
        let detections = keep_best(detections, |d| d.field_name.as_str(), |d| d.confidence);
        log::debug!("{} detected {} fields", self.detector.name(), detections.len());

        let mut fields = Vec::with_capacity(detections.len());
        for detection in detections {
            let spans = self.recognizer.recognize(image, &detection.bbox)?;
            fields.push(FieldEvidence {
                field_name: detection.field_name,
                bbox: Some(detection.bbox),
                detection_confidence: detection.confidence,
                spans,
            });
        }

        Ok(IdCardEvidence { fields })
    }
}

/// Reads the passport MRZ and feeds the decoded record through the extraction engine.
pub struct PassportScanner<M> {
    reader: M,
    extractor: Extractor,
}

impl<M: MrzReader> PassportScanner<M> {
    pub fn new(reader: M, mut config: EngineConfig) -> Self {
        config.passport_model = reader.name().to_string();
        PassportScanner {
            reader,
            extractor: Extractor::new(config),
        }
    }

    pub fn scan(&self, image: &[u8]) -> Result<ExtractionResult, ScanError> {
        let started = Instant::now();

        let mrz = self
            .reader
            .read(image)
            .map_err(|source| internal_error("passport", source))?;

        self.extractor
            .extract_since(&Evidence::Passport(PassportEvidence { mrz }), started)
    }
}

fn internal_error(context: &str, source: SourceError) -> ScanError {
    let err = ScanError::internal(context, source);
    log::error!("{}", err);
    err
}
