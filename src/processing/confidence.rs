use crate::models::{
    FieldEvidence, NormalizedField, RawFieldEvidence, ValidationIssue, ValidationIssueType,
    Warnings,
};

/// ConfidenceCombiner fuses the detector's and the recognizer's confidence for
/// each ID-card field into a single score.
pub struct ConfidenceCombiner {
    low_confidence_threshold: f64,
}

impl ConfidenceCombiner {
    pub fn new(low_confidence_threshold: f64) -> Self {
        ConfidenceCombiner {
            low_confidence_threshold,
        }
    }

    /// Geometric mean of the two stage confidences.
    pub fn combine(detection: f64, recognition: f64) -> f64 {
        (detection * recognition).sqrt()
    }

    /// Put the recognizer spans in reading order (top to bottom), join them with
    /// single spaces and average their confidences.
    pub fn merge_spans(evidence: &FieldEvidence) -> RawFieldEvidence {
        let mut spans: Vec<_> = evidence.spans.iter().collect();
        spans.sort_by(|a, b| a.top.total_cmp(&b.top));

        let text = spans
            .iter()
            .map(|span| span.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");
        let recognition_confidence = if spans.is_empty() {
            0.0
        } else {
            spans.iter().map(|span| span.confidence).sum::<f64>() / spans.len() as f64
        };

        RawFieldEvidence {
            field_name: evidence.field_name.clone(),
            text,
            detection_confidence: Some(evidence.detection_confidence),
            recognition_confidence,
            bounding_box: evidence.bbox,
        }
    }

    /// Score one field. A region with nothing recognized keeps an empty value at
    /// confidence 0.0 instead of being combined.
    pub fn score_field(&self, evidence: &FieldEvidence) -> (NormalizedField, Warnings) {
        let mut warnings = Warnings::new();

        if evidence.spans.is_empty() {
            warnings.push(ValidationIssue::new(
                ValidationIssueType::Recognition,
                format!("No text detected in field: {}", evidence.field_name),
            ));
            return (NormalizedField::new("", 0.0, evidence.bbox), warnings);
        }

        let raw = Self::merge_spans(evidence);
        let confidence = Self::combine(
            raw.detection_confidence.unwrap_or(0.0),
            raw.recognition_confidence,
        );

        if confidence < self.low_confidence_threshold {
            warnings.push(ValidationIssue::new(
                ValidationIssueType::Confidence,
                format!("Low confidence ({:.2}) for field: {}", confidence, raw.field_name),
            ));
        }

        (NormalizedField::new(raw.text, confidence, raw.bounding_box), warnings)
    }
}
