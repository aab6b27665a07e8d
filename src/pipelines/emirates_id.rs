// Emirates ID pipeline: detector regions + recognized text
// -> combined confidence -> normalization -> validation.

use super::{field_value, keep_best, PipelineOutput};
use crate::models::fields::{EXPIRY_DATE, ID_NUMBER, ISSUE_DATE, SEX};
use crate::models::{FieldEvidence, FieldKind, FieldMap, IdCardEvidence, Warnings};
use crate::processing::{ConfidenceCombiner, FieldNormalizer};
use crate::utils::{EngineConfig, ScanError};
use crate::validation::{ExpiryValidator, FormatValidator};
use std::collections::BTreeMap;

pub fn process(evidence: &IdCardEvidence, config: &EngineConfig) -> Result<PipelineOutput, ScanError> {
    if evidence.fields.is_empty() {
        return Err(ScanError::no_id_fields());
    }

    let (fields, mut warnings) = score_fields(evidence, config.low_confidence_threshold);
    let fields = normalize_fields(fields);
    warnings.merge(validate_fields(&fields));

    Ok(PipelineOutput {
        fields,
        warnings,
        metadata: metadata(config),
    })
}

/// Combine detector and recognizer confidence for every detected field.
/// A field name reported twice keeps its most confident detection.
pub fn score_fields(evidence: &IdCardEvidence, low_confidence_threshold: f64) -> (FieldMap, Warnings) {
    let combiner = ConfidenceCombiner::new(low_confidence_threshold);
    let candidates: Vec<&FieldEvidence> = evidence.fields.iter().collect();
    let detected = keep_best(
        candidates,
        |ev| ev.field_name.as_str(),
        |ev| ev.detection_confidence,
    );

    let mut fields = FieldMap::new();
    let mut warnings = Warnings::new();
    for field_evidence in detected {
        let (field, field_warnings) = combiner.score_field(field_evidence);
        warnings.merge(field_warnings);
        fields.insert(field_evidence.field_name.clone(), field);
    }

    (fields, warnings)
}

/// Apply each field's normalization rule to non-empty values. A rule that
/// produces nothing leaves the recognized text in place.
pub fn normalize_fields(mut fields: FieldMap) -> FieldMap {
    for (name, field) in fields.iter_mut() {
        if field.value.is_empty() {
            continue;
        }
        let Some(kind) = FieldKind::for_field(name) else {
            continue;
        };
        if let Some(normalized) = FieldNormalizer::normalize(kind, &field.value) {
            if normalized != field.value {
                log::debug!("Normalized {}: {:?} -> {:?}", name, field.value, normalized);
            }
            field.value = normalized;
        }
    }
    fields
}

pub fn validate_fields(fields: &FieldMap) -> Warnings {
    let mut warnings = Warnings::new();

    if let Some(id_number) = field_value(fields, ID_NUMBER) {
        warnings.extend(FormatValidator::validate_emirates_id_number(id_number));
    }

    warnings.extend(ExpiryValidator::validate_consistency(
        field_value(fields, ISSUE_DATE),
        field_value(fields, EXPIRY_DATE),
    ));

    if let Some(sex) = field_value(fields, SEX) {
        warnings.extend(FormatValidator::validate_sex(sex));
    }

    warnings
}

fn metadata(config: &EngineConfig) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("model".to_string(), config.id_card_model.clone());
    metadata.insert("yolo_model_path".to_string(), config.id_card_model_path.clone());
    metadata
}
