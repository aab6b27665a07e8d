use super::{field_value, PipelineOutput};
use crate::models::fields::{
    DATE_OF_BIRTH, EXPIRY_DATE, FULL_NAME, NATIONALITY, PASSPORT_NUMBER, SEX,
};
use crate::models::{FieldMap, MrzRecord, NormalizedField, PassportEvidence, Warnings};
use crate::processing::FieldNormalizer;
use crate::utils::{EngineConfig, ScanError};
use crate::validation::{FormatValidator, MrzValidator};
use std::collections::BTreeMap;

pub fn process(evidence: &PassportEvidence, config: &EngineConfig) -> Result<PipelineOutput, ScanError> {
    let mrz = evidence.mrz.as_ref().ok_or_else(ScanError::no_mrz)?;
    if present(&mrz.mrz_type).map_or(true, |t| t.trim().is_empty()) {
        return Err(ScanError::unparseable_mrz());
    }

    let fields = normalize_fields(parse_mrz_fields(mrz, config.mrz_confidence));
    let warnings = validate_fields(&fields, mrz);

    Ok(PipelineOutput {
        fields,
        warnings,
        metadata: metadata(config),
    })
}

/// One field per MRZ attribute that is present, all at the same confidence.
/// MRZ dates that do not resolve are left out rather than zero-filled.
pub fn parse_mrz_fields(mrz: &MrzRecord, confidence: f64) -> FieldMap {
    let mut fields = FieldMap::new();
    let mut insert = |name: &str, value: String| {
        fields.insert(name.to_string(), NormalizedField::new(value, confidence, None));
    };

    if let Some(names) = present(&mrz.names) {
        insert(FULL_NAME, names.replace('<', " ").trim().to_string());
    }
    if let Some(number) = present(&mrz.number) {
        insert(PASSPORT_NUMBER, number.replace('<', ""));
    }
    if let Some(nationality) = present(&mrz.nationality) {
        insert(NATIONALITY, nationality.to_string());
    }
    if let Some(dob) = present(&mrz.date_of_birth).and_then(MrzValidator::resolve_date) {
        insert(DATE_OF_BIRTH, dob);
    }
    if let Some(sex) = present(&mrz.sex) {
        insert(SEX, sex.to_string());
    }
    if let Some(expiry) = present(&mrz.expiration_date).and_then(MrzValidator::resolve_date) {
        insert(EXPIRY_DATE, expiry);
    }

    fields
}

/// Only the name and sex need canonicalizing; MRZ dates and codes already are.
pub fn normalize_fields(mut fields: FieldMap) -> FieldMap {
    if let Some(field) = fields.get_mut(FULL_NAME) {
        let normalized = FieldNormalizer::normalize_name(&field.value);
        if !normalized.is_empty() {
            field.value = normalized;
        }
    }
    if let Some(field) = fields.get_mut(SEX) {
        let normalized = FieldNormalizer::normalize_sex(&field.value);
        if !normalized.is_empty() {
            field.value = normalized;
        }
    }
    fields
}

/// Passport number structure, then the MRZ check digits.
pub fn validate_fields(fields: &FieldMap, mrz: &MrzRecord) -> Warnings {
    let mut warnings = Warnings::new();

    if let Some(number) = field_value(fields, PASSPORT_NUMBER) {
        warnings.extend(FormatValidator::validate_passport_number(
            number,
            field_value(fields, NATIONALITY),
        ));
    }
    warnings.extend(MrzValidator::validate(mrz));

    warnings
}

fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn metadata(config: &EngineConfig) -> BTreeMap<String, String> {
    let mut metadata = BTreeMap::new();
    metadata.insert("model".to_string(), config.passport_model.clone());
    metadata.insert("standard".to_string(), config.mrz_standard.clone());
    metadata
}
