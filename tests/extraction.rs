use std::io::Write;

use serde_json::json;

use idscan::processing::{ConfidenceCombiner, FieldNormalizer};
use idscan::utils::{ErrorCategory, EngineConfig};
use idscan::validation::{ExpiryValidator, MrzValidator};
use idscan::{DocumentType, Evidence, Extractor, ScanError};

fn evidence(value: serde_json::Value) -> Evidence {
    serde_json::from_value(value).expect("evidence should deserialize")
}

fn span(text: &str, confidence: f64, top: f64) -> serde_json::Value {
    json!({ "text": text, "confidence": confidence, "top": top })
}

/// End-to-end: a full Emirates ID card read from JSON evidence
#[test]
fn test_emirates_id_from_json() {
    let card = evidence(json!({
        "document_type": "emirates_id",
        "fields": [
            {
                "field_name": "id_number",
                "bbox": [12.346, 40.0, 300.0, 70.0],
                "detection_confidence": 0.96,
                "spans": [span("784198712345671", 0.94, 41.0)]
            },
            {
                "field_name": "full_name",
                "bbox": [12.0, 80.0, 300.0, 140.0],
                "detection_confidence": 0.93,
                // recognizer order is not reading order
                "spans": [span("hassan", 0.9, 110.0), span("ahmed ali", 0.92, 82.0)]
            },
            {
                "field_name": "nationality",
                "bbox": [12.0, 150.0, 300.0, 170.0],
                "detection_confidence": 0.9,
                "spans": [span("india", 0.91, 151.0)]
            },
            {
                "field_name": "expiry_date",
                "bbox": [12.0, 180.0, 300.0, 200.0],
                "detection_confidence": 0.9,
                "spans": [span("15 Mar 2031", 0.9, 181.0)]
            }
        ]
    }));

    let result = Extractor::default().extract(&card).unwrap();
    assert_eq!(result.document_type, DocumentType::EmiratesId);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);

    let id = &result.fields["id_number"];
    assert_eq!(id.value, "784-1987-1234567-1");
    assert_eq!(id.bbox, Some([12.35, 40.0, 300.0, 70.0]));
    assert_eq!(result.fields["full_name"].value, "Ahmed Ali Hassan");
    assert_eq!(result.fields["nationality"].value, "IND");
    assert_eq!(result.fields["expiry_date"].value, "2031-03-15");
    assert_eq!(result.metadata["yolo_model_path"], "models/best.pt");
}

/// End-to-end: zero detected fields is a hard failure with no partial record
#[test]
fn test_no_fields_detected() {
    let card = evidence(json!({ "document_type": "emirates_id", "fields": [] }));

    let err = Extractor::default().extract(&card).unwrap_err();
    assert_eq!(err.category(), ErrorCategory::UserCorrectable);
    assert!(err.public_message().starts_with("No Emirates ID fields detected"));
}

/// End-to-end: one weak field is kept with exactly one warning
#[test]
fn test_low_confidence_field() {
    let card = evidence(json!({
        "document_type": "emirates_id",
        "fields": [{
            "field_name": "full_name",
            "detection_confidence": 0.4,
            "spans": [span("JOHN SMITH", 0.5, 0.0)]
        }]
    }));

    let result = Extractor::default().extract(&card).unwrap();
    assert_eq!(result.fields.len(), 1);
    assert_eq!(result.fields["full_name"].confidence, 0.447);
    assert_eq!(result.warnings, vec!["Low confidence (0.45) for field: full_name"]);
}

#[test]
fn test_threshold_comes_from_config() {
    let card = evidence(json!({
        "document_type": "emirates_id",
        "fields": [{
            "field_name": "sex",
            "detection_confidence": 0.8,
            "spans": [span("F", 0.8, 0.0)]
        }]
    }));

    let mut config = EngineConfig::default();
    config.low_confidence_threshold = 0.9;
    let result = Extractor::new(config).extract(&card).unwrap();
    assert_eq!(result.warnings, vec!["Low confidence (0.80) for field: sex"]);
}

#[test]
fn test_passport_from_json() {
    let passport = evidence(json!({
        "document_type": "passport",
        "mrz": {
            "mrz_type": "TD3",
            "names": "ERIKSSON<<ANNA<MARIA<<<<<<<<",
            "number": "L898902C3",
            "nationality": "UTO",
            "date_of_birth": "740812",
            "sex": "F",
            "expiration_date": "120415",
            "check_number": "6",
            "check_date_of_birth": "2",
            "check_expiration_date": "9"
        }
    }));

    let result = Extractor::default().extract(&passport).unwrap();
    assert_eq!(result.document_type, DocumentType::Passport);
    assert!(result.warnings.is_empty(), "{:?}", result.warnings);
    assert_eq!(result.fields["full_name"].value, "Eriksson Anna Maria");
    assert_eq!(result.fields["date_of_birth"].value, "1974-08-12");
    assert_eq!(result.fields["expiry_date"].confidence, 0.95);
    assert_eq!(result.metadata["model"], "passporteye (MRZ)");
    assert_eq!(result.metadata["standard"], "ICAO 9303");
}

#[test]
fn test_passport_failures() {
    let missing = evidence(json!({ "document_type": "passport" }));
    let err = Extractor::default().extract(&missing).unwrap_err();
    assert!(matches!(err, ScanError::NoEvidence(_)));
    assert!(err.public_message().starts_with("No MRZ detected"));

    let untyped = evidence(json!({ "document_type": "passport", "mrz": { "number": "L898902C3" } }));
    let err = Extractor::default().extract(&untyped).unwrap_err();
    assert!(matches!(err, ScanError::UnparseableMrz(_)));
    assert!(err.is_user_correctable());
}

#[test]
fn test_result_serialization() {
    let passport = evidence(json!({
        "document_type": "passport",
        "mrz": { "mrz_type": "TD3", "sex": "M" }
    }));
    let result = Extractor::default().extract(&passport).unwrap();

    let value = serde_json::to_value(&result).unwrap();
    assert_eq!(value["document_type"], "passport");
    assert_eq!(value["fields"]["sex"], json!({ "value": "M", "confidence": 0.95 }));
    assert!(value["processing_time_ms"].is_number());
    assert_eq!(value["warnings"], json!([]));
}

#[test]
fn test_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, r#"{{ "mrz_confidence": 0.9, "mrz_standard": "ICAO 9303 (8th ed.)" }}"#).unwrap();

    let config = EngineConfig::from_file(file.path()).unwrap();
    assert_eq!(config.low_confidence_threshold, 0.5);

    let passport = evidence(json!({ "document_type": "passport", "mrz": { "mrz_type": "TD3", "sex": "F" } }));
    let result = Extractor::new(config).extract(&passport).unwrap();
    assert_eq!(result.fields["sex"].confidence, 0.9);
    assert_eq!(result.metadata["standard"], "ICAO 9303 (8th ed.)");
}

#[test]
fn test_emirates_id_normalization_is_stable() {
    assert_eq!(
        FieldNormalizer::normalize_emirates_id("784 1987 1234567 1"),
        "784-1987-1234567-1"
    );
    for input in ["784-1987-12345", "ABC", "12 34", ""] {
        let once = FieldNormalizer::normalize_emirates_id(input);
        assert_eq!(FieldNormalizer::normalize_emirates_id(&once), once);
    }
}

#[test]
fn test_mrz_century_and_check_digits() {
    assert_eq!(MrzValidator::resolve_date("850101").as_deref(), Some("1985-01-01"));
    assert_eq!(MrzValidator::resolve_date("050101").as_deref(), Some("2005-01-01"));
    assert_eq!(MrzValidator::resolve_date("500101").as_deref(), Some("2050-01-01"));

    assert_eq!(MrzValidator::compute_check_digit("1234567"), 4);
    assert!(MrzValidator::validate_check_digit("1234567", Some("4")));
    assert!(!MrzValidator::validate_check_digit("1234567", Some("5")));
    assert!(MrzValidator::validate_check_digit("anything", Some("<")));
}

#[test]
fn test_confidence_and_dates() {
    assert!((ConfidenceCombiner::combine(0.8, 0.8) - 0.8).abs() < 1e-12);
    assert_eq!(ConfidenceCombiner::combine(1.0, 0.0), 0.0);
    assert_eq!(ConfidenceCombiner::combine(0.0, 0.7), 0.0);

    assert!(ExpiryValidator::validate_consistency(Some("2020-01-01"), Some("2019-01-01")).is_some());
    assert!(ExpiryValidator::validate_consistency(Some("2020-01-01"), Some("2025-01-01")).is_none());
}

#[test]
fn test_sex_normalization() {
    assert_eq!(FieldNormalizer::normalize_sex("MALE"), "M");
    assert_eq!(FieldNormalizer::normalize_sex("unknown"), "U");
    assert_eq!(FieldNormalizer::normalize_sex(""), "");
}
