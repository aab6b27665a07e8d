use crate::models::{ValidationIssue, ValidationIssueType};
use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref EMIRATES_ID_PATTERN: Regex = Regex::new(r"^784-\d{4}-\d{7}-\d$").unwrap();
    static ref PASSPORT_NUMBER_PATTERN: Regex = Regex::new(r"(?i)^[A-Z0-9]{6,9}$").unwrap();
}

const VALID_SEX_VALUES: [&str; 4] = ["M", "F", "MALE", "FEMALE"];

/// FormatValidator checks the structure of single fields. Each check yields at
/// most one issue and never fails the scan.
pub struct FormatValidator;

impl FormatValidator {
    pub fn validate_emirates_id_number(id_number: &str) -> Option<ValidationIssue> {
        let error = if id_number.is_empty() {
            "ID number is empty".to_string()
        } else {
            let clean_id = id_number.trim().replace(' ', "");
            if EMIRATES_ID_PATTERN.is_match(&clean_id) {
                return None;
            }
            format!(
                "Invalid Emirates ID format. Expected: 784-YYYY-NNNNNNN-C, got: {}",
                id_number
            )
        };

        Some(ValidationIssue::new(
            ValidationIssueType::Format,
            format!("ID validation: {}", error),
        ))
    }

    /// `_country_code` is accepted for per-country rules; none exist yet.
    pub fn validate_passport_number(
        passport_number: &str,
        _country_code: Option<&str>,
    ) -> Option<ValidationIssue> {
        let error = if passport_number.is_empty() {
            "Passport number is empty".to_string()
        } else {
            let clean_number = passport_number.trim().replace(' ', "");
            if PASSPORT_NUMBER_PATTERN.is_match(&clean_number) {
                return None;
            }
            format!("Invalid passport number format: {}", passport_number)
        };

        Some(ValidationIssue::new(
            ValidationIssueType::Format,
            format!("Passport number validation: {}", error),
        ))
    }

    pub fn validate_sex(sex: &str) -> Option<ValidationIssue> {
        let normalized = sex.trim().to_uppercase();
        if VALID_SEX_VALUES.contains(&normalized.as_str()) {
            return None;
        }

        Some(ValidationIssue::new(
            ValidationIssueType::Sex,
            format!(
                "Sex validation: Invalid sex value: {}. Expected M/F or Male/Female",
                sex
            ),
        ))
    }
}
