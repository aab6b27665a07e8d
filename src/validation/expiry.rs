use crate::models::{ValidationIssue, ValidationIssueType};
use crate::processing::normalization::DATE_OUTPUT_FORMAT;
use chrono::NaiveDate;

pub struct ExpiryValidator;

impl ExpiryValidator {
    /// Expiry must fall strictly after issue. Only checked when both dates are
    /// present in normalized `YYYY-MM-DD` form; otherwise there is nothing to compare.
    pub fn validate_consistency(
        issue_date: Option<&str>,
        expiry_date: Option<&str>,
    ) -> Option<ValidationIssue> {
        let issue = Self::parse_date(issue_date?)?;
        let expiry = Self::parse_date(expiry_date?)?;

        if expiry > issue {
            return None;
        }

        Some(ValidationIssue::new(
            ValidationIssueType::Date,
            format!(
                "Date validation: Expiry date ({}) must be after issue date ({})",
                expiry.format(DATE_OUTPUT_FORMAT),
                issue.format(DATE_OUTPUT_FORMAT)
            ),
        ))
    }

    // Parse a normalized date string in the format "YYYY-MM-DD"
    fn parse_date(date_str: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(date_str, DATE_OUTPUT_FORMAT).ok()
    }
}
