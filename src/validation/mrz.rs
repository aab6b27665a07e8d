use crate::models::{MrzRecord, ValidationIssue, ValidationIssueType};

/// ICAO Doc 9303 check digit weights, applied cyclically by position.
const CHECK_DIGIT_WEIGHTS: [u32; 3] = [7, 3, 1];

/// Two-digit years above this resolve to the 1900s, the rest to the 2000s.
/// Subjects born before 1951 or documents expiring after 2050 resolve wrongly.
const CENTURY_PIVOT: u32 = 50;

/// MrzValidator resolves MRZ dates and checks the embedded check digits.
pub struct MrzValidator;

impl MrzValidator {
    /// Turn a raw `YYMMDD` MRZ date into `YYYY-MM-DD`. Month and day are copied
    /// as-is; only the digits themselves are checked.
    pub fn resolve_date(mrz_date: &str) -> Option<String> {
        if mrz_date.len() != 6 || !mrz_date.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }

        let yy: u32 = mrz_date[..2].parse().ok()?;
        let year = if yy > CENTURY_PIVOT { 1900 + yy } else { 2000 + yy };

        Some(format!("{:04}-{}-{}", year, &mrz_date[2..4], &mrz_date[4..6]))
    }

    /// Numeric value of an MRZ character: digits as themselves, `A`–`Z` as
    /// 10–35 and the `<` filler as 0. Anything else has no value.
    pub fn char_value(c: char) -> Option<u32> {
        match c {
            '0'..='9' => c.to_digit(10),
            'A'..='Z' => Some(c as u32 - 'A' as u32 + 10),
            '<' => Some(0),
            _ => None,
        }
    }

    /// Weighted modulo-10 check digit over `data`. Characters outside the MRZ
    /// alphabet are skipped but still consume their weight position.
    pub fn compute_check_digit(data: &str) -> u32 {
        let sum: u32 = data
            .chars()
            .enumerate()
            .filter_map(|(i, c)| {
                Self::char_value(c).map(|value| value * CHECK_DIGIT_WEIGHTS[i % 3])
            })
            .sum();
        sum % 10
    }

    /// A missing or `<` check digit means none was provided and always passes.
    pub fn validate_check_digit(data: &str, check_digit: Option<&str>) -> bool {
        let check_digit = match check_digit {
            None | Some("") | Some("<") => return true,
            Some(digit) => digit,
        };

        let mut chars = check_digit.chars();
        match (chars.next().and_then(|c| c.to_digit(10)), chars.next()) {
            (Some(expected), None) => Self::compute_check_digit(data) == expected,
            _ => false,
        }
    }

    /// Check the document number, date of birth and expiration date digits
    /// independently. Each mismatch is one issue.
    pub fn validate(mrz: &MrzRecord) -> Vec<ValidationIssue> {
        let checks = [
            (
                &mrz.number,
                &mrz.check_number,
                "Passport number check digit validation failed",
            ),
            (
                &mrz.date_of_birth,
                &mrz.check_date_of_birth,
                "Date of birth check digit validation failed",
            ),
            (
                &mrz.expiration_date,
                &mrz.check_expiration_date,
                "Expiration date check digit validation failed",
            ),
        ];

        checks
            .iter()
            .filter(|(_, check, _)| check.as_deref().map_or(false, |c| !c.is_empty()))
            .filter(|(data, check, _)| {
                !Self::validate_check_digit(data.as_deref().unwrap_or(""), check.as_deref())
            })
            .map(|(_, _, message)| ValidationIssue::new(ValidationIssueType::Checksum, *message))
            .collect()
    }
}
