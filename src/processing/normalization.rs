// Field-specific canonicalization of recognized text.
// Every rule is best-effort: input that cannot be canonicalized comes back
// unchanged (or as None for dates), never as an error.

use crate::models::FieldKind;
use chrono::{Datelike, NaiveDate};
use lazy_static::lazy_static;
use std::collections::HashMap;

/// Input date layouts, tried in order. The first one that parses wins.
const DATE_INPUT_FORMATS: [&str; 6] = [
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%Y-%m-%d",
    "%d %b %Y",
    "%d %B %Y",
];

pub const DATE_OUTPUT_FORMAT: &str = "%Y-%m-%d";

lazy_static! {
    // Country names seen on cards mapped to ISO 3166-1 alpha-3 codes
    static ref COUNTRY_CODES: HashMap<&'static str, &'static str> = {
        let mut m = HashMap::new();
        m.insert("UNITED ARAB EMIRATES", "ARE");
        m.insert("UAE", "ARE");
        m.insert("INDIA", "IND");
        m.insert("PAKISTAN", "PAK");
        m.insert("BANGLADESH", "BGD");
        m.insert("PHILIPPINES", "PHL");
        m.insert("EGYPT", "EGY");
        m
    };
}

pub struct FieldNormalizer;

impl FieldNormalizer {
    /// Canonical form of `value` for the given field kind, or `None` when the
    /// rule has nothing to offer.
    pub fn normalize(kind: FieldKind, value: &str) -> Option<String> {
        let normalized = match kind {
            FieldKind::Name => Self::normalize_name(value),
            FieldKind::Date => Self::normalize_date(value)?,
            FieldKind::NationalId => Self::normalize_emirates_id(value),
            FieldKind::PassportNumber => Self::normalize_passport_number(value),
            FieldKind::Sex => Self::normalize_sex(value),
            FieldKind::Nationality => Self::normalize_nationality(value),
        };
        if normalized.is_empty() {
            None
        } else {
            Some(normalized)
        }
    }

    /// Collapse whitespace runs and trim.
    pub fn normalize_text(text: &str) -> String {
        text.split_whitespace().collect::<Vec<_>>().join(" ")
    }

    /// Whitespace cleanup followed by title case on every token.
    pub fn normalize_name(name: &str) -> String {
        Self::normalize_text(name)
            .split(' ')
            .map(title_case_token)
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Parse a recognized date into `YYYY-MM-DD`. Returns `None` when no known
    /// layout matches. `%Y` accepts any width, so two-digit years like `90`
    /// would otherwise come out as `0090`; only four-digit years are accepted.
    pub fn normalize_date(date_str: &str) -> Option<String> {
        let cleaned = replace_zero_lookalikes(date_str.trim());
        if cleaned.is_empty() {
            return None;
        }

        DATE_INPUT_FORMATS.iter().find_map(|fmt| {
            NaiveDate::parse_from_str(&cleaned, fmt)
                .ok()
                .filter(|date| (1000..=9999).contains(&date.year()))
                .map(|date| date.format(DATE_OUTPUT_FORMAT).to_string())
        })
    }

    /// Emirates ID numbers are 15 digits grouped 3-4-7-1. When the digits can be
    /// recovered the dashes are rebuilt; otherwise the cleaned string is returned.
    pub fn normalize_emirates_id(id_number: &str) -> String {
        let cleaned: String = id_number
            .chars()
            .filter(|c| *c != ' ')
            .map(|c| match c {
                'O' | 'o' => '0',
                'I' | 'l' => '1',
                '_' => '-',
                other => other,
            })
            .collect();

        let digits: String = cleaned.chars().filter(|c| c.is_ascii_digit()).collect();
        if digits.len() == 15 {
            return format!(
                "{}-{}-{}-{}",
                &digits[..3],
                &digits[3..7],
                &digits[7..14],
                &digits[14..]
            );
        }

        cleaned
    }

    pub fn normalize_passport_number(passport_number: &str) -> String {
        passport_number
            .chars()
            .filter(|c| *c != ' ' && *c != '-')
            .map(|c| if c == 'O' || c == 'o' { '0' } else { c })
            .collect::<String>()
            .to_uppercase()
    }

    /// Map common spellings to `M`/`F`. Anything else falls back to its first
    /// character.
    pub fn normalize_sex(sex: &str) -> String {
        let normalized = sex.trim().to_uppercase();
        match normalized.as_str() {
            "M" | "MALE" | "MAN" => "M".to_string(),
            "F" | "FEMALE" | "WOMAN" => "F".to_string(),
            _ => normalized.chars().next().map(String::from).unwrap_or_default(),
        }
    }

    /// Known country names become alpha-3 codes; everything else passes through
    /// uppercased.
    pub fn normalize_nationality(nationality: &str) -> String {
        let normalized = nationality.trim().to_uppercase();
        match COUNTRY_CODES.get(normalized.as_str()) {
            Some(code) => code.to_string(),
            None => normalized,
        }
    }
}

fn title_case_token(token: &str) -> String {
    let mut chars = token.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// `O`/`o` read in place of `0`. Letters inside a word (the `O` in `NOV`,
/// `Oct`) are kept so month names still parse. A blanket replacement of every
/// `O` would break those month names; this never parses fewer dates than that.
fn replace_zero_lookalikes(text: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let is_word_letter = |c: Option<&char>| {
        c.map_or(false, |c| c.is_alphabetic() && *c != 'O' && *c != 'o')
    };

    chars
        .iter()
        .enumerate()
        .map(|(i, &c)| {
            if (c == 'O' || c == 'o')
                && !is_word_letter(i.checked_sub(1).and_then(|p| chars.get(p)))
                && !is_word_letter(chars.get(i + 1))
            {
                '0'
            } else {
                c
            }
        })
        .collect()
}
