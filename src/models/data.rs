use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// `[x1, y1, x2, y2]` in image pixels.
pub type BoundingBox = [f64; 4];

/// Normalized fields keyed by field name.
pub type FieldMap = BTreeMap<String, NormalizedField>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentType {
    EmiratesId,
    Passport,
}

impl DocumentType {
    pub fn as_str(&self) -> &'static str {
        match self {
            DocumentType::EmiratesId => "emirates_id",
            DocumentType::Passport => "passport",
        }
    }
}

impl fmt::Display for DocumentType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A region reported by the field detector.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Detection {
    pub field_name: String,
    pub bbox: BoundingBox,
    pub confidence: f64,
}

/// One text span returned by the recognizer for a cropped region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecognizedSpan {
    pub text: String,
    pub confidence: f64,
    /// Top edge of the span's bounding box, used for reading order.
    pub top: f64,
}

/// Detector output for one field plus whatever the recognizer read inside it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldEvidence {
    pub field_name: String,
    #[serde(default)]
    pub bbox: Option<BoundingBox>,
    pub detection_confidence: f64,
    #[serde(default)]
    pub spans: Vec<RecognizedSpan>,
}

/// Field evidence after the recognizer spans have been merged into one string.
#[derive(Debug, Clone, PartialEq)]
pub struct RawFieldEvidence {
    pub field_name: String,
    pub text: String,
    pub detection_confidence: Option<f64>,
    pub recognition_confidence: f64,
    pub bounding_box: Option<BoundingBox>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IdCardEvidence {
    /// In detection order; warnings follow this order.
    pub fields: Vec<FieldEvidence>,
}

/// Parsed MRZ as handed over by the MRZ reader. Dates are raw `YYMMDD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MrzRecord {
    pub names: Option<String>,
    pub number: Option<String>,
    pub nationality: Option<String>,
    pub date_of_birth: Option<String>,
    pub sex: Option<String>,
    pub expiration_date: Option<String>,
    pub check_number: Option<String>,
    pub check_date_of_birth: Option<String>,
    pub check_expiration_date: Option<String>,
    pub mrz_type: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PassportEvidence {
    /// `None` when the reader found no MRZ at all.
    #[serde(default)]
    pub mrz: Option<MrzRecord>,
}

/// Everything the engine needs for one scan, tagged by document type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "document_type", rename_all = "snake_case")]
pub enum Evidence {
    EmiratesId(IdCardEvidence),
    Passport(PassportEvidence),
}

impl Evidence {
    pub fn document_type(&self) -> DocumentType {
        match self {
            Evidence::EmiratesId(_) => DocumentType::EmiratesId,
            Evidence::Passport(_) => DocumentType::Passport,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NormalizedField {
    pub value: String,
    pub confidence: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bbox: Option<BoundingBox>,
}

impl NormalizedField {
    /// Confidence is rounded to 3 decimals and bbox coordinates to 2.
    pub fn new(value: impl Into<String>, confidence: f64, bbox: Option<BoundingBox>) -> Self {
        NormalizedField {
            value: value.into(),
            confidence: round_to(confidence, 3),
            bbox: bbox.map(|b| b.map(|coord| round_to(coord, 2))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub document_type: DocumentType,
    pub fields: FieldMap,
    pub processing_time_ms: f64,
    pub warnings: Vec<String>,
    pub metadata: BTreeMap<String, String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationIssueType {
    Confidence,
    Recognition,
    Format,
    Date,
    Sex,
    Checksum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ValidationIssue {
    pub issue_type: ValidationIssueType,
    pub message: String,
}

impl ValidationIssue {
    pub fn new(issue_type: ValidationIssueType, message: impl Into<String>) -> Self {
        ValidationIssue {
            issue_type,
            message: message.into(),
        }
    }
}

/// Ordered, append-only list of non-fatal findings for one scan. Each pipeline
/// step returns its own and the caller merges them in order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Warnings(Vec<String>);

impl Warnings {
    pub fn new() -> Self {
        Warnings(Vec::new())
    }

    pub fn push(&mut self, issue: ValidationIssue) {
        log::debug!("{:?} warning: {}", issue.issue_type, issue.message);
        self.0.push(issue.message);
    }

    pub fn merge(&mut self, other: Warnings) {
        self.0.extend(other.0);
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

impl Extend<ValidationIssue> for Warnings {
    fn extend<I: IntoIterator<Item = ValidationIssue>>(&mut self, iter: I) {
        for issue in iter {
            self.push(issue);
        }
    }
}

pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}
