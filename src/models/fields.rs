// Field names shared by the detector classes, the MRZ mapping and the output record.

pub const ID_NUMBER: &str = "id_number";
pub const PASSPORT_NUMBER: &str = "passport_number";
pub const FULL_NAME: &str = "full_name";
pub const DATE_OF_BIRTH: &str = "date_of_birth";
pub const NATIONALITY: &str = "nationality";
pub const SEX: &str = "sex";
pub const ISSUE_DATE: &str = "issue_date";
pub const EXPIRY_DATE: &str = "expiry_date";

/// Field types for normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    Name,
    Date,
    NationalId,
    PassportNumber,
    Sex,
    Nationality,
}

impl FieldKind {
    /// Normalization rule for a field name. Unknown fields are left untouched.
    pub fn for_field(field_name: &str) -> Option<FieldKind> {
        match field_name {
            ID_NUMBER => Some(FieldKind::NationalId),
            PASSPORT_NUMBER => Some(FieldKind::PassportNumber),
            FULL_NAME => Some(FieldKind::Name),
            DATE_OF_BIRTH | ISSUE_DATE | EXPIRY_DATE => Some(FieldKind::Date),
            NATIONALITY => Some(FieldKind::Nationality),
            SEX => Some(FieldKind::Sex),
            _ => None,
        }
    }
}
