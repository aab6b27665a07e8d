pub mod data;
pub mod fields;

pub use data::*;
pub use fields::FieldKind;
