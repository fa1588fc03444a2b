//! Field checks the `validator` derive rules do not cover: NISN shape and
//! required free-text fields.

use crate::errors::ModelError;

/// NISN is exactly ten ASCII digits.
pub fn validate_nisn(nisn: &str) -> Result<(), ModelError> {
    if nisn.len() != 10 || !nisn.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::Validation("nisn must be 10 digits".into()));
    }
    Ok(())
}

pub fn require(field: &str, value: &str) -> Result<(), ModelError> {
    if value.trim().is_empty() {
        return Err(ModelError::Validation(format!("{field} required")));
    }
    Ok(())
}
