use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use models::registration::{Gender, RegistrationStatus};
use models::validate::validate_nisn;

use crate::errors::ServiceError;

/// Enrolment form payload. `status` is normally absent on public submissions.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegistrationInput {
    #[validate(email)]
    pub email: String,
    pub nisn: String,
    #[validate(length(min = 1, max = 100))]
    pub full_name: String,
    pub gender: Gender,
    #[validate(length(min = 1, max = 100))]
    pub birth_place: String,
    pub birth_date: NaiveDate,
    #[validate(length(min = 1, max = 100))]
    pub parent_name: String,
    #[validate(length(min = 6, max = 20))]
    pub phone: String,
    #[validate(length(min = 1))]
    pub address: String,
    #[serde(default)]
    pub previous_school: Option<String>,
    #[serde(default)]
    pub status: Option<RegistrationStatus>,
}

impl RegistrationInput {
    pub fn check(&self) -> Result<(), ServiceError> {
        self.validate()?;
        validate_nisn(&self.nisn)?;
        Ok(())
    }
}

#[cfg(test)]
pub(crate) fn sample(n: u32) -> RegistrationInput {
    RegistrationInput {
        email: format!("student{n}@mail.test"),
        nisn: format!("{:010}", 51_000_000 + n),
        full_name: format!("Student {n}"),
        gender: Gender::Female,
        birth_place: "Bandung".into(),
        birth_date: NaiveDate::from_ymd_opt(2012, 3, 14).unwrap_or_default(),
        parent_name: "Parent".into(),
        phone: "081234567890".into(),
        address: "Jl. Merdeka 1".into(),
        previous_school: Some("SD Negeri 3".into()),
        status: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_is_valid() {
        assert!(sample(1).check().is_ok());
    }

    #[test]
    fn nisn_must_be_ten_digits() {
        let input = RegistrationInput { nisn: "12345".into(), ..sample(1) };
        assert!(matches!(input.check(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn parses_from_form_json() {
        let json = r#"{
            "email": "kid@mail.test", "nisn": "0051234567", "full_name": "Kid",
            "gender": "male", "birth_place": "Bogor", "birth_date": "2013-07-01",
            "parent_name": "Mom", "phone": "0812345678", "address": "Jl. Mawar 2"
        }"#;
        let input: RegistrationInput = serde_json::from_str(json).unwrap();
        assert_eq!(input.gender, Gender::Male);
        assert!(input.status.is_none());
        assert!(input.previous_school.is_none());
        assert!(input.check().is_ok());
    }
}
