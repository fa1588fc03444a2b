use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};
use validator::Validate;

use models::admin::{self, Role};

use crate::errors::ServiceError;

pub const PASSWORD_MIN_LEN: usize = 6;

/// Request/response shape for admin accounts.
///
/// `password` carries the plain-text password on input and is always empty on
/// output, so it never leaves the service.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct AdminDto {
    #[serde(default)]
    pub id: i64,
    #[validate(length(min = 3, max = 50))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    #[validate(length(max = 50))]
    pub password: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default)]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTimeWithTimeZone>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTimeWithTimeZone>,
}

impl AdminDto {
    /// Field rules plus the password length, which is mandatory on create.
    pub fn validate_for_create(&self) -> Result<(), ServiceError> {
        self.validate()?;
        if self.password.len() < PASSWORD_MIN_LEN {
            return Err(ServiceError::Validation(format!("password must be at least {} characters", PASSWORD_MIN_LEN)));
        }
        Ok(())
    }

    /// On update an empty password means "keep the current one".
    pub fn validate_for_update(&self) -> Result<(), ServiceError> {
        if self.id == 0 {
            return Err(ServiceError::Validation("admin id is required".into()));
        }
        self.validate()?;
        if !self.password.is_empty() && self.password.len() < PASSWORD_MIN_LEN {
            return Err(ServiceError::Validation(format!("password must be at least {} characters", PASSWORD_MIN_LEN)));
        }
        Ok(())
    }
}

impl From<admin::Model> for AdminDto {
    fn from(m: admin::Model) -> Self {
        Self {
            id: m.id,
            username: m.username,
            email: m.email,
            password: String::new(),
            role: m.role,
            is_active: Some(m.is_active),
            created_at: Some(m.created_at),
            updated_at: Some(m.updated_at),
        }
    }
}

/// Insert payload; the password is already hashed.
#[derive(Debug, Clone)]
pub struct NewAdmin {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub is_active: bool,
}

/// Column updates for one admin row. `None` leaves the column untouched.
#[derive(Debug, Clone)]
pub struct AdminChanges {
    pub username: String,
    pub email: String,
    pub role: Role,
    pub is_active: Option<bool>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dto() -> AdminDto {
        AdminDto { username: "registrar".into(), email: "registrar@school.test".into(), password: "s3cret!".into(), ..Default::default() }
    }

    #[test]
    fn create_requires_password() {
        assert!(dto().validate_for_create().is_ok());
        let mut d = dto();
        d.password = String::new();
        assert!(matches!(d.validate_for_create(), Err(ServiceError::Validation(_))));
    }

    #[test]
    fn rejects_short_username_and_bad_email() {
        let mut d = dto();
        d.username = "ab".into();
        assert!(d.validate_for_create().is_err());
        let mut d = dto();
        d.email = "registrar".into();
        assert!(d.validate_for_create().is_err());
    }

    #[test]
    fn update_allows_empty_password_but_needs_id() {
        let mut d = dto();
        d.password = String::new();
        assert!(d.validate_for_update().is_err());
        d.id = 7;
        assert!(d.validate_for_update().is_ok());
    }

    #[test]
    fn deserializes_with_defaults() {
        let d: AdminDto = serde_json::from_str(r#"{"username":"ops","email":"ops@school.test","password":"secret1"}"#).unwrap();
        assert_eq!(d.role, Role::Admin);
        assert_eq!(d.is_active, None);
        assert_eq!(d.id, 0);
    }

    #[test]
    fn empty_password_is_not_serialized() {
        let d = AdminDto { password: String::new(), ..dto() };
        let json = serde_json::to_value(&d).unwrap();
        assert!(json.get("password").is_none());
    }
}
