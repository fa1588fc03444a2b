use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("forbidden: {0}")]
    Forbidden(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("admin account is inactive")]
    Inactive,
    #[error("hashing error: {0}")]
    Hash(String),
    #[error("token error: {0}")]
    Token(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            ServiceError::Validation(_) => 1001,
            ServiceError::Conflict(_) => 1002,
            ServiceError::NotFound(_) => 1003,
            ServiceError::InvalidCredentials => 1004,
            ServiceError::Forbidden(_) => 1005,
            ServiceError::Inactive => 1006,
            ServiceError::Hash(_) => 1101,
            ServiceError::Token(_) => 1102,
            ServiceError::Db(_) => 1200,
        }
    }
}

impl From<ModelError> for ServiceError {
    fn from(e: ModelError) -> Self {
        match e {
            ModelError::Validation(msg) => ServiceError::Validation(msg),
            ModelError::Db(msg) => ServiceError::Db(msg),
        }
    }
}

/// Unique-key violations become `Conflict`; everything else stays a storage error.
impl From<DbErr> for ServiceError {
    fn from(e: DbErr) -> Self {
        match e.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => ServiceError::Conflict(detail),
            _ => ServiceError::Db(e.to_string()),
        }
    }
}

impl From<validator::ValidationErrors> for ServiceError {
    fn from(e: validator::ValidationErrors) -> Self { ServiceError::Validation(e.to_string()) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_are_distinct_per_kind() {
        assert_eq!(ServiceError::not_found("contact").code(), 1003);
        assert_eq!(ServiceError::InvalidCredentials.code(), 1004);
        assert_eq!(ServiceError::Forbidden("x".into()).code(), 1005);
        assert_eq!(ServiceError::Db("x".into()).code(), 1200);
    }

    #[test]
    fn not_found_message_names_entity() {
        assert_eq!(ServiceError::not_found("admin").to_string(), "not found: admin not found");
    }

    #[test]
    fn model_validation_maps_to_validation() {
        let e: ServiceError = ModelError::Validation("invalid email".into()).into();
        assert!(matches!(e, ServiceError::Validation(m) if m == "invalid email"));
    }

    #[test]
    fn generic_db_error_is_not_conflict() {
        let e: ServiceError = DbErr::Custom("connection reset".into()).into();
        assert!(matches!(e, ServiceError::Db(_)));
    }
}
