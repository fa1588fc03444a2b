//! Service layer providing business-oriented CRUD operations on top of models.
//! - Separates business logic from data access: each domain has a repository
//!   trait, a SeaORM implementation and an in-memory mock.
//! - Reuses entity definitions and field validators from the `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod policy;
pub mod admin;
pub mod contact;
pub mod registration;
pub mod article;
#[cfg(test)]
pub mod test_support;
