//! SeaORM entities for the school administration backend, plus the
//! connection factory and table bootstrap used by binaries and tests.

pub mod errors;
pub mod db;
pub mod schema;
pub mod validate;
pub mod admin;
pub mod contact;
pub mod registration;
pub mod article;
