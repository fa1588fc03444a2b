//! Admin accounts: three-layer architecture (domain, repository, service).
//!
//! Login, token issuance and superadmin-only account management live here.

pub mod domain;
pub mod password;
pub mod repo;
pub mod repository;
pub mod service;
pub mod token;

pub use service::AdminService;
