//! Student registrations submitted from the public enrolment form.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::RegistrationService;
