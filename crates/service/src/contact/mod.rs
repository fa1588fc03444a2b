//! Contact-form submissions and their processing status.

pub mod domain;
pub mod repo;
pub mod repository;
pub mod service;

pub use service::ContactService;
