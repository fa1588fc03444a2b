use std::sync::Arc;

use tracing::{info, instrument, warn};

use common::pagination::{Paged, Pagination};
use models::registration::{self, RegistrationStatus};

use super::domain::RegistrationInput;
use super::repository::RegistrationRepository;
use crate::errors::ServiceError;

pub struct RegistrationService<R: RegistrationRepository> {
    repo: Arc<R>,
}

fn parse_status(raw: &str) -> Result<RegistrationStatus, ServiceError> {
    raw.parse::<RegistrationStatus>().map_err(|e| {
        warn!(status = raw, "rejected registration status");
        ServiceError::from(e)
    })
}

impl<R: RegistrationRepository> RegistrationService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    /// Public submission. Email and NISN must both be unused.
    #[instrument(skip(self, input), fields(email = %input.email, nisn = %input.nisn))]
    pub async fn create_registration(&self, mut input: RegistrationInput) -> Result<registration::Model, ServiceError> {
        input.check()?;
        if self.repo.exists_by_email(&input.email).await? {
            warn!("email already registered");
            return Err(ServiceError::Conflict(format!("email {} already registered", input.email)));
        }
        if self.repo.exists_by_nisn(&input.nisn).await? {
            warn!("nisn already registered");
            return Err(ServiceError::Conflict(format!("nisn {} already registered", input.nisn)));
        }
        input.status.get_or_insert(RegistrationStatus::New);
        let created = self.repo.create(input).await?;
        info!(id = created.id, status = %created.status, "registration_created");
        Ok(created)
    }

    #[instrument(skip(self))]
    pub async fn get_all_registrations(&self, page: u32, limit: u32, status: Option<&str>) -> Result<Paged<registration::Model>, ServiceError> {
        let status = status.map(parse_status).transpose()?;
        let pagination = Pagination::new(page, limit);
        let (rows, total) = self.repo.list(pagination, status).await?;
        Ok(Paged::new(rows, total, pagination))
    }

    #[instrument(skip(self))]
    pub async fn get_registration_by_id(&self, id: i64) -> Result<registration::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("registration"))
    }

    #[instrument(skip(self))]
    pub async fn get_registration_by_nisn(&self, nisn: &str) -> Result<registration::Model, ServiceError> {
        self.repo.find_by_nisn(nisn).await?.ok_or_else(|| ServiceError::not_found("registration"))
    }

    /// Replace the form fields of an existing registration. Email and NISN may
    /// not collide with another registration.
    #[instrument(skip(self, input))]
    pub async fn update_registration(&self, id: i64, input: RegistrationInput) -> Result<(), ServiceError> {
        input.check()?;
        if let Some(other) = self.repo.find_by_email(&input.email).await?.filter(|r| r.id != id) {
            warn!(other_id = other.id, "email belongs to another registration");
            return Err(ServiceError::Conflict(format!("email {} already registered", input.email)));
        }
        if let Some(other) = self.repo.find_by_nisn(&input.nisn).await?.filter(|r| r.id != id) {
            warn!(other_id = other.id, "nisn belongs to another registration");
            return Err(ServiceError::Conflict(format!("nisn {} already registered", input.nisn)));
        }
        if !self.repo.update(id, input).await? {
            return Err(ServiceError::not_found("registration"));
        }
        info!("registration_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn update_registration_status(&self, id: i64, status: &str) -> Result<(), ServiceError> {
        let status = parse_status(status)?;
        if !self.repo.update_status(id, status).await? {
            return Err(ServiceError::not_found("registration"));
        }
        info!(%status, "registration_status_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_registration(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("registration"));
        }
        info!("registration_deleted");
        Ok(())
    }
}
