use std::sync::Arc;

use tracing::{info, instrument, warn};
use validator::Validate;

use common::pagination::{Paged, Pagination};
use models::contact::{self, ContactStatus};

use super::domain::ContactInput;
use super::repository::ContactRepository;
use crate::errors::ServiceError;

pub struct ContactService<R: ContactRepository> {
    repo: Arc<R>,
}

fn parse_status(raw: &str) -> Result<ContactStatus, ServiceError> {
    raw.parse::<ContactStatus>().map_err(|e| {
        warn!(status = raw, "rejected contact status");
        ServiceError::from(e)
    })
}

impl<R: ContactRepository> ContactService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(email = %input.email))]
    pub async fn create_contact(&self, input: ContactInput) -> Result<contact::Model, ServiceError> {
        input.validate()?;
        let created = self.repo.create(input).await?;
        info!(id = created.id, "contact_created");
        Ok(created)
    }

    /// `status`, when given, must be one of `new`, `in_progress`, `done`.
    #[instrument(skip(self))]
    pub async fn get_all_contacts(&self, page: u32, limit: u32, status: Option<&str>) -> Result<Paged<contact::Model>, ServiceError> {
        let status = status.map(parse_status).transpose()?;
        let pagination = Pagination::new(page, limit);
        let (rows, total) = self.repo.list(pagination, status).await?;
        Ok(Paged::new(rows, total, pagination))
    }

    #[instrument(skip(self))]
    pub async fn get_contact_by_id(&self, id: i64) -> Result<contact::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("contact"))
    }

    #[instrument(skip(self, input))]
    pub async fn update_contact(&self, id: i64, input: ContactInput) -> Result<(), ServiceError> {
        input.validate()?;
        if !self.repo.update(id, input).await? {
            return Err(ServiceError::not_found("contact"));
        }
        info!("contact_updated");
        Ok(())
    }

    /// Any known status may follow any other.
    #[instrument(skip(self))]
    pub async fn update_contact_status(&self, id: i64, status: &str) -> Result<(), ServiceError> {
        let status = parse_status(status)?;
        if !self.repo.update_status(id, status).await? {
            return Err(ServiceError::not_found("contact"));
        }
        info!(%status, "contact_status_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_contact(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("contact"));
        }
        info!("contact_deleted");
        Ok(())
    }
}
