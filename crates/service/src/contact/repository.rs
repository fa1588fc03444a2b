use async_trait::async_trait;

use common::pagination::Pagination;
use models::contact::{self, ContactStatus};

use super::domain::ContactInput;
use crate::errors::ServiceError;

#[async_trait]
pub trait ContactRepository: Send + Sync {
    /// New rows start in [`ContactStatus::New`].
    async fn create(&self, input: ContactInput) -> Result<contact::Model, ServiceError>;
    async fn list(&self, page: Pagination, status: Option<ContactStatus>) -> Result<(Vec<contact::Model>, u64), ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<contact::Model>, ServiceError>;
    async fn update(&self, id: i64, input: ContactInput) -> Result<bool, ServiceError>;
    async fn update_status(&self, id: i64, status: ContactStatus) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockContactRepository {
        rows: Mutex<Vec<contact::Model>>,
        calls: AtomicUsize,
    }

    impl MockContactRepository {
        /// Total number of repository calls made so far.
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<contact::Model>>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))
        }
    }

    #[async_trait]
    impl ContactRepository for MockContactRepository {
        async fn create(&self, input: ContactInput) -> Result<contact::Model, ServiceError> {
            let mut rows = self.rows()?;
            let model = contact::Model {
                id: rows.iter().map(|c| c.id).max().unwrap_or(0) + 1,
                email: input.email,
                subject: input.subject,
                message: input.message,
                status: ContactStatus::New,
                created_at: chrono::Utc::now().into(),
            };
            rows.push(model.clone());
            Ok(model)
        }

        async fn list(&self, page: Pagination, status: Option<ContactStatus>) -> Result<(Vec<contact::Model>, u64), ServiceError> {
            let (offset, limit) = page.offset_limit();
            let mut rows: Vec<_> = self.rows()?.iter().filter(|c| status.map_or(true, |s| c.status == s)).cloned().collect();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            let total = rows.len() as u64;
            Ok((rows.into_iter().skip(offset as usize).take(limit as usize).collect(), total))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<contact::Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|c| c.id == id).cloned())
        }

        async fn update(&self, id: i64, input: ContactInput) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let Some(row) = rows.iter_mut().find(|c| c.id == id) else { return Ok(false) };
            row.email = input.email;
            row.subject = input.subject;
            row.message = input.message;
            Ok(true)
        }

        async fn update_status(&self, id: i64, status: ContactStatus) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let Some(row) = rows.iter_mut().find(|c| c.id == id) else { return Ok(false) };
            row.status = status;
            Ok(true)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|c| c.id != id);
            Ok(rows.len() != before)
        }
    }
}
