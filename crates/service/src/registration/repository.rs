use async_trait::async_trait;

use common::pagination::Pagination;
use models::registration::{self, RegistrationStatus};

use super::domain::RegistrationInput;
use crate::errors::ServiceError;

#[async_trait]
pub trait RegistrationRepository: Send + Sync {
    /// Insert with `input.status`, or [`RegistrationStatus::New`] when unset.
    async fn create(&self, input: RegistrationInput) -> Result<registration::Model, ServiceError>;
    async fn list(&self, page: Pagination, status: Option<RegistrationStatus>) -> Result<(Vec<registration::Model>, u64), ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<registration::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<registration::Model>, ServiceError>;
    async fn find_by_nisn(&self, nisn: &str) -> Result<Option<registration::Model>, ServiceError>;
    /// Overwrites every form field; status only when `input.status` is set.
    async fn update(&self, id: i64, input: RegistrationInput) -> Result<bool, ServiceError>;
    async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError>;
    async fn exists_by_nisn(&self, nisn: &str) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockRegistrationRepository {
        rows: Mutex<Vec<registration::Model>>,
        calls: AtomicUsize,
    }

    impl MockRegistrationRepository {
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<registration::Model>>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))
        }
    }

    fn clashes(rows: &[registration::Model], id: i64, input: &RegistrationInput) -> bool {
        rows.iter().any(|r| r.id != id && (r.email == input.email || r.nisn == input.nisn))
    }

    #[async_trait]
    impl RegistrationRepository for MockRegistrationRepository {
        async fn create(&self, input: RegistrationInput) -> Result<registration::Model, ServiceError> {
            let mut rows = self.rows()?;
            if clashes(&rows, 0, &input) {
                return Err(ServiceError::Conflict("registrations.email".into()));
            }
            let now = chrono::Utc::now().into();
            let model = registration::Model {
                id: rows.iter().map(|r| r.id).max().unwrap_or(0) + 1,
                email: input.email,
                nisn: input.nisn,
                full_name: input.full_name,
                gender: input.gender,
                birth_place: input.birth_place,
                birth_date: input.birth_date,
                parent_name: input.parent_name,
                phone: input.phone,
                address: input.address,
                previous_school: input.previous_school,
                status: input.status.unwrap_or_default(),
                created_at: now,
                updated_at: now,
            };
            rows.push(model.clone());
            Ok(model)
        }

        async fn list(&self, page: Pagination, status: Option<RegistrationStatus>) -> Result<(Vec<registration::Model>, u64), ServiceError> {
            let (offset, limit) = page.offset_limit();
            let mut rows: Vec<_> = self.rows()?.iter().filter(|r| status.map_or(true, |s| r.status == s)).cloned().collect();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            let total = rows.len() as u64;
            Ok((rows.into_iter().skip(offset as usize).take(limit as usize).collect(), total))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<registration::Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|r| r.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<registration::Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|r| r.email == email).cloned())
        }

        async fn find_by_nisn(&self, nisn: &str) -> Result<Option<registration::Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|r| r.nisn == nisn).cloned())
        }

        async fn update(&self, id: i64, input: RegistrationInput) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            if clashes(&rows, id, &input) {
                return Err(ServiceError::Conflict("registrations.email".into()));
            }
            let Some(row) = rows.iter_mut().find(|r| r.id == id) else { return Ok(false) };
            row.email = input.email;
            row.nisn = input.nisn;
            row.full_name = input.full_name;
            row.gender = input.gender;
            row.birth_place = input.birth_place;
            row.birth_date = input.birth_date;
            row.parent_name = input.parent_name;
            row.phone = input.phone;
            row.address = input.address;
            row.previous_school = input.previous_school;
            if let Some(s) = input.status { row.status = s; }
            row.updated_at = chrono::Utc::now().into();
            Ok(true)
        }

        async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let Some(row) = rows.iter_mut().find(|r| r.id == id) else { return Ok(false) };
            row.status = status;
            row.updated_at = chrono::Utc::now().into();
            Ok(true)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|r| r.id != id);
            Ok(rows.len() != before)
        }

        async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
            Ok(self.rows()?.iter().any(|r| r.email == email))
        }

        async fn exists_by_nisn(&self, nisn: &str) -> Result<bool, ServiceError> {
            Ok(self.rows()?.iter().any(|r| r.nisn == nisn))
        }
    }
}
