use async_trait::async_trait;

use common::pagination::Pagination;
use models::admin::{self, Role};

use super::domain::{AdminChanges, NewAdmin};
use crate::errors::ServiceError;

/// Repository abstraction for admin persistence.
///
/// Missing rows are reported as `None`/`false`; the service decides whether
/// that is an error.
#[async_trait]
pub trait AdminRepository: Send + Sync {
    async fn create(&self, new: NewAdmin) -> Result<admin::Model, ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<admin::Model>, ServiceError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<admin::Model>, ServiceError>;
    /// Newest first, with the total row count.
    async fn list(&self, page: Pagination) -> Result<(Vec<admin::Model>, u64), ServiceError>;
    async fn update(&self, id: i64, changes: AdminChanges) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
    async fn count_by_role(&self, role: Role) -> Result<u64, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockAdminRepository {
        rows: Mutex<Vec<admin::Model>>,
        writes: AtomicUsize,
        fail_lookups: AtomicBool,
    }

    impl MockAdminRepository {
        /// Number of create/update/delete calls that reached the repository.
        pub fn write_count(&self) -> usize { self.writes.load(Ordering::SeqCst) }

        /// Make every lookup fail with a storage error.
        pub fn fail_lookups(&self, on: bool) { self.fail_lookups.store(on, Ordering::SeqCst) }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<admin::Model>>, ServiceError> {
            self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))
        }

        fn check_lookup(&self) -> Result<(), ServiceError> {
            if self.fail_lookups.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            Ok(())
        }
    }

    #[async_trait]
    impl AdminRepository for MockAdminRepository {
        async fn create(&self, new: NewAdmin) -> Result<admin::Model, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows()?;
            if rows.iter().any(|a| a.email == new.email || a.username == new.username) {
                return Err(ServiceError::Conflict("admins.email".into()));
            }
            let now = chrono::Utc::now().into();
            let model = admin::Model {
                id: rows.iter().map(|a| a.id).max().unwrap_or(0) + 1,
                username: new.username,
                email: new.email,
                password: new.password_hash,
                role: new.role,
                is_active: new.is_active,
                created_at: now,
                updated_at: now,
            };
            rows.push(model.clone());
            Ok(model)
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<admin::Model>, ServiceError> {
            self.check_lookup()?;
            Ok(self.rows()?.iter().find(|a| a.id == id).cloned())
        }

        async fn find_by_email(&self, email: &str) -> Result<Option<admin::Model>, ServiceError> {
            self.check_lookup()?;
            Ok(self.rows()?.iter().find(|a| a.email == email).cloned())
        }

        async fn list(&self, page: Pagination) -> Result<(Vec<admin::Model>, u64), ServiceError> {
            self.check_lookup()?;
            let (offset, limit) = page.offset_limit();
            let mut rows = self.rows()?.clone();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            let total = rows.len() as u64;
            Ok((rows.into_iter().skip(offset as usize).take(limit as usize).collect(), total))
        }

        async fn update(&self, id: i64, changes: AdminChanges) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows()?;
            if rows.iter().any(|a| a.id != id && (a.email == changes.email || a.username == changes.username)) {
                return Err(ServiceError::Conflict("admins.email".into()));
            }
            let Some(row) = rows.iter_mut().find(|a| a.id == id) else { return Ok(false) };
            row.username = changes.username;
            row.email = changes.email;
            row.role = changes.role;
            if let Some(active) = changes.is_active { row.is_active = active; }
            if let Some(hash) = changes.password_hash { row.password = hash; }
            row.updated_at = chrono::Utc::now().into();
            Ok(true)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            self.writes.fetch_add(1, Ordering::SeqCst);
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|a| a.id != id);
            Ok(rows.len() != before)
        }

        async fn count_by_role(&self, role: Role) -> Result<u64, ServiceError> {
            self.check_lookup()?;
            Ok(self.rows()?.iter().filter(|a| a.role == role).count() as u64)
        }
    }
}
