use async_trait::async_trait;

use common::pagination::Pagination;
use models::article;

use super::domain::{ArticleChanges, NewArticle};
use crate::errors::ServiceError;

#[async_trait]
pub trait ArticleRepository: Send + Sync {
    /// New articles start as drafts.
    async fn create(&self, new: NewArticle) -> Result<article::Model, ServiceError>;
    async fn list(&self, page: Pagination, status: Option<&str>) -> Result<(Vec<article::Model>, u64), ServiceError>;
    async fn find_by_id(&self, id: i64) -> Result<Option<article::Model>, ServiceError>;
    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<bool, ServiceError>;
    async fn delete(&self, id: i64) -> Result<bool, ServiceError>;
}

/// Simple in-memory mock repository for tests
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Mutex, MutexGuard};

    #[derive(Default)]
    pub struct MockArticleRepository {
        rows: Mutex<Vec<article::Model>>,
        calls: AtomicUsize,
    }

    impl MockArticleRepository {
        pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }

        fn rows(&self) -> Result<MutexGuard<'_, Vec<article::Model>>, ServiceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.rows.lock().map_err(|_| ServiceError::Db("mock lock poisoned".into()))
        }
    }

    #[async_trait]
    impl ArticleRepository for MockArticleRepository {
        async fn create(&self, new: NewArticle) -> Result<article::Model, ServiceError> {
            let mut rows = self.rows()?;
            let now = chrono::Utc::now().into();
            let model = article::Model {
                id: rows.iter().map(|a| a.id).max().unwrap_or(0) + 1,
                title: new.title,
                content: new.content,
                author: new.author,
                status: article::DEFAULT_STATUS.to_string(),
                created_at: now,
                updated_at: now,
            };
            rows.push(model.clone());
            Ok(model)
        }

        async fn list(&self, page: Pagination, status: Option<&str>) -> Result<(Vec<article::Model>, u64), ServiceError> {
            let (offset, limit) = page.offset_limit();
            let mut rows: Vec<_> = self.rows()?.iter().filter(|a| status.map_or(true, |s| a.status == s)).cloned().collect();
            rows.sort_by(|a, b| b.id.cmp(&a.id));
            let total = rows.len() as u64;
            Ok((rows.into_iter().skip(offset as usize).take(limit as usize).collect(), total))
        }

        async fn find_by_id(&self, id: i64) -> Result<Option<article::Model>, ServiceError> {
            Ok(self.rows()?.iter().find(|a| a.id == id).cloned())
        }

        async fn update(&self, id: i64, changes: ArticleChanges) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let Some(row) = rows.iter_mut().find(|a| a.id == id) else { return Ok(false) };
            row.title = changes.title;
            row.content = changes.content;
            row.status = changes.status;
            row.updated_at = chrono::Utc::now().into();
            Ok(true)
        }

        async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
            let mut rows = self.rows()?;
            let before = rows.len();
            rows.retain(|a| a.id != id);
            Ok(rows.len() != before)
        }
    }
}
