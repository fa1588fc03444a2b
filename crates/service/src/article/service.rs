use std::sync::Arc;

use tracing::{info, instrument};

use common::pagination::{Paged, Pagination};
use models::article;

use super::domain::{ArticleChanges, NewArticle};
use super::repository::ArticleRepository;
use crate::errors::ServiceError;

pub struct ArticleService<R: ArticleRepository> {
    repo: Arc<R>,
}

impl<R: ArticleRepository> ArticleService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    #[instrument(skip(self, new), fields(title = %new.title, author = %new.author))]
    pub async fn create_article(&self, new: NewArticle) -> Result<article::Model, ServiceError> {
        new.check()?;
        let created = self.repo.create(new).await?;
        info!(id = created.id, "article_created");
        Ok(created)
    }

    /// `status` is matched verbatim; articles have no fixed status set.
    #[instrument(skip(self))]
    pub async fn get_all_articles(&self, page: u32, limit: u32, status: Option<&str>) -> Result<Paged<article::Model>, ServiceError> {
        let pagination = Pagination::new(page, limit);
        let (rows, total) = self.repo.list(pagination, status).await?;
        Ok(Paged::new(rows, total, pagination))
    }

    #[instrument(skip(self))]
    pub async fn get_article_by_id(&self, id: i64) -> Result<article::Model, ServiceError> {
        self.repo.find_by_id(id).await?.ok_or_else(|| ServiceError::not_found("article"))
    }

    #[instrument(skip(self, changes), fields(status = %changes.status))]
    pub async fn update_article(&self, id: i64, changes: ArticleChanges) -> Result<(), ServiceError> {
        changes.check()?;
        if !self.repo.update(id, changes).await? {
            return Err(ServiceError::not_found("article"));
        }
        info!("article_updated");
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn delete_article(&self, id: i64) -> Result<(), ServiceError> {
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("article"));
        }
        info!("article_deleted");
        Ok(())
    }
}
