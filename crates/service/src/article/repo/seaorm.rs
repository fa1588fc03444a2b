use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use common::pagination::Pagination;
use models::article;

use crate::article::domain::{ArticleChanges, NewArticle};
use crate::article::repository::ArticleRepository;
use crate::errors::ServiceError;

pub struct SeaOrmArticleRepository {
    db: DatabaseConnection,
}

impl SeaOrmArticleRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ArticleRepository for SeaOrmArticleRepository {
    async fn create(&self, new: NewArticle) -> Result<article::Model, ServiceError> {
        let now = chrono::Utc::now().into();
        let am = article::ActiveModel {
            title: Set(new.title),
            content: Set(new.content),
            author: Set(new.author),
            status: Set(article::DEFAULT_STATUS.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list(&self, page: Pagination, status: Option<&str>) -> Result<(Vec<article::Model>, u64), ServiceError> {
        let (offset, limit) = page.offset_limit();
        let mut query = article::Entity::find();
        if let Some(s) = status {
            query = query.filter(article::Column::Status.eq(s));
        }
        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(article::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<article::Model>, ServiceError> {
        Ok(article::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: i64, changes: ArticleChanges) -> Result<bool, ServiceError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let res = article::Entity::update_many()
            .col_expr(article::Column::Title, Expr::value(changes.title))
            .col_expr(article::Column::Content, Expr::value(changes.content))
            .col_expr(article::Column::Status, Expr::value(changes.status))
            .col_expr(article::Column::UpdatedAt, Expr::value(now))
            .filter(article::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = article::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::setup_test_db;
    use serde_json::json;

    #[tokio::test]
    async fn json_content_survives_storage() -> anyhow::Result<()> {
        let repo = SeaOrmArticleRepository::new(setup_test_db().await?);
        let body = json!({"blocks": [{"type": "paragraph", "text": "Welcome back"}]});
        let a = repo.create(NewArticle { title: "Term starts".into(), content: body.clone(), author: "Office".into() }).await?;
        assert_eq!(a.status, "draft");

        let row = repo.find_by_id(a.id).await?.expect("row");
        assert_eq!(row.content, body);
        Ok(())
    }

    #[tokio::test]
    async fn update_and_status_filter() -> anyhow::Result<()> {
        let repo = SeaOrmArticleRepository::new(setup_test_db().await?);
        for n in 1..=3 {
            repo.create(NewArticle { title: format!("post {n}"), content: json!({}), author: "Office".into() }).await?;
        }
        let changes = ArticleChanges { title: "post 2 (final)".into(), content: json!({"v": 2}), status: "published".into() };
        assert!(repo.update(2, changes.clone()).await?);
        assert!(!repo.update(99, changes).await?);

        let (published, total) = repo.list(Pagination::new(1, 10), Some("published")).await?;
        assert_eq!(total, 1);
        assert_eq!(published[0].title, "post 2 (final)");

        let (drafts, total) = repo.list(Pagination::new(1, 10), Some("draft")).await?;
        assert_eq!(total, 2);
        assert_eq!(drafts.iter().map(|a| a.id).collect::<Vec<_>>(), vec![3, 1]);

        assert!(repo.delete(1).await?);
        assert!(!repo.delete(1).await?);
        Ok(())
    }
}
