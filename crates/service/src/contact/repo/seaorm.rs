use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use common::pagination::Pagination;
use models::contact::{self, ContactStatus};

use crate::contact::domain::ContactInput;
use crate::contact::repository::ContactRepository;
use crate::errors::ServiceError;

pub struct SeaOrmContactRepository {
    db: DatabaseConnection,
}

impl SeaOrmContactRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl ContactRepository for SeaOrmContactRepository {
    async fn create(&self, input: ContactInput) -> Result<contact::Model, ServiceError> {
        let am = contact::ActiveModel {
            email: Set(input.email),
            subject: Set(input.subject),
            message: Set(input.message),
            status: Set(ContactStatus::New),
            created_at: Set(chrono::Utc::now().into()),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list(&self, page: Pagination, status: Option<ContactStatus>) -> Result<(Vec<contact::Model>, u64), ServiceError> {
        let (offset, limit) = page.offset_limit();
        let mut query = contact::Entity::find();
        if let Some(s) = status {
            query = query.filter(contact::Column::Status.eq(s));
        }
        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(contact::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<contact::Model>, ServiceError> {
        Ok(contact::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn update(&self, id: i64, input: ContactInput) -> Result<bool, ServiceError> {
        let res = contact::Entity::update_many()
            .col_expr(contact::Column::Email, Expr::value(input.email))
            .col_expr(contact::Column::Subject, Expr::value(input.subject))
            .col_expr(contact::Column::Message, Expr::value(input.message))
            .filter(contact::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn update_status(&self, id: i64, status: ContactStatus) -> Result<bool, ServiceError> {
        let res = contact::Entity::update_many()
            .col_expr(contact::Column::Status, Expr::value(status))
            .filter(contact::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = contact::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }
}
