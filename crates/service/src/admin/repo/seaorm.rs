use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use common::pagination::Pagination;
use models::admin::{self, Role};

use crate::admin::domain::{AdminChanges, NewAdmin};
use crate::admin::repository::AdminRepository;
use crate::errors::ServiceError;

pub struct SeaOrmAdminRepository {
    db: DatabaseConnection,
}

impl SeaOrmAdminRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait::async_trait]
impl AdminRepository for SeaOrmAdminRepository {
    async fn create(&self, new: NewAdmin) -> Result<admin::Model, ServiceError> {
        let now = chrono::Utc::now().into();
        let am = admin::ActiveModel {
            username: Set(new.username),
            email: Set(new.email),
            password: Set(new.password_hash),
            role: Set(new.role),
            is_active: Set(new.is_active),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<admin::Model>, ServiceError> {
        Ok(admin::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<admin::Model>, ServiceError> {
        let found = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(&self.db)
            .await?;
        Ok(found)
    }

    async fn list(&self, page: Pagination) -> Result<(Vec<admin::Model>, u64), ServiceError> {
        let (offset, limit) = page.offset_limit();
        let query = admin::Entity::find();
        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(admin::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn update(&self, id: i64, changes: AdminChanges) -> Result<bool, ServiceError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let mut stmt = admin::Entity::update_many()
            .col_expr(admin::Column::Username, Expr::value(changes.username))
            .col_expr(admin::Column::Email, Expr::value(changes.email))
            .col_expr(admin::Column::Role, Expr::value(changes.role))
            .col_expr(admin::Column::UpdatedAt, Expr::value(now));
        if let Some(active) = changes.is_active {
            stmt = stmt.col_expr(admin::Column::IsActive, Expr::value(active));
        }
        if let Some(hash) = changes.password_hash {
            stmt = stmt.col_expr(admin::Column::Password, Expr::value(hash));
        }
        let res = stmt.filter(admin::Column::Id.eq(id)).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = admin::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn count_by_role(&self, role: Role) -> Result<u64, ServiceError> {
        let n = admin::Entity::find()
            .filter(admin::Column::Role.eq(role))
            .count(&self.db)
            .await?;
        Ok(n)
    }
}
