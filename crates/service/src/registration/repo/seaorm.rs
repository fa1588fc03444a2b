use sea_orm::sea_query::Expr;
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Set};

use common::pagination::Pagination;
use models::registration::{self, RegistrationStatus};

use crate::errors::ServiceError;
use crate::registration::domain::RegistrationInput;
use crate::registration::repository::RegistrationRepository;

pub struct SeaOrmRegistrationRepository {
    db: DatabaseConnection,
}

impl SeaOrmRegistrationRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }

    async fn find_one(&self, col: registration::Column, value: &str) -> Result<Option<registration::Model>, ServiceError> {
        Ok(registration::Entity::find().filter(col.eq(value)).one(&self.db).await?)
    }

    async fn exists(&self, col: registration::Column, value: &str) -> Result<bool, ServiceError> {
        let n = registration::Entity::find().filter(col.eq(value)).count(&self.db).await?;
        Ok(n > 0)
    }
}

#[async_trait::async_trait]
impl RegistrationRepository for SeaOrmRegistrationRepository {
    async fn create(&self, input: RegistrationInput) -> Result<registration::Model, ServiceError> {
        let now = chrono::Utc::now().into();
        let am = registration::ActiveModel {
            email: Set(input.email),
            nisn: Set(input.nisn),
            full_name: Set(input.full_name),
            gender: Set(input.gender),
            birth_place: Set(input.birth_place),
            birth_date: Set(input.birth_date),
            parent_name: Set(input.parent_name),
            phone: Set(input.phone),
            address: Set(input.address),
            previous_school: Set(input.previous_school),
            status: Set(input.status.unwrap_or_default()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };
        Ok(am.insert(&self.db).await?)
    }

    async fn list(&self, page: Pagination, status: Option<RegistrationStatus>) -> Result<(Vec<registration::Model>, u64), ServiceError> {
        let (offset, limit) = page.offset_limit();
        let mut query = registration::Entity::find();
        if let Some(s) = status {
            query = query.filter(registration::Column::Status.eq(s));
        }
        let total = query.clone().count(&self.db).await?;
        let rows = query
            .order_by_desc(registration::Column::Id)
            .offset(offset)
            .limit(limit)
            .all(&self.db)
            .await?;
        Ok((rows, total))
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<registration::Model>, ServiceError> {
        Ok(registration::Entity::find_by_id(id).one(&self.db).await?)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<registration::Model>, ServiceError> {
        self.find_one(registration::Column::Email, email).await
    }

    async fn find_by_nisn(&self, nisn: &str) -> Result<Option<registration::Model>, ServiceError> {
        self.find_one(registration::Column::Nisn, nisn).await
    }

    async fn update(&self, id: i64, input: RegistrationInput) -> Result<bool, ServiceError> {
        use registration::Column as C;
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let mut stmt = registration::Entity::update_many()
            .col_expr(C::Email, Expr::value(input.email))
            .col_expr(C::Nisn, Expr::value(input.nisn))
            .col_expr(C::FullName, Expr::value(input.full_name))
            .col_expr(C::Gender, Expr::value(input.gender))
            .col_expr(C::BirthPlace, Expr::value(input.birth_place))
            .col_expr(C::BirthDate, Expr::value(input.birth_date))
            .col_expr(C::ParentName, Expr::value(input.parent_name))
            .col_expr(C::Phone, Expr::value(input.phone))
            .col_expr(C::Address, Expr::value(input.address))
            .col_expr(C::PreviousSchool, Expr::value(input.previous_school))
            .col_expr(C::UpdatedAt, Expr::value(now));
        if let Some(s) = input.status {
            stmt = stmt.col_expr(C::Status, Expr::value(s));
        }
        let res = stmt.filter(C::Id.eq(id)).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn update_status(&self, id: i64, status: RegistrationStatus) -> Result<bool, ServiceError> {
        let now: sea_orm::prelude::DateTimeWithTimeZone = chrono::Utc::now().into();
        let res = registration::Entity::update_many()
            .col_expr(registration::Column::Status, Expr::value(status))
            .col_expr(registration::Column::UpdatedAt, Expr::value(now))
            .filter(registration::Column::Id.eq(id))
            .exec(&self.db)
            .await?;
        Ok(res.rows_affected > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, ServiceError> {
        let res = registration::Entity::delete_by_id(id).exec(&self.db).await?;
        Ok(res.rows_affected > 0)
    }

    async fn exists_by_email(&self, email: &str) -> Result<bool, ServiceError> {
        self.exists(registration::Column::Email, email).await
    }

    async fn exists_by_nisn(&self, nisn: &str) -> Result<bool, ServiceError> {
        self.exists(registration::Column::Nisn, nisn).await
    }
}
