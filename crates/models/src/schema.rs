//! Table bootstrap from entity definitions.
//!
//! Tables are created with `IF NOT EXISTS`, so running this on every start is
//! safe. Column changes on an existing database are not handled here.

use sea_orm::sea_query::{Expr, SimpleExpr, TableCreateStatement};
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection, DbErr, EntityTrait, Iterable, Schema};
use tracing::{debug, info};

use crate::{admin, article, contact, registration};

fn status_in<E, C>(column: C) -> SimpleExpr
where
    E: ActiveEnum<Value = String> + Iterable,
    C: sea_orm::sea_query::IntoColumnRef,
{
    Expr::col(column).is_in(E::iter().map(|s| s.to_value()))
}

fn table_for<E: EntityTrait>(schema: &Schema, entity: E) -> TableCreateStatement {
    let mut stmt = schema.create_table_from_entity(entity);
    stmt.if_not_exists();
    stmt
}

pub async fn create_tables(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let schema = Schema::new(backend);

    let admins = table_for(&schema, admin::Entity);

    let mut contacts = table_for(&schema, contact::Entity);
    contacts.check(status_in::<contact::ContactStatus, _>(contact::Column::Status));

    let mut registrations = table_for(&schema, registration::Entity);
    registrations.check(status_in::<registration::RegistrationStatus, _>(registration::Column::Status));

    let articles = table_for(&schema, article::Entity);

    for (name, stmt) in [("admins", &admins), ("contacts", &contacts), ("registrations", &registrations), ("articles", &articles)] {
        debug!(table = name, "ensuring table");
        db.execute(backend.build(stmt)).await?;
    }
    info!("database tables ensured");
    Ok(())
}
