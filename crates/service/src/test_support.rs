#![cfg(test)]
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

use crate::admin::password::PasswordConfig;
use crate::admin::service::AuthConfig;

/// Fresh in-memory SQLite database with every table created.
///
/// Each call gets its own database, so tests never share rows.
pub async fn setup_test_db() -> Result<DatabaseConnection, anyhow::Error> {
    common::utils::logging::init_test_logging();
    // one connection: every pooled in-memory connection would be a separate database
    let mut opt = ConnectOptions::new("sqlite::memory:");
    opt.max_connections(1).min_connections(1).sqlx_logging(false);
    let db = Database::connect(opt).await?;
    models::schema::create_tables(&db).await?;
    Ok(db)
}

/// Signing secret plus the cheapest Argon2 parameters, so hashing in tests is fast.
pub fn light_auth_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "test-secret".into(),
        password: PasswordConfig { memory_kib: 1024, iterations: 1, parallelism: 1 },
        ..Default::default()
    }
}
