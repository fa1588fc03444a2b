use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use dotenvy::dotenv;
use tracing::{error, info};

use configs::{AppConfig, LogFormat};
use service::admin::domain::AdminDto;
use service::admin::password::PasswordConfig;
use service::admin::repo::seaorm::SeaOrmAdminRepository;
use service::admin::service::AuthConfig;
use service::admin::AdminService;

fn auth_config(cfg: &configs::AuthConfig) -> anyhow::Result<AuthConfig> {
    let ttl_secs = cfg.token_ttl_hours.checked_mul(60 * 60).context("auth.token_ttl_hours is too large")?;
    Ok(AuthConfig {
        jwt_secret: cfg.jwt_secret.clone(),
        token_ttl: Duration::from_secs(ttl_secs),
        password: PasswordConfig {
            memory_kib: cfg.argon2_memory_kib,
            iterations: cfg.argon2_iterations,
            parallelism: cfg.argon2_parallelism,
        },
    })
}

async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let db = models::db::connect_with_config(&cfg.database).await.context("connect database")?;
    models::schema::create_tables(&db).await.context("create tables")?;

    let Some(seed) = cfg.bootstrap.superadmin else {
        info!(service = "bootstrap", event = "seed_skipped", "no bootstrap.superadmin configured");
        return Ok(());
    };

    let admins = AdminService::new(Arc::new(SeaOrmAdminRepository::new(db)), auth_config(&cfg.auth)?)?;
    let dto = AdminDto { username: seed.username, email: seed.email.clone(), password: seed.password, ..Default::default() };
    if admins.ensure_superadmin(dto).await? {
        info!(service = "bootstrap", event = "superadmin_created", email = %seed.email, "superadmin seeded");
    } else {
        info!(service = "bootstrap", event = "superadmin_present", "superadmin exists; seed left unused");
    }
    Ok(())
}

fn main() -> ExitCode {
    // load .env before reading config so DATABASE_URL / JWT_SECRET / RUST_LOG apply
    dotenv().ok();

    let cfg = match AppConfig::load_and_validate() {
        Ok(cfg) => cfg,
        Err(e) => {
            common::utils::logging::init_logging_default("info");
            error!(service = "bootstrap", event = "config_invalid", error = %e, "failed to load configuration");
            return ExitCode::FAILURE;
        }
    };
    common::utils::logging::init_logging(cfg.logging.format == LogFormat::Json, &cfg.logging.filter);

    let rt = match tokio::runtime::Builder::new_multi_thread().enable_all().build() {
        Ok(rt) => rt,
        Err(e) => {
            error!(service = "bootstrap", event = "runtime_build_failed", error = %e, "failed to build tokio runtime");
            return ExitCode::FAILURE;
        }
    };

    info!(service = "bootstrap", event = "start", version = env!("CARGO_PKG_VERSION"), pid = std::process::id(), "bootstrap starting");
    match rt.block_on(run(cfg)) {
        Ok(()) => {
            info!(service = "bootstrap", event = "done", "database ready");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(service = "bootstrap", event = "failed", error = %format!("{e:#}"), "bootstrap failed");
            ExitCode::FAILURE
        }
    }
}
