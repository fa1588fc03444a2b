use std::sync::Arc;
use std::time::Duration;

use tracing::{error, info, instrument, warn};

use common::pagination::{Paged, Pagination};
use models::admin::Role;

use super::domain::{AdminChanges, AdminDto, NewAdmin};
use super::password::{CredentialHasher, PasswordConfig};
use super::repository::AdminRepository;
use super::token::{Claims, TokenIssuer, DEFAULT_TTL};
use crate::errors::ServiceError;
use crate::policy::{self, Action};

/// Admin service configuration
#[derive(Clone)]
pub struct AuthConfig {
    pub jwt_secret: String,
    pub token_ttl: Duration,
    pub password: PasswordConfig,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { jwt_secret: String::new(), token_ttl: DEFAULT_TTL, password: PasswordConfig::default() }
    }
}

/// Admin business service independent of web framework
pub struct AdminService<R: AdminRepository> {
    repo: Arc<R>,
    hasher: CredentialHasher,
    tokens: TokenIssuer,
}

impl<R: AdminRepository> AdminService<R> {
    /// Fails only when the Argon2 cost parameters are out of range.
    pub fn new(repo: Arc<R>, cfg: AuthConfig) -> Result<Self, ServiceError> {
        Ok(Self {
            repo,
            hasher: CredentialHasher::new(cfg.password)?,
            tokens: TokenIssuer::new(&cfg.jwt_secret, cfg.token_ttl),
        })
    }

    /// Check email and password and issue a signed session token.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    /// use service::admin::{AdminService, domain::AdminDto, password::PasswordConfig, repository::mock::MockAdminRepository, service::AuthConfig};
    /// use models::admin::Role;
    ///
    /// let cfg = AuthConfig {
    ///     jwt_secret: "doc-secret".into(),
    ///     password: PasswordConfig { memory_kib: 1024, iterations: 1, parallelism: 1 },
    ///     ..Default::default()
    /// };
    /// let svc = AdminService::new(Arc::new(MockAdminRepository::default()), cfg).unwrap();
    /// let dto = AdminDto { username: "headmaster".into(), email: "head@school.test".into(), password: "s3cret!".into(), ..Default::default() };
    /// tokio_test::block_on(svc.create_admin(Role::Superadmin, dto)).unwrap();
    ///
    /// let (token, admin) = tokio_test::block_on(svc.authenticate_admin("head@school.test", "s3cret!")).unwrap();
    /// assert!(!token.is_empty());
    /// assert!(admin.password.is_empty());
    /// ```
    #[instrument(skip(self, password))]
    pub async fn authenticate_admin(&self, email: &str, password: &str) -> Result<(String, AdminDto), ServiceError> {
        if !self.tokens.is_configured() {
            error!("jwt secret not configured");
            return Err(ServiceError::Token("JWT secret is not configured".into()));
        }

        let admin = match self.repo.find_by_email(email).await? {
            Some(a) => a,
            None => {
                warn!("login for unknown email");
                return Err(ServiceError::InvalidCredentials);
            }
        };

        if !admin.is_active {
            warn!(id = admin.id, "login to inactive account");
            return Err(ServiceError::Inactive);
        }
        let matches = self.hasher.verify(password, &admin.password).unwrap_or_else(|e| {
            error!(id = admin.id, error = %e, "stored password hash is unreadable");
            false
        });
        if !matches {
            warn!(id = admin.id, "password mismatch");
            return Err(ServiceError::InvalidCredentials);
        }

        let token = self.tokens.issue(&admin)?;
        info!(id = admin.id, role = %admin.role, "admin_authenticated");
        Ok((token, AdminDto::from(admin)))
    }

    /// Decode a token issued by [`Self::authenticate_admin`].
    pub fn verify_token(&self, token: &str) -> Result<Claims, ServiceError> {
        self.tokens.verify(token)
    }

    #[instrument(skip(self, dto), fields(requester_role = %requester_role, email = %dto.email))]
    pub async fn create_admin(&self, requester_role: Role, dto: AdminDto) -> Result<AdminDto, ServiceError> {
        policy::authorize(requester_role, Action::ManageAdmins)?;
        dto.validate_for_create()?;

        if self.repo.find_by_email(&dto.email).await?.is_some() {
            warn!("email already registered");
            return Err(ServiceError::Conflict(format!("email {} already exists", dto.email)));
        }

        let new = NewAdmin {
            password_hash: self.hasher.hash(&dto.password)?,
            username: dto.username,
            email: dto.email,
            role: dto.role,
            is_active: dto.is_active.unwrap_or(true),
        };
        let created = self.repo.create(new).await?;
        info!(id = created.id, role = %created.role, "admin_created");
        Ok(created.into())
    }

    #[instrument(skip(self))]
    pub async fn get_all_admins(&self, page: u32, limit: u32) -> Result<Paged<AdminDto>, ServiceError> {
        let pagination = Pagination::new(page, limit);
        let (rows, total) = self.repo.list(pagination).await?;
        Ok(Paged::new(rows, total, pagination).map(AdminDto::from))
    }

    #[instrument(skip(self))]
    pub async fn get_admin_by_id(&self, id: i64) -> Result<AdminDto, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(AdminDto::from)
            .ok_or_else(|| ServiceError::not_found("admin"))
    }

    /// Overwrite username, email and role. `is_active` changes only when set;
    /// the password is re-hashed only when non-empty.
    #[instrument(skip(self, dto), fields(requester_role = %requester_role, id = dto.id))]
    pub async fn update_admin(&self, requester_role: Role, dto: AdminDto) -> Result<(), ServiceError> {
        policy::authorize(requester_role, Action::ManageAdmins)?;
        dto.validate_for_update()?;

        let password_hash = if dto.password.is_empty() { None } else { Some(self.hasher.hash(&dto.password)?) };
        let changes = AdminChanges { username: dto.username, email: dto.email, role: dto.role, is_active: dto.is_active, password_hash };
        if !self.repo.update(dto.id, changes).await? {
            return Err(ServiceError::not_found("admin"));
        }
        info!("admin_updated");
        Ok(())
    }

    #[instrument(skip(self), fields(requester_role = %requester_role))]
    pub async fn delete_admin(&self, requester_role: Role, id: i64) -> Result<(), ServiceError> {
        policy::authorize(requester_role, Action::ManageAdmins)?;
        if !self.repo.delete(id).await? {
            return Err(ServiceError::not_found("admin"));
        }
        info!("admin_deleted");
        Ok(())
    }

    /// Create `seed` as a superadmin unless one already exists.
    /// Returns whether an account was created.
    #[instrument(skip(self, seed), fields(email = %seed.email))]
    pub async fn ensure_superadmin(&self, seed: AdminDto) -> Result<bool, ServiceError> {
        if self.repo.count_by_role(Role::Superadmin).await? > 0 {
            info!("superadmin already present");
            return Ok(false);
        }
        let seed = AdminDto { role: Role::Superadmin, is_active: Some(true), ..seed };
        self.create_admin(Role::Superadmin, seed).await?;
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::admin::repository::mock::MockAdminRepository;
    use crate::test_support::light_auth_config;

    fn service() -> (Arc<MockAdminRepository>, AdminService<MockAdminRepository>) {
        let repo = Arc::new(MockAdminRepository::default());
        let svc = AdminService::new(repo.clone(), light_auth_config()).unwrap();
        (repo, svc)
    }

    fn dto(name: &str) -> AdminDto {
        AdminDto { username: name.into(), email: format!("{name}@school.test"), password: "s3cret!".into(), ..Default::default() }
    }

    #[tokio::test]
    async fn login_with_valid_credentials_returns_token_and_clean_dto() {
        let (_, svc) = service();
        let created = svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap();

        let (token, admin) = svc.authenticate_admin("registrar@school.test", "s3cret!").await.unwrap();
        assert!(!token.is_empty());
        assert!(admin.password.is_empty());
        assert_eq!(admin.id, created.id);

        let claims = svc.verify_token(&token).unwrap();
        assert_eq!(claims.admin_id, created.id);
        assert_eq!(claims.role, Role::Admin);
        assert_eq!(claims.exp - claims.iat, DEFAULT_TTL.as_secs() as i64);
    }

    #[tokio::test]
    async fn wrong_password_is_invalid_credentials() {
        let (_, svc) = service();
        svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap();
        let err = svc.authenticate_admin("registrar@school.test", "guess").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn unknown_email_is_invalid_credentials() {
        let (_, svc) = service();
        let err = svc.authenticate_admin("ghost@school.test", "s3cret!").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
    }

    #[tokio::test]
    async fn inactive_admin_cannot_log_in() {
        let (_, svc) = service();
        let created = svc.create_admin(Role::Superadmin, dto("retired")).await.unwrap();
        let update = AdminDto { id: created.id, password: String::new(), is_active: Some(false), ..dto("retired") };
        svc.update_admin(Role::Superadmin, update).await.unwrap();

        let err = svc.authenticate_admin("retired@school.test", "s3cret!").await.unwrap_err();
        assert!(matches!(err, ServiceError::Inactive));
        // inactive wins regardless of the password supplied
        let err = svc.authenticate_admin("retired@school.test", "wrong!!").await.unwrap_err();
        assert!(matches!(err, ServiceError::Inactive));

        let reactivate = AdminDto { id: created.id, password: String::new(), is_active: Some(true), ..dto("retired") };
        svc.update_admin(Role::Superadmin, reactivate).await.unwrap();
        let err = svc.authenticate_admin("retired@school.test", "wrong!!").await.unwrap_err();
        assert!(matches!(err, ServiceError::InvalidCredentials));
        assert!(svc.authenticate_admin("retired@school.test", "s3cret!").await.is_ok());
    }

    #[tokio::test]
    async fn missing_secret_fails_before_lookup() {
        let repo = Arc::new(MockAdminRepository::default());
        let svc = AdminService::new(repo.clone(), AuthConfig { jwt_secret: String::new(), ..light_auth_config() }).unwrap();
        repo.fail_lookups(true);
        let err = svc.authenticate_admin("a@school.test", "s3cret!").await.unwrap_err();
        assert!(matches!(err, ServiceError::Token(_)));
    }

    #[tokio::test]
    async fn plain_admin_cannot_create_and_nothing_is_written() {
        let (repo, svc) = service();
        let err = svc.create_admin(Role::Admin, dto("intruder")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Forbidden(_)));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn duplicate_email_is_conflict() {
        let (repo, svc) = service();
        svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap();
        let again = AdminDto { username: "registrar2".into(), ..dto("registrar") };
        let err = svc.create_admin(Role::Superadmin, again).await.unwrap_err();
        assert!(matches!(err, ServiceError::Conflict(_)));
        assert_eq!(repo.write_count(), 1);
    }

    #[tokio::test]
    async fn lookup_failure_during_duplicate_check_propagates() {
        let (repo, svc) = service();
        repo.fail_lookups(true);
        let err = svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap_err();
        assert!(matches!(err, ServiceError::Db(_)));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn invalid_dto_is_rejected_before_storage() {
        let (repo, svc) = service();
        let short = AdminDto { password: "123".into(), ..dto("registrar") };
        assert!(matches!(svc.create_admin(Role::Superadmin, short).await, Err(ServiceError::Validation(_))));
        assert_eq!(repo.write_count(), 0);
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let (repo, svc) = service();
        let created = svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap();
        let row = repo.find_by_id(created.id).await.unwrap().unwrap();
        assert_ne!(row.password, "s3cret!");
        assert!(row.password.starts_with("$argon2id$"));
    }

    #[tokio::test]
    async fn update_and_delete_missing_admin_are_not_found() {
        let (_, svc) = service();
        let update = AdminDto { id: 99, ..dto("nobody") };
        assert!(matches!(svc.update_admin(Role::Superadmin, update).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_admin(Role::Superadmin, 99).await, Err(ServiceError::NotFound(_))));
        assert!(matches!(svc.delete_admin(Role::Admin, 99).await, Err(ServiceError::Forbidden(_))));
    }

    #[tokio::test]
    async fn password_change_takes_effect() {
        let (_, svc) = service();
        let created = svc.create_admin(Role::Superadmin, dto("registrar")).await.unwrap();
        let update = AdminDto { id: created.id, password: "n3w-pass".into(), ..dto("registrar") };
        svc.update_admin(Role::Superadmin, update).await.unwrap();
        assert!(svc.authenticate_admin("registrar@school.test", "n3w-pass").await.is_ok());
        assert!(svc.authenticate_admin("registrar@school.test", "s3cret!").await.is_err());
    }

    #[tokio::test]
    async fn listing_strips_passwords_and_pages_newest_first() {
        let (_, svc) = service();
        for name in ["alpha", "bravo", "charlie"] {
            svc.create_admin(Role::Superadmin, dto(name)).await.unwrap();
        }
        let page = svc.get_all_admins(1, 2).await.unwrap();
        assert_eq!(page.total, 3);
        assert_eq!(page.items.iter().map(|a| a.username.as_str()).collect::<Vec<_>>(), ["charlie", "bravo"]);
        assert!(page.items.iter().all(|a| a.password.is_empty()));

        let one = svc.get_admin_by_id(page.items[0].id).await.unwrap();
        assert!(one.password.is_empty());
        assert!(matches!(svc.get_admin_by_id(404).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn ensure_superadmin_runs_once() {
        let (repo, svc) = service();
        assert!(svc.ensure_superadmin(dto("root")).await.unwrap());
        assert!(!svc.ensure_superadmin(dto("root")).await.unwrap());
        assert_eq!(repo.count_by_role(Role::Superadmin).await.unwrap(), 1);
        let (_, root) = svc.authenticate_admin("root@school.test", "s3cret!").await.unwrap();
        assert_eq!(root.role, Role::Superadmin);
    }
}
