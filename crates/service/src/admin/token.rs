use std::time::Duration;

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use models::admin::{self, Role};

use crate::errors::ServiceError;

pub const DEFAULT_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// Signed claim set carried by admin session tokens.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claims {
    pub admin_id: i64,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

/// HS256 issuer/verifier for admin tokens.
#[derive(Clone)]
pub struct TokenIssuer {
    secret: Vec<u8>,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(secret: &str, ttl: Duration) -> Self {
        Self { secret: secret.as_bytes().to_vec(), ttl }
    }

    pub fn is_configured(&self) -> bool { !self.secret.is_empty() }

    pub fn issue(&self, admin: &admin::Model) -> Result<String, ServiceError> {
        if !self.is_configured() {
            return Err(ServiceError::Token("JWT secret is not configured".into()));
        }
        let iat = chrono::Utc::now().timestamp();
        let claims = Claims { admin_id: admin.id, role: admin.role, iat, exp: iat + self.ttl.as_secs() as i64 };
        encode(&Header::new(Algorithm::HS256), &claims, &EncodingKey::from_secret(&self.secret))
            .map_err(|e| ServiceError::Token(e.to_string()))
    }

    /// Check signature and expiry, returning the claims.
    pub fn verify(&self, token: &str) -> Result<Claims, ServiceError> {
        if !self.is_configured() {
            return Err(ServiceError::Token("JWT secret is not configured".into()));
        }
        let data = decode::<Claims>(token, &DecodingKey::from_secret(&self.secret), &Validation::new(Algorithm::HS256))
            .map_err(|e| ServiceError::Token(e.to_string()))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn admin(id: i64, role: Role) -> admin::Model {
        let now = chrono::Utc::now().into();
        admin::Model { id, username: "ops".into(), email: "ops@school.test".into(), password: String::new(), role, is_active: true, created_at: now, updated_at: now }
    }

    #[test]
    fn issued_token_carries_id_role_and_ttl() {
        let issuer = TokenIssuer::new("k3y", DEFAULT_TTL);
        let token = issuer.issue(&admin(42, Role::Superadmin)).unwrap();
        let claims = issuer.verify(&token).unwrap();
        assert_eq!(claims.admin_id, 42);
        assert_eq!(claims.role, Role::Superadmin);
        assert_eq!(claims.exp - claims.iat, 24 * 60 * 60);
    }

    #[test]
    fn token_from_another_secret_is_rejected() {
        let token = TokenIssuer::new("a", DEFAULT_TTL).issue(&admin(1, Role::Admin)).unwrap();
        assert!(matches!(TokenIssuer::new("b", DEFAULT_TTL).verify(&token), Err(ServiceError::Token(_))));
    }

    #[test]
    fn expired_token_is_rejected() {
        let issuer = TokenIssuer::new("k3y", DEFAULT_TTL);
        let past = chrono::Utc::now().timestamp() - 3600;
        let claims = Claims { admin_id: 1, role: Role::Admin, iat: past - 60, exp: past };
        let token = encode(&Header::default(), &claims, &EncodingKey::from_secret(b"k3y")).unwrap();
        assert!(issuer.verify(&token).is_err());
    }

    #[test]
    fn empty_secret_refuses_to_sign() {
        let issuer = TokenIssuer::new("", DEFAULT_TTL);
        assert!(matches!(issuer.issue(&admin(1, Role::Admin)), Err(ServiceError::Token(_))));
    }
}
