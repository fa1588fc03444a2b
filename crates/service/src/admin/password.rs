use argon2::{password_hash::SaltString, Algorithm, Argon2, Params, PasswordHash, PasswordHasher, PasswordVerifier, Version};
use rand::rngs::OsRng;

use crate::errors::ServiceError;

/// Argon2id cost parameters.
#[derive(Debug, Clone, Copy)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self { memory_kib: Params::DEFAULT_M_COST, iterations: Params::DEFAULT_T_COST, parallelism: Params::DEFAULT_P_COST }
    }
}

/// Salted one-way hashing of admin passwords (PHC string output).
#[derive(Clone)]
pub struct CredentialHasher {
    argon: Argon2<'static>,
}

impl CredentialHasher {
    pub fn new(cfg: PasswordConfig) -> Result<Self, ServiceError> {
        let params = Params::new(cfg.memory_kib, cfg.iterations, cfg.parallelism, None)
            .map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(Self { argon: Argon2::new(Algorithm::Argon2id, Version::V0x13, params) })
    }

    pub fn hash(&self, plain: &str) -> Result<String, ServiceError> {
        let salt = SaltString::generate(&mut OsRng);
        let hash = self.argon
            .hash_password(plain.as_bytes(), &salt)
            .map_err(|e| ServiceError::Hash(e.to_string()))?
            .to_string();
        Ok(hash)
    }

    /// `Ok(false)` on mismatch; `Err` only when the stored hash cannot be parsed.
    pub fn verify(&self, plain: &str, stored: &str) -> Result<bool, ServiceError> {
        let parsed = PasswordHash::new(stored).map_err(|e| ServiceError::Hash(e.to_string()))?;
        Ok(self.argon.verify_password(plain.as_bytes(), &parsed).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hasher() -> CredentialHasher {
        CredentialHasher::new(PasswordConfig { memory_kib: 1024, iterations: 1, parallelism: 1 }).unwrap()
    }

    #[test]
    fn hash_then_verify() {
        let h = hasher();
        let stored = h.hash("open sesame").unwrap();
        assert!(stored.starts_with("$argon2id$"));
        assert!(h.verify("open sesame", &stored).unwrap());
        assert!(!h.verify("open sesam", &stored).unwrap());
    }

    #[test]
    fn same_password_gets_distinct_salts() {
        let h = hasher();
        assert_ne!(h.hash("pw123456").unwrap(), h.hash("pw123456").unwrap());
    }

    #[test]
    fn garbage_hash_is_an_error() {
        assert!(matches!(hasher().verify("pw", "not-a-phc-string"), Err(ServiceError::Hash(_))));
    }

    #[test]
    fn rejects_impossible_params() {
        assert!(CredentialHasher::new(PasswordConfig { memory_kib: 1, iterations: 1, parallelism: 1 }).is_err());
    }
}
