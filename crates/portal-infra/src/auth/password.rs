//! Argon2 password hashing implementation.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use async_trait::async_trait;

use portal_core::ports::{AuthError, PasswordService};

/// Argon2id password service.
///
/// Hashing is CPU-bound, so both operations run on the blocking pool.
#[derive(Clone)]
pub struct Argon2PasswordService {
    argon2: Argon2<'static>,
}

impl Argon2PasswordService {
    pub fn new() -> Self {
        Self {
            argon2: Argon2::default(),
        }
    }
}

impl Default for Argon2PasswordService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PasswordService for Argon2PasswordService {
    async fn hash(&self, password: &str) -> Result<String, AuthError> {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();

        tokio::task::spawn_blocking(move || {
            let salt = SaltString::generate(&mut OsRng);
            argon2
                .hash_password(password.as_bytes(), &salt)
                .map(|h| h.to_string())
                .map_err(|e| AuthError::HashingError(e.to_string()))
        })
        .await
        .map_err(|e| AuthError::HashingError(e.to_string()))?
    }

    async fn verify(&self, password: &str, hash: &str) -> bool {
        let argon2 = self.argon2.clone();
        let password = password.to_owned();
        let hash = hash.to_owned();

        let outcome = tokio::task::spawn_blocking(move || {
            let Ok(parsed_hash) = PasswordHash::new(&hash) else {
                tracing::warn!("Stored password hash is malformed");
                return false;
            };
            argon2
                .verify_password(password.as_bytes(), &parsed_hash)
                .is_ok()
        })
        .await;

        outcome.unwrap_or_else(|e| {
            tracing::error!(error = %e, "Password verification task failed");
            false
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_hash_and_verify() {
        let service = Argon2PasswordService::new();
        let password = "secure_password_123";

        let hash = service.hash(password).await.unwrap();
        assert!(service.verify(password, &hash).await);
        assert!(!service.verify("wrong_password", &hash).await);
    }

    #[tokio::test]
    async fn test_one_character_off_is_rejected() {
        let service = Argon2PasswordService::new();
        let hash = service.hash("TestPassword123!").await.unwrap();

        assert!(!service.verify("TestPassword123", &hash).await);
        assert!(!service.verify("testPassword123!", &hash).await);
        assert!(!service.verify("TestPassword123!!", &hash).await);
    }

    #[tokio::test]
    async fn test_hashes_are_salted() {
        let service = Argon2PasswordService::new();

        let first = service.hash("same-password").await.unwrap();
        let second = service.hash("same-password").await.unwrap();

        assert_ne!(first, second);
        assert_eq!(first.len(), second.len());
    }

    #[tokio::test]
    async fn test_malformed_hash_fails_verification() {
        let service = Argon2PasswordService::new();

        assert!(!service.verify("anything", "not-a-phc-string").await);
        assert!(!service.verify("anything", "").await);
    }
}
