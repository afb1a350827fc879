//! Authentication and authorization ports.

use async_trait::async_trait;
use uuid::Uuid;

/// Claims carried by a validated bearer token.
#[derive(Debug, Clone)]
pub struct TokenClaims {
    pub user_id: Uuid,
    pub exp: i64,
}

/// Issues and validates signed, time-limited bearer tokens.
pub trait TokenService: Send + Sync {
    /// Generate an access token whose subject is `user_id`.
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError>;

    /// Verify signature and expiry, returning the embedded claims.
    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError>;

    /// Lifetime of freshly issued tokens.
    fn expiration_seconds(&self) -> i64;
}

/// Password hashing service.
///
/// Implementations are expected to be slow on purpose, hence async.
#[async_trait]
pub trait PasswordService: Send + Sync {
    /// Hash a plain text password with a fresh random salt.
    async fn hash(&self, password: &str) -> Result<String, AuthError>;

    /// Verify a password against a stored hash.
    ///
    /// A malformed hash is a failed verification, not an error.
    async fn verify(&self, password: &str, hash: &str) -> bool;
}

/// Authentication errors.
#[derive(Debug, thiserror::Error)]
pub enum AuthError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Missing authorization header")]
    MissingAuth,

    #[error("User not found")]
    UnknownUser,

    #[error("Insufficient permissions")]
    InsufficientPermissions,

    #[error("Hashing error: {0}")]
    HashingError(String),
}
