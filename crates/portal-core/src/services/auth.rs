//! Registration, login and bearer-token authentication.

use std::sync::Arc;

use crate::domain::{User, WaitlistEntry};
use crate::error::{DomainError, RepoError};
use crate::ports::{
    AuthError, PasswordService, TokenService, UserRepository, WaitlistRepository,
};

/// Minimum accepted password length on registration.
pub const MIN_PASSWORD_LENGTH: usize = 8;

/// Input for creating an account.
#[derive(Debug, Clone)]
pub struct Registration {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub bio: Option<String>,
}

/// A freshly issued token together with the user it was issued for.
#[derive(Debug, Clone)]
pub struct Session {
    pub token: String,
    pub user: User,
}

/// Owns the credential flow: hashing, token issuance and token resolution.
pub struct AuthService {
    users: Arc<dyn UserRepository>,
    waitlist: Arc<dyn WaitlistRepository>,
    passwords: Arc<dyn PasswordService>,
    tokens: Arc<dyn TokenService>,
}

impl AuthService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        waitlist: Arc<dyn WaitlistRepository>,
        passwords: Arc<dyn PasswordService>,
        tokens: Arc<dyn TokenService>,
    ) -> Self {
        Self {
            users,
            waitlist,
            passwords,
            tokens,
        }
    }

    pub fn token_lifetime_seconds(&self) -> i64 {
        self.tokens.expiration_seconds()
    }

    /// Create an account, record the waitlist sign-up and issue a token.
    pub async fn register(&self, registration: Registration) -> Result<Session, DomainError> {
        validate(&registration)?;

        if self
            .users
            .find_by_email_or_username(&registration.email, &registration.username)
            .await?
            .is_some()
        {
            return Err(DomainError::Duplicate("User already exists".to_string()));
        }

        let password_hash = self.passwords.hash(&registration.password).await?;
        let user = User::new(
            registration.email,
            registration.username,
            registration.full_name,
            password_hash,
            registration.bio,
        );

        // A concurrent registration can slip past the lookup above; the
        // store's unique keys catch it.
        let user = self.users.insert(user).await.map_err(|e| match e {
            RepoError::Constraint(_) => DomainError::Duplicate("User already exists".to_string()),
            other => DomainError::Repository(other),
        })?;

        let entry = WaitlistEntry::from_portal(user.email.clone(), user.full_name.clone());
        if let Err(e) = self.waitlist.insert(entry).await {
            tracing::warn!(user_id = %user.id, error = %e, "Failed to record waitlist entry");
        }

        tracing::info!(user_id = %user.id, "User registered");

        let token = self.tokens.generate_token(user.id)?;
        Ok(Session { token, user })
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown email and wrong password are indistinguishable to the caller.
    pub async fn login(&self, email: &str, password: &str) -> Result<Session, DomainError> {
        let Some(user) = self.users.find_by_email(email).await? else {
            return Err(AuthError::InvalidCredentials.into());
        };

        if !self.passwords.verify(password, &user.password_hash).await {
            tracing::debug!(user_id = %user.id, "Password mismatch");
            return Err(AuthError::InvalidCredentials.into());
        }

        let token = self.tokens.generate_token(user.id)?;
        Ok(Session { token, user })
    }

    /// Resolve a bearer token to the stored user it names.
    ///
    /// A valid token whose subject no longer exists is rejected.
    pub async fn authenticate(&self, token: &str) -> Result<User, DomainError> {
        let claims = self.tokens.validate_token(token)?;

        match self.users.find_by_id(claims.user_id).await? {
            Some(user) => Ok(user),
            None => {
                tracing::debug!(user_id = %claims.user_id, "Token subject has no user record");
                Err(AuthError::UnknownUser.into())
            }
        }
    }
}

fn validate(registration: &Registration) -> Result<(), DomainError> {
    let email = registration.email.as_str();
    let valid_email = match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && domain.contains('.'),
        None => false,
    };
    if !valid_email {
        return Err(DomainError::Validation("Invalid email address".to_string()));
    }
    if registration.username.trim().is_empty() {
        return Err(DomainError::Validation("Username is required".to_string()));
    }
    if registration.password.len() < MIN_PASSWORD_LENGTH {
        return Err(DomainError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LENGTH} characters"
        )));
    }
    Ok(())
}
