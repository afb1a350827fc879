//! JWT token service implementation.

use chrono::{TimeDelta, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use portal_core::ports::{AuthError, TokenClaims, TokenService};

/// Lifetime of an access token unless configured otherwise.
pub const DEFAULT_EXPIRATION_MINUTES: i64 = 30;

/// JWT token service configuration.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub expiration_minutes: i64,
    pub issuer: String,
}

impl JwtConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            expiration_minutes: DEFAULT_EXPIRATION_MINUTES,
            issuer: "evolance-portal".to_string(),
        }
    }
}

/// Internal JWT claims structure for serialization.
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String, // user_id
    exp: i64,    // expiration timestamp
    iat: i64,    // issued at
    iss: String, // issuer
}

/// HS256 JWT token service.
pub struct JwtTokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    config: JwtConfig,
}

impl JwtTokenService {
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[&config.issuer]);
        validation.set_required_spec_claims(&["exp", "sub", "iss"]);
        validation.leeway = 0;

        Self {
            encoding_key,
            decoding_key,
            validation,
            config,
        }
    }
}

impl TokenService for JwtTokenService {
    fn generate_token(&self, user_id: Uuid) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + TimeDelta::minutes(self.config.expiration_minutes);

        let claims = Claims {
            sub: user_id.to_string(),
            exp: exp.timestamp(),
            iat: now.timestamp(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))
    }

    fn validate_token(&self, token: &str) -> Result<TokenClaims, AuthError> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    _ => AuthError::InvalidToken(e.to_string()),
                }
            })?;

        // The library accepts a token during the second it expires in.
        if token_data.claims.exp <= Utc::now().timestamp() {
            return Err(AuthError::TokenExpired);
        }

        let user_id = Uuid::parse_str(&token_data.claims.sub)
            .map_err(|e| AuthError::InvalidToken(e.to_string()))?;

        Ok(TokenClaims {
            user_id,
            exp: token_data.claims.exp,
        })
    }

    fn expiration_seconds(&self) -> i64 {
        self.config.expiration_minutes * 60
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> JwtConfig {
        JwtConfig {
            secret: "test-secret-key".to_string(),
            expiration_minutes: 30,
            issuer: "test-issuer".to_string(),
        }
    }

    fn signed(claims: &Claims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn test_validate_token_returns_subject() {
        let service = JwtTokenService::new(test_config());
        let user_id = Uuid::new_v4();

        let token = service.generate_token(user_id).unwrap();
        let claims = service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, user_id);
    }

    #[test]
    fn test_token_expires_after_configured_window() {
        let service = JwtTokenService::new(test_config());
        let before = Utc::now().timestamp();

        let token = service.generate_token(Uuid::new_v4()).unwrap();
        let claims = service.validate_token(&token).unwrap();

        let window = claims.exp - before;
        assert!((1799..=1801).contains(&window), "window was {window}s");
        assert_eq!(service.expiration_seconds(), 1800);
    }

    #[test]
    fn test_validate_invalid_token() {
        let service = JwtTokenService::new(test_config());

        let result = service.validate_token("invalid-token");

        assert!(matches!(result, Err(AuthError::InvalidToken(_))));
    }

    #[test]
    fn test_validate_expired_token() {
        let service = JwtTokenService::new(test_config());
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: Uuid::new_v4().to_string(),
                exp: now - 10,
                iat: now - 1810,
                iss: "test-issuer".to_string(),
            },
            "test-secret-key",
        );

        let result = service.validate_token(&token);

        assert!(matches!(result, Err(AuthError::TokenExpired)));
    }

    #[test]
    fn test_validate_token_expiring_now() {
        let service = JwtTokenService::new(test_config());
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: Uuid::new_v4().to_string(),
                exp: now,
                iat: now - 1800,
                iss: "test-issuer".to_string(),
            },
            "test-secret-key",
        );

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::TokenExpired)
        ));
    }

    #[test]
    fn test_validate_token_signed_with_other_secret() {
        let service = JwtTokenService::new(test_config());
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: Uuid::new_v4().to_string(),
                exp: now + 600,
                iat: now,
                iss: "test-issuer".to_string(),
            },
            "some-other-secret",
        );

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_token_with_non_uuid_subject() {
        let service = JwtTokenService::new(test_config());
        let now = Utc::now().timestamp();
        let token = signed(
            &Claims {
                sub: "not-a-uuid".to_string(),
                exp: now + 600,
                iat: now,
                iss: "test-issuer".to_string(),
            },
            "test-secret-key",
        );

        assert!(matches!(
            service.validate_token(&token),
            Err(AuthError::InvalidToken(_))
        ));
    }

    #[test]
    fn test_validate_wrong_issuer_token() {
        let service1 = JwtTokenService::new(JwtConfig {
            issuer: "issuer1".to_string(),
            ..test_config()
        });
        let service2 = JwtTokenService::new(JwtConfig {
            issuer: "issuer2".to_string(),
            ..test_config()
        });

        let token = service1.generate_token(Uuid::new_v4()).unwrap();

        assert!(service2.validate_token(&token).is_err());
    }
}
