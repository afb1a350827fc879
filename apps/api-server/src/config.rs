//! Application configuration loaded from environment variables.

use std::env;

use portal_core::policy::DEFAULT_FOUNDER_EMAIL;
use portal_infra::auth::DEFAULT_EXPIRATION_MINUTES;
use portal_infra::JwtConfig;
use thiserror::Error;

/// Signing secret used when `JWT_SECRET` is unset outside production.
const DEVELOPMENT_JWT_SECRET: &str = "evolance-portal-development-secret";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("JWT_SECRET must be set when RUST_ENV is production")]
    MissingJwtSecret,

    #[error("Invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

/// Deployment environment, from `RUST_ENV`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Production,
}

impl Environment {
    fn parse(value: Option<&str>) -> Self {
        match value.map(str::to_ascii_lowercase).as_deref() {
            Some("production" | "prod") => Environment::Production,
            _ => Environment::Development,
        }
    }
}

/// Origins allowed by the CORS layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CorsOrigins {
    Any,
    List(Vec<String>),
}

impl CorsOrigins {
    fn parse(value: Option<&str>) -> Self {
        let Some(value) = value else {
            return CorsOrigins::Any;
        };

        let origins: Vec<String> = value
            .split(',')
            .map(str::trim)
            .filter(|origin| !origin.is_empty())
            .map(String::from)
            .collect();

        if origins.is_empty() || origins.iter().any(|origin| origin == "*") {
            CorsOrigins::Any
        } else {
            CorsOrigins::List(origins)
        }
    }
}

/// Connection settings for PostgreSQL.
#[derive(Debug, Clone)]
pub struct DatabaseSettings {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub database: Option<DatabaseSettings>,
    pub jwt: JwtConfig,
    pub founder_email: String,
    pub cors_origins: CorsOrigins,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = Environment::parse(lookup("RUST_ENV").as_deref());

        let database = match lookup("DATABASE_URL").filter(|url| !url.is_empty()) {
            Some(url) => Some(DatabaseSettings {
                url,
                max_connections: parse_or(&lookup, "DB_MAX_CONNECTIONS", 100)?,
                min_connections: parse_or(&lookup, "DB_MIN_CONNECTIONS", 10)?,
            }),
            None => None,
        };

        let secret = match lookup("JWT_SECRET").filter(|secret| !secret.is_empty()) {
            Some(secret) => secret,
            None if environment == Environment::Production => {
                return Err(ConfigError::MissingJwtSecret);
            }
            None => {
                tracing::warn!("JWT_SECRET not set, using the development signing secret");
                DEVELOPMENT_JWT_SECRET.to_string()
            }
        };

        let mut jwt = JwtConfig::new(secret);
        jwt.expiration_minutes =
            parse_or(&lookup, "JWT_EXPIRATION_MINUTES", DEFAULT_EXPIRATION_MINUTES)?;
        if let Some(issuer) = lookup("JWT_ISSUER") {
            jwt.issuer = issuer;
        }

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "127.0.0.1".to_string()),
            port: parse_or(&lookup, "PORT", 8080)?,
            environment,
            database,
            jwt,
            founder_email: lookup("FOUNDER_EMAIL")
                .unwrap_or_else(|| DEFAULT_FOUNDER_EMAIL.to_string()),
            cors_origins: CorsOrigins::parse(lookup("CORS_ORIGINS").as_deref()),
        })
    }
}

fn parse_or<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr,
{
    match lookup(key) {
        Some(value) => value
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn load(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = load(&[]).unwrap();

        assert_eq!(config.host, "127.0.0.1");
        assert_eq!(config.port, 8080);
        assert_eq!(config.environment, Environment::Development);
        assert!(config.database.is_none());
        assert_eq!(config.jwt.secret, DEVELOPMENT_JWT_SECRET);
        assert_eq!(config.jwt.expiration_minutes, 30);
        assert_eq!(config.founder_email, "founder@evolance.info");
        assert_eq!(config.cors_origins, CorsOrigins::Any);
    }

    #[test]
    fn test_production_requires_jwt_secret() {
        assert!(matches!(
            load(&[("RUST_ENV", "production")]),
            Err(ConfigError::MissingJwtSecret)
        ));
        assert!(matches!(
            load(&[("RUST_ENV", "prod"), ("JWT_SECRET", "")]),
            Err(ConfigError::MissingJwtSecret)
        ));

        let config = load(&[("RUST_ENV", "production"), ("JWT_SECRET", "s3cret")]).unwrap();
        assert_eq!(config.jwt.secret, "s3cret");
    }

    #[test]
    fn test_database_settings() {
        let config = load(&[
            ("DATABASE_URL", "postgres://localhost/portal"),
            ("DB_MAX_CONNECTIONS", "5"),
        ])
        .unwrap();

        let database = config.database.unwrap();
        assert_eq!(database.url, "postgres://localhost/portal");
        assert_eq!(database.max_connections, 5);
        assert_eq!(database.min_connections, 10);
    }

    #[test]
    fn test_invalid_number_is_rejected() {
        assert!(matches!(
            load(&[("PORT", "eighty")]),
            Err(ConfigError::Invalid { key: "PORT", .. })
        ));
    }

    #[test]
    fn test_cors_origins() {
        assert_eq!(CorsOrigins::parse(Some("*")), CorsOrigins::Any);
        assert_eq!(
            CorsOrigins::parse(Some("https://a.example, https://b.example")),
            CorsOrigins::List(vec![
                "https://a.example".to_string(),
                "https://b.example".to_string()
            ])
        );
    }
}
