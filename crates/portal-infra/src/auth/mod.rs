//! Authentication implementations.

mod jwt;
mod password;

pub use jwt::{DEFAULT_EXPIRATION_MINUTES, JwtConfig, JwtTokenService};
pub use password::Argon2PasswordService;
