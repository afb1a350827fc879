//! Privilege rules.

use crate::domain::User;

/// Address that is privileged when no other is configured.
pub const DEFAULT_FOUNDER_EMAIL: &str = "founder@evolance.info";

/// Decides whether a resolved user holds founder privileges.
///
/// The comparison is exact: no trimming, no case folding.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    founder_email: String,
}

impl AccessPolicy {
    pub fn new(founder_email: impl Into<String>) -> Self {
        Self {
            founder_email: founder_email.into(),
        }
    }

    pub fn founder_email(&self) -> &str {
        &self.founder_email
    }

    pub fn is_privileged(&self, user: &User) -> bool {
        user.email == self.founder_email
    }
}

impl Default for AccessPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_FOUNDER_EMAIL)
    }
}
