use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// User entity - a registered portal account.
///
/// `password_hash` is persisted with the record but is never serialized.
/// The founder flag is not stored; see [`crate::AccessPolicy`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub username: String,
    pub full_name: String,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub is_active: bool,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Create a new active user with a generated ID.
    pub fn new(
        email: String,
        username: String,
        full_name: String,
        password_hash: String,
        bio: Option<String>,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            username,
            full_name,
            password_hash,
            is_active: true,
            avatar_url: None,
            bio,
            created_at: Utc::now(),
        }
    }

    /// Name shown next to content the user authored.
    pub fn display_name(&self) -> &str {
        if self.full_name.is_empty() {
            &self.username
        } else {
            &self.full_name
        }
    }
}
