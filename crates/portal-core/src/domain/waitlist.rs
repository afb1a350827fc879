use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Source tag recorded for sign-ups coming through the portal.
pub const PORTAL_SOURCE: &str = "research_portal";

/// Waitlist entry recorded alongside every registration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WaitlistEntry {
    pub id: Uuid,
    pub email: String,
    pub full_name: String,
    pub source: String,
    pub created_at: DateTime<Utc>,
}

impl WaitlistEntry {
    pub fn from_portal(email: String, full_name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email,
            full_name,
            source: PORTAL_SOURCE.to_string(),
            created_at: Utc::now(),
        }
    }
}
