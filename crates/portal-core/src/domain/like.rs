use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single user's like on exactly one target.
///
/// At most one record exists per (user, post); its presence is what
/// "currently liked" means.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Like {
    pub id: Uuid,
    pub user_id: Uuid,
    pub post_id: Option<Uuid>,
    pub comment_id: Option<Uuid>,
    pub created_at: DateTime<Utc>,
}

impl Like {
    /// Like on a post.
    pub fn for_post(user_id: Uuid, post_id: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            post_id: Some(post_id),
            comment_id: None,
            created_at: Utc::now(),
        }
    }
}
