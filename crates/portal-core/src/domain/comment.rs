use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::User;

/// Comment entity - a reply left on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    pub id: Uuid,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub user_name: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
    pub likes: i64,
}

/// Fields a user supplies when commenting.
#[derive(Debug, Clone)]
pub struct CommentDraft {
    pub post_id: Uuid,
    pub content: String,
}

impl Comment {
    pub fn new(author: &User, draft: CommentDraft) -> Self {
        Self {
            id: Uuid::new_v4(),
            post_id: draft.post_id,
            user_id: author.id,
            user_name: author.display_name().to_string(),
            content: draft.content,
            created_at: Utc::now(),
            likes: 0,
        }
    }
}
