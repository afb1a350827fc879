use std::sync::Arc;

use uuid::Uuid;

use crate::domain::AuthorStats;
use crate::error::DomainError;
use crate::ports::PostRepository;

/// Per-author dashboard totals.
pub struct StatsService {
    posts: Arc<dyn PostRepository>,
}

impl StatsService {
    pub fn new(posts: Arc<dyn PostRepository>) -> Self {
        Self { posts }
    }

    pub async fn for_author(&self, author_id: Uuid) -> Result<AuthorStats, DomainError> {
        Ok(self.posts.author_stats(author_id).await?)
    }
}
