//! View and like counters.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Like, Post};
use crate::error::DomainError;
use crate::ports::{LikeRepository, PostRepository};

pub struct EngagementService {
    posts: Arc<dyn PostRepository>,
    likes: Arc<dyn LikeRepository>,
}

impl EngagementService {
    pub fn new(posts: Arc<dyn PostRepository>, likes: Arc<dyn LikeRepository>) -> Self {
        Self { posts, likes }
    }

    /// Fetch a post, counting the fetch as one view. The returned post
    /// already carries the incremented count.
    pub async fn view_post(&self, post_id: Uuid) -> Result<Post, DomainError> {
        self.posts
            .increment_views(post_id)
            .await?
            .ok_or_else(|| DomainError::post_not_found(post_id))
    }

    /// Flip the user's like on a post. Returns `true` when the post is liked
    /// afterwards.
    ///
    /// The like record decides the outcome; the counter is adjusted only when
    /// a record was actually removed or created, so two racing toggles can
    /// not both count.
    pub async fn toggle_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, DomainError> {
        if self.posts.find_by_id(post_id).await?.is_none() {
            return Err(DomainError::post_not_found(post_id));
        }

        if self.likes.remove_post_like(user_id, post_id).await? {
            self.posts.adjust_likes(post_id, -1).await?;
            tracing::debug!(%user_id, %post_id, "Post unliked");
            return Ok(false);
        }

        if self
            .likes
            .insert_if_absent(Like::for_post(user_id, post_id))
            .await?
        {
            self.posts.adjust_likes(post_id, 1).await?;
            tracing::debug!(%user_id, %post_id, "Post liked");
        } else {
            tracing::debug!(%user_id, %post_id, "Concurrent like already recorded");
        }
        Ok(true)
    }
}
