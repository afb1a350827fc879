//! Post and comment authoring, listing and search.

use std::sync::Arc;

use uuid::Uuid;

use crate::domain::{Comment, CommentDraft, Post, PostDraft, PostQuery, User};
use crate::error::DomainError;
use crate::ports::{CommentRepository, PostRepository};

/// Maximum number of comments returned for one post.
pub const COMMENT_PAGE_LIMIT: u64 = 100;

pub struct PublishingService {
    posts: Arc<dyn PostRepository>,
    comments: Arc<dyn CommentRepository>,
}

impl PublishingService {
    pub fn new(posts: Arc<dyn PostRepository>, comments: Arc<dyn CommentRepository>) -> Self {
        Self { posts, comments }
    }

    pub async fn create_post(&self, author: &User, draft: PostDraft) -> Result<Post, DomainError> {
        if draft.title.trim().is_empty() {
            return Err(DomainError::Validation("Title is required".to_string()));
        }

        let post = self.posts.insert(Post::new(author, draft)).await?;
        tracing::info!(post_id = %post.id, author_id = %author.id, "Post created");
        Ok(post)
    }

    pub async fn list_posts(&self, query: PostQuery) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.list(query).await?)
    }

    /// Case-insensitive title/content match or exact tag match. An empty
    /// term matches every post.
    pub async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, DomainError> {
        Ok(self.posts.search(term, limit).await?)
    }

    /// Comment on an existing post.
    pub async fn add_comment(
        &self,
        author: &User,
        draft: CommentDraft,
    ) -> Result<Comment, DomainError> {
        if self.posts.find_by_id(draft.post_id).await?.is_none() {
            return Err(DomainError::post_not_found(draft.post_id));
        }

        Ok(self.comments.insert(Comment::new(author, draft)).await?)
    }

    pub async fn comments_for(&self, post_id: Uuid) -> Result<Vec<Comment>, DomainError> {
        Ok(self
            .comments
            .find_by_post(post_id, COMMENT_PAGE_LIMIT)
            .await?)
    }
}
