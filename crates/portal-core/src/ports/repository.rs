use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::{AuthorStats, Comment, Like, Post, PostQuery, User, WaitlistEntry};
use crate::error::RepoError;

/// Generic repository trait shared by every stored entity.
#[async_trait]
pub trait BaseRepository<T, ID>: Send + Sync {
    /// Find an entity by its unique ID.
    async fn find_by_id(&self, id: ID) -> Result<Option<T>, RepoError>;

    /// Insert a new entity. Unique-key clashes surface as
    /// [`RepoError::Constraint`].
    async fn insert(&self, entity: T) -> Result<T, RepoError>;
}

/// Credential store.
#[async_trait]
pub trait UserRepository: BaseRepository<User, Uuid> {
    /// Find a user by their email address.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError>;

    /// Find any user holding either the email or the username.
    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError>;
}

/// Post repository, including the atomic counter updates.
#[async_trait]
pub trait PostRepository: BaseRepository<Post, Uuid> {
    /// Newest-first listing with optional type filter.
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError>;

    /// Posts whose title or content contains `term` (case-insensitive) or
    /// whose tags include `term` exactly.
    async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, RepoError>;

    /// Atomically add one view and return the post as stored afterwards.
    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError>;

    /// Atomically add `delta` to the like counter. Returns whether a post
    /// matched.
    async fn adjust_likes(&self, id: Uuid, delta: i64) -> Result<bool, RepoError>;

    /// Post count and summed counters for one author.
    async fn author_stats(&self, author_id: Uuid) -> Result<AuthorStats, RepoError>;
}

/// Comment repository.
#[async_trait]
pub trait CommentRepository: BaseRepository<Comment, Uuid> {
    /// Comments on a post, oldest first.
    async fn find_by_post(&self, post_id: Uuid, limit: u64) -> Result<Vec<Comment>, RepoError>;
}

/// Like records. Uniqueness of (user, post) is enforced by the store.
#[async_trait]
pub trait LikeRepository: BaseRepository<Like, Uuid> {
    /// Insert unless the user already likes the same post. Returns whether
    /// a record was created.
    async fn insert_if_absent(&self, like: Like) -> Result<bool, RepoError>;

    /// Delete the user's like on a post. Returns whether a record was removed.
    async fn remove_post_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError>;
}

/// Waitlist sign-ups.
pub trait WaitlistRepository: BaseRepository<WaitlistEntry, Uuid> {}
