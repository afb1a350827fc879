//! In-memory repositories - used when no database is configured and in tests.
//!
//! Each repository guards its records with an async `RwLock`; every
//! check-and-write runs under a single write guard, which is what makes the
//! counter updates and like uniqueness atomic here.
//! Note: Data is lost on process restart.

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use portal_core::domain::{AuthorStats, Comment, Like, Post, PostQuery, User, WaitlistEntry};
use portal_core::error::RepoError;
use portal_core::ports::{
    BaseRepository, CommentRepository, LikeRepository, PostRepository, UserRepository,
    WaitlistRepository,
};

use super::mask_email;

/// Records kept in insertion order.
struct Table<T> {
    rows: RwLock<Vec<T>>,
}

impl<T> Table<T> {
    fn new() -> Self {
        Self {
            rows: RwLock::new(Vec::new()),
        }
    }
}

macro_rules! in_memory_base {
    ($repo:ty, $entity:ty) => {
        impl $repo {
            pub fn new() -> Self {
                Self { table: Table::new() }
            }
        }

        impl Default for $repo {
            fn default() -> Self {
                Self::new()
            }
        }

        #[async_trait]
        impl BaseRepository<$entity, Uuid> for $repo {
            async fn find_by_id(&self, id: Uuid) -> Result<Option<$entity>, RepoError> {
                let rows = self.table.rows.read().await;
                Ok(rows.iter().find(|row| row.id == id).cloned())
            }

            async fn insert(&self, entity: $entity) -> Result<$entity, RepoError> {
                let mut rows = self.table.rows.write().await;
                if rows.iter().any(|row| row.id == entity.id) {
                    return Err(RepoError::Constraint(format!(
                        "duplicate id {}",
                        entity.id
                    )));
                }
                Self::check_unique(&rows, &entity)?;
                rows.push(entity.clone());
                Ok(entity)
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Users
// ---------------------------------------------------------------------------

pub struct InMemoryUserRepository {
    table: Table<User>,
}

impl InMemoryUserRepository {
    fn check_unique(rows: &[User], user: &User) -> Result<(), RepoError> {
        if rows.iter().any(|u| u.email == user.email) {
            return Err(RepoError::Constraint("email already registered".to_string()));
        }
        if rows.iter().any(|u| u.username == user.username) {
            return Err(RepoError::Constraint("username already taken".to_string()));
        }
        Ok(())
    }
}

in_memory_base!(InMemoryUserRepository, User);

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, RepoError> {
        tracing::debug!(user_email = %mask_email(email), "Finding user by email");

        let rows = self.table.rows.read().await;
        Ok(rows.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_email_or_username(
        &self,
        email: &str,
        username: &str,
    ) -> Result<Option<User>, RepoError> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .iter()
            .find(|u| u.email == email || u.username == username)
            .cloned())
    }
}

// ---------------------------------------------------------------------------
// Posts
// ---------------------------------------------------------------------------

pub struct InMemoryPostRepository {
    table: Table<Post>,
}

impl InMemoryPostRepository {
    fn check_unique(_rows: &[Post], _post: &Post) -> Result<(), RepoError> {
        Ok(())
    }

    /// Newest first; among equal timestamps the later insert wins.
    fn newest_first<'a>(posts: impl DoubleEndedIterator<Item = &'a Post>) -> Vec<&'a Post> {
        let mut posts: Vec<&Post> = posts.rev().collect();
        posts.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        posts
    }
}

in_memory_base!(InMemoryPostRepository, Post);

fn window(skip: u64, limit: u64) -> (usize, usize) {
    (
        usize::try_from(skip).unwrap_or(usize::MAX),
        usize::try_from(limit).unwrap_or(usize::MAX),
    )
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn list(&self, query: PostQuery) -> Result<Vec<Post>, RepoError> {
        let rows = self.table.rows.read().await;
        let matching = rows
            .iter()
            .filter(|p| query.post_type.is_none_or(|t| p.post_type == t));
        let (skip, limit) = window(query.skip, query.limit);

        Ok(Self::newest_first(matching)
            .into_iter()
            .skip(skip)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn search(&self, term: &str, limit: u64) -> Result<Vec<Post>, RepoError> {
        let needle = term.to_lowercase();
        let rows = self.table.rows.read().await;
        let matching = rows.iter().filter(|p| {
            p.title.to_lowercase().contains(&needle)
                || p.content.to_lowercase().contains(&needle)
                || p.tags.iter().any(|tag| tag == term)
        });
        let (_, limit) = window(0, limit);

        Ok(Self::newest_first(matching)
            .into_iter()
            .take(limit)
            .cloned()
            .collect())
    }

    async fn increment_views(&self, id: Uuid) -> Result<Option<Post>, RepoError> {
        let mut rows = self.table.rows.write().await;
        Ok(rows.iter_mut().find(|p| p.id == id).map(|post| {
            post.views += 1;
            post.clone()
        }))
    }

    async fn adjust_likes(&self, id: Uuid, delta: i64) -> Result<bool, RepoError> {
        let mut rows = self.table.rows.write().await;
        match rows.iter_mut().find(|p| p.id == id) {
            Some(post) => {
                post.likes += delta;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn author_stats(&self, author_id: Uuid) -> Result<AuthorStats, RepoError> {
        let rows = self.table.rows.read().await;
        Ok(rows
            .iter()
            .filter(|p| p.author_id == author_id)
            .fold(AuthorStats::default(), |mut stats, post| {
                stats.posts += 1;
                stats.likes += post.likes;
                stats.views += post.views;
                stats
            }))
    }
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

pub struct InMemoryCommentRepository {
    table: Table<Comment>,
}

impl InMemoryCommentRepository {
    fn check_unique(_rows: &[Comment], _comment: &Comment) -> Result<(), RepoError> {
        Ok(())
    }
}

in_memory_base!(InMemoryCommentRepository, Comment);

#[async_trait]
impl CommentRepository for InMemoryCommentRepository {
    async fn find_by_post(&self, post_id: Uuid, limit: u64) -> Result<Vec<Comment>, RepoError> {
        let rows = self.table.rows.read().await;
        let mut comments: Vec<Comment> = rows
            .iter()
            .filter(|c| c.post_id == post_id)
            .cloned()
            .collect();
        comments.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        comments.truncate(window(0, limit).1);
        Ok(comments)
    }
}

// ---------------------------------------------------------------------------
// Likes
// ---------------------------------------------------------------------------

pub struct InMemoryLikeRepository {
    table: Table<Like>,
}

impl InMemoryLikeRepository {
    fn check_unique(rows: &[Like], like: &Like) -> Result<(), RepoError> {
        if Self::position(rows, like.user_id, like.post_id).is_some() {
            return Err(RepoError::Constraint("like already recorded".to_string()));
        }
        Ok(())
    }

    fn position(rows: &[Like], user_id: Uuid, post_id: Option<Uuid>) -> Option<usize> {
        post_id?;
        rows.iter()
            .position(|l| l.user_id == user_id && l.post_id == post_id)
    }

    /// Number of like records pointing at a post.
    pub async fn count_for_post(&self, post_id: Uuid) -> usize {
        let rows = self.table.rows.read().await;
        rows.iter().filter(|l| l.post_id == Some(post_id)).count()
    }
}

in_memory_base!(InMemoryLikeRepository, Like);

#[async_trait]
impl LikeRepository for InMemoryLikeRepository {
    async fn insert_if_absent(&self, like: Like) -> Result<bool, RepoError> {
        let mut rows = self.table.rows.write().await;
        if Self::position(&rows, like.user_id, like.post_id).is_some() {
            return Ok(false);
        }
        rows.push(like);
        Ok(true)
    }

    async fn remove_post_like(&self, user_id: Uuid, post_id: Uuid) -> Result<bool, RepoError> {
        let mut rows = self.table.rows.write().await;
        match Self::position(&rows, user_id, Some(post_id)) {
            Some(index) => {
                rows.remove(index);
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

// ---------------------------------------------------------------------------
// Waitlist
// ---------------------------------------------------------------------------

pub struct InMemoryWaitlistRepository {
    table: Table<WaitlistEntry>,
}

impl InMemoryWaitlistRepository {
    fn check_unique(_rows: &[WaitlistEntry], _entry: &WaitlistEntry) -> Result<(), RepoError> {
        Ok(())
    }

    pub async fn len(&self) -> usize {
        self.table.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

in_memory_base!(InMemoryWaitlistRepository, WaitlistEntry);

impl WaitlistRepository for InMemoryWaitlistRepository {}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeDelta, Utc};
    use portal_core::domain::{PostDraft, PostType};

    fn author(name: &str) -> User {
        User::new(
            format!("{name}@example.com"),
            name.to_string(),
            name.to_string(),
            "hash".to_string(),
            None,
        )
    }

    fn post(author: &User, title: &str, post_type: PostType, tags: &[&str]) -> Post {
        Post::new(
            author,
            PostDraft {
                title: title.to_string(),
                content: format!("Body of {title}"),
                post_type,
                tags: tags.iter().map(|t| t.to_string()).collect(),
                summary: None,
            },
        )
    }

    #[tokio::test]
    async fn test_user_email_and_username_are_unique() {
        let repo = InMemoryUserRepository::new();
        repo.insert(author("ada")).await.unwrap();

        let mut same_email = author("grace");
        same_email.email = "ada@example.com".to_string();
        let mut same_username = author("grace");
        same_username.username = "ada".to_string();

        assert!(matches!(
            repo.insert(same_email).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(matches!(
            repo.insert(same_username).await,
            Err(RepoError::Constraint(_))
        ));
        assert!(repo.insert(author("grace")).await.is_ok());
    }

    #[tokio::test]
    async fn test_find_by_email_or_username() {
        let repo = InMemoryUserRepository::new();
        let ada = repo.insert(author("ada")).await.unwrap();

        let by_email = repo
            .find_by_email_or_username("ada@example.com", "nobody")
            .await
            .unwrap();
        let by_username = repo
            .find_by_email_or_username("nobody@example.com", "ada")
            .await
            .unwrap();

        assert_eq!(by_email.map(|u| u.id), Some(ada.id));
        assert_eq!(by_username.map(|u| u.id), Some(ada.id));
        assert!(
            repo.find_by_email_or_username("x@example.com", "x")
                .await
                .unwrap()
                .is_none()
        );
    }

    #[tokio::test]
    async fn test_list_filters_and_orders_newest_first() {
        let repo = InMemoryPostRepository::new();
        let ada = author("ada");

        let mut older = post(&ada, "older", PostType::Blog, &[]);
        older.created_at = Utc::now() - TimeDelta::hours(1);
        repo.insert(older).await.unwrap();
        repo.insert(post(&ada, "research", PostType::Research, &[]))
            .await
            .unwrap();
        repo.insert(post(&ada, "newer", PostType::Blog, &[]))
            .await
            .unwrap();

        let blogs = repo
            .list(PostQuery {
                post_type: Some(PostType::Blog),
                ..PostQuery::default()
            })
            .await
            .unwrap();
        let titles: Vec<&str> = blogs.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["newer", "older"]);

        let page = repo
            .list(PostQuery {
                post_type: None,
                skip: 1,
                limit: 1,
            })
            .await
            .unwrap();
        assert_eq!(page.len(), 1);
        assert_eq!(page[0].title, "research");
    }

    #[tokio::test]
    async fn test_search_matches_title_content_and_exact_tag() {
        let repo = InMemoryPostRepository::new();
        let ada = author("ada");
        repo.insert(post(&ada, "Quantum Notes", PostType::Research, &["physics"]))
            .await
            .unwrap();
        repo.insert(post(&ada, "Cooking", PostType::Blog, &["Food"]))
            .await
            .unwrap();

        assert_eq!(repo.search("quantum", 10).await.unwrap().len(), 1);
        assert_eq!(repo.search("BODY OF", 10).await.unwrap().len(), 2);
        assert_eq!(repo.search("Food", 10).await.unwrap().len(), 1);
        assert_eq!(repo.search("food", 10).await.unwrap().len(), 0);
        assert_eq!(repo.search("body", 1).await.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_increment_views_returns_updated_post() {
        let repo = InMemoryPostRepository::new();
        let stored = repo
            .insert(post(&author("ada"), "p", PostType::Blog, &[]))
            .await
            .unwrap();

        let first = repo.increment_views(stored.id).await.unwrap().unwrap();
        let second = repo.increment_views(stored.id).await.unwrap().unwrap();

        assert_eq!(first.views, 1);
        assert_eq!(second.views, 2);
        assert!(repo.increment_views(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_adjust_likes_on_missing_post_matches_nothing() {
        let repo = InMemoryPostRepository::new();
        assert!(!repo.adjust_likes(Uuid::new_v4(), 1).await.unwrap());
    }

    #[tokio::test]
    async fn test_like_uniqueness_per_user_and_post() {
        let repo = InMemoryLikeRepository::new();
        let user_id = Uuid::new_v4();
        let post_id = Uuid::new_v4();

        assert!(
            repo.insert_if_absent(Like::for_post(user_id, post_id))
                .await
                .unwrap()
        );
        assert!(
            !repo
                .insert_if_absent(Like::for_post(user_id, post_id))
                .await
                .unwrap()
        );
        assert_eq!(repo.count_for_post(post_id).await, 1);

        assert!(repo.remove_post_like(user_id, post_id).await.unwrap());
        assert!(!repo.remove_post_like(user_id, post_id).await.unwrap());
        assert_eq!(repo.count_for_post(post_id).await, 0);
    }

    #[tokio::test]
    async fn test_comments_oldest_first_and_limited() {
        let repo = InMemoryCommentRepository::new();
        let ada = author("ada");
        let post_id = Uuid::new_v4();

        for (i, offset) in [3i64, 1, 2].into_iter().enumerate() {
            let mut comment = Comment::new(
                &ada,
                portal_core::domain::CommentDraft {
                    post_id,
                    content: format!("comment {i}"),
                },
            );
            comment.created_at = Utc::now() - TimeDelta::minutes(offset);
            repo.insert(comment).await.unwrap();
        }

        let comments = repo.find_by_post(post_id, 2).await.unwrap();
        let contents: Vec<&str> = comments.iter().map(|c| c.content.as_str()).collect();
        assert_eq!(contents, vec!["comment 0", "comment 2"]);
    }
}
