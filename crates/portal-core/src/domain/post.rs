use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::User;
use crate::error::DomainError;

/// Average reading speed used for the reading-time estimate.
const WORDS_PER_MINUTE: usize = 200;

/// Kind of publication a post belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PostType {
    Blog,
    Research,
}

impl PostType {
    pub fn as_str(self) -> &'static str {
        match self {
            PostType::Blog => "blog",
            PostType::Research => "research",
        }
    }
}

impl fmt::Display for PostType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PostType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blog" => Ok(PostType::Blog),
            "research" => Ok(PostType::Research),
            other => Err(DomainError::Validation(format!(
                "Unknown post type '{other}', expected 'blog' or 'research'"
            ))),
        }
    }
}

/// Post entity - a blog post or research article.
///
/// `likes` mirrors the number of like records pointing at the post and is
/// only changed through the like toggle. `views` only ever grows.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Post {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub author_id: Uuid,
    pub author_name: String,
    pub post_type: PostType,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub likes: i64,
    pub views: i64,
    pub is_published: bool,
    pub reading_time: i32,
    pub summary: Option<String>,
}

/// Author-supplied fields of a new post.
#[derive(Debug, Clone)]
pub struct PostDraft {
    pub title: String,
    pub content: String,
    pub post_type: PostType,
    pub tags: Vec<String>,
    pub summary: Option<String>,
}

impl Post {
    /// Create a new published post owned by `author`.
    pub fn new(author: &User, draft: PostDraft) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            reading_time: reading_time(&draft.content),
            title: draft.title,
            content: draft.content,
            author_id: author.id,
            author_name: author.display_name().to_string(),
            post_type: draft.post_type,
            tags: draft.tags,
            created_at: now,
            updated_at: now,
            likes: 0,
            views: 0,
            is_published: true,
            summary: draft.summary,
        }
    }
}

/// Estimated reading time in minutes, never below one.
pub fn reading_time(content: &str) -> i32 {
    let words = content.split_whitespace().count();
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    i32::try_from(minutes).unwrap_or(i32::MAX)
}

/// Filter and window for listing posts, newest first.
#[derive(Debug, Clone, Copy)]
pub struct PostQuery {
    pub post_type: Option<PostType>,
    pub skip: u64,
    pub limit: u64,
}

impl Default for PostQuery {
    fn default() -> Self {
        Self {
            post_type: None,
            skip: 0,
            limit: 20,
        }
    }
}
