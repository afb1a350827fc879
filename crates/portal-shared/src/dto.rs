//! Data Transfer Objects - request/response types for the API.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Default page size of `GET /posts`.
pub const DEFAULT_POST_LIMIT: u64 = 20;

/// Default result count of `GET /search`.
pub const DEFAULT_SEARCH_LIMIT: u64 = 10;

/// Request to register a new user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    #[serde(default)]
    pub bio: Option<String>,
}

/// Request to login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Response containing a user's public information.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub is_active: bool,
    pub is_founder: bool,
    pub created_at: String,
    pub avatar_url: Option<String>,
    pub bio: Option<String>,
}

/// Response of a successful registration or login.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: u64,
    pub user: UserResponse,
}

impl AuthResponse {
    pub fn bearer(access_token: String, expires_in: u64, user: UserResponse) -> Self {
        Self {
            access_token,
            token_type: "bearer".to_string(),
            expires_in,
            user,
        }
    }
}

/// Request to publish a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePostRequest {
    pub title: String,
    pub content: String,
    pub post_type: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// Request to comment on a post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentRequest {
    pub post_id: Uuid,
    pub content: String,
}

/// Query string of `GET /posts`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListPostsQuery {
    #[serde(default)]
    pub post_type: Option<String>,
    #[serde(default = "default_post_limit")]
    pub limit: u64,
    #[serde(default)]
    pub skip: u64,
}

/// Query string of `GET /search`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchQuery {
    pub q: String,
    #[serde(default = "default_search_limit")]
    pub limit: u64,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LikeResponse {
    pub liked: bool,
}

/// Aggregate totals over the caller's posts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsResponse {
    pub posts: u64,
    pub likes: i64,
    pub views: i64,
}

fn default_post_limit() -> u64 {
    DEFAULT_POST_LIMIT
}

fn default_search_limit() -> u64 {
    DEFAULT_SEARCH_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_query_defaults() {
        let query: ListPostsQuery = serde_json::from_str("{}").unwrap();
        assert_eq!(query.limit, 20);
        assert_eq!(query.skip, 0);
        assert!(query.post_type.is_none());
    }

    #[test]
    fn test_search_query_requires_term() {
        assert!(serde_json::from_str::<SearchQuery>("{}").is_err());

        let query: SearchQuery = serde_json::from_str(r#"{"q":"rust"}"#).unwrap();
        assert_eq!(query.limit, 10);
    }

    #[test]
    fn test_create_post_optional_fields() {
        let request: CreatePostRequest =
            serde_json::from_str(r#"{"title":"T","content":"C","post_type":"blog"}"#).unwrap();
        assert!(request.tags.is_empty());
        assert!(request.summary.is_none());
    }
}
