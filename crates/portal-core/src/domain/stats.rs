use serde::{Deserialize, Serialize};

/// Totals over every post written by one author.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorStats {
    pub posts: u64,
    pub likes: i64,
    pub views: i64,
}
