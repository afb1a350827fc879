//! Domain entities - the core business objects.

mod comment;
mod like;
mod post;
mod stats;
mod user;
mod waitlist;

pub use comment::{Comment, CommentDraft};
pub use like::Like;
pub use post::{Post, PostDraft, PostQuery, PostType, reading_time};
pub use stats::AuthorStats;
pub use user::User;
pub use waitlist::WaitlistEntry;
