//! Application services - the operations the HTTP layer exposes, written
//! against ports only.

mod auth;
mod engagement;
mod publishing;
mod stats;

pub use auth::{AuthService, Registration, Session};
pub use engagement::EngagementService;
pub use publishing::{COMMENT_PAGE_LIMIT, PublishingService};
pub use stats::StatsService;
