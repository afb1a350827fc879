//! Dashboard handlers.

use actix_web::{HttpResponse, web};

use portal_shared::dto::StatsResponse;

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/dashboard/stats - totals over the caller's own posts.
pub async fn stats(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    let stats = state.stats.for_author(user.0.id).await?;

    Ok(HttpResponse::Ok().json(StatsResponse {
        posts: stats.posts,
        likes: stats.likes,
        views: stats.views,
    }))
}
