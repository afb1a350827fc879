//! Search handler.

use actix_web::{HttpResponse, web};

use portal_shared::dto::SearchQuery;

use crate::middleware::error::AppResult;
use crate::state::AppState;

/// GET /api/search?q=&limit=
pub async fn search_posts(
    state: web::Data<AppState>,
    query: web::Query<SearchQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let posts = state.publishing.search(&query.q, query.limit).await?;
    Ok(HttpResponse::Ok().json(posts))
}
