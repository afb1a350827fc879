//! Comment handlers.

use actix_web::{HttpResponse, web};

use portal_core::domain::CommentDraft;
use portal_shared::dto::CreateCommentRequest;

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/comments
pub async fn create_comment(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreateCommentRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let comment = state
        .publishing
        .add_comment(
            &user.0,
            CommentDraft {
                post_id: req.post_id,
                content: req.content,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(comment))
}
