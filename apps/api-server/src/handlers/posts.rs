//! Post handlers: publishing, listing, views, likes and comment listing.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use portal_core::domain::{PostDraft, PostQuery, PostType};
use portal_shared::dto::{CreatePostRequest, LikeResponse, ListPostsQuery};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/posts
pub async fn create_post(
    state: web::Data<AppState>,
    user: CurrentUser,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let post_type: PostType = req.post_type.parse()?;

    let post = state
        .publishing
        .create_post(
            &user.0,
            PostDraft {
                title: req.title,
                content: req.content,
                post_type,
                tags: req.tags,
                summary: req.summary,
            },
        )
        .await?;

    Ok(HttpResponse::Ok().json(post))
}

/// GET /api/posts?post_type=&limit=&skip=
pub async fn list_posts(
    state: web::Data<AppState>,
    query: web::Query<ListPostsQuery>,
) -> AppResult<HttpResponse> {
    let query = query.into_inner();
    let post_type = query
        .post_type
        .as_deref()
        .map(str::parse::<PostType>)
        .transpose()?;

    let posts = state
        .publishing
        .list_posts(PostQuery {
            post_type,
            skip: query.skip,
            limit: query.limit,
        })
        .await?;

    Ok(HttpResponse::Ok().json(posts))
}

/// GET /api/posts/{id} - counts as a view.
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = state.engagement.view_post(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(post))
}

/// POST /api/posts/{id}/like - toggles the caller's like.
pub async fn toggle_like(
    state: web::Data<AppState>,
    user: CurrentUser,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let liked = state
        .engagement
        .toggle_like(user.0.id, path.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(LikeResponse { liked }))
}

/// GET /api/posts/{id}/comments
pub async fn list_comments(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let comments = state.publishing.comments_for(path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(comments))
}
