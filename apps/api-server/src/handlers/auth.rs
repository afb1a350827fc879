//! Authentication handlers.

use actix_web::{HttpResponse, web};

use portal_core::AccessPolicy;
use portal_core::domain::User;
use portal_core::services::{Registration, Session};
use portal_shared::dto::{AuthResponse, LoginRequest, RegisterUserRequest, UserResponse};

use crate::middleware::auth::CurrentUser;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Public view of a user, with the founder flag resolved.
pub(crate) fn user_response(user: &User, policy: &AccessPolicy) -> UserResponse {
    UserResponse {
        id: user.id.to_string(),
        email: user.email.clone(),
        username: user.username.clone(),
        full_name: user.full_name.clone(),
        is_active: user.is_active,
        is_founder: policy.is_privileged(user),
        created_at: user.created_at.to_rfc3339(),
        avatar_url: user.avatar_url.clone(),
        bio: user.bio.clone(),
    }
}

fn auth_response(state: &AppState, session: Session) -> AuthResponse {
    let expires_in = u64::try_from(state.auth.token_lifetime_seconds()).unwrap_or(0);
    AuthResponse::bearer(
        session.token,
        expires_in,
        user_response(&session.user, &state.policy),
    )
}

/// POST /api/register
pub async fn register(
    state: web::Data<AppState>,
    body: web::Json<RegisterUserRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state
        .auth
        .register(Registration {
            email: req.email,
            username: req.username,
            full_name: req.full_name,
            password: req.password,
            bio: req.bio,
        })
        .await?;

    Ok(HttpResponse::Ok().json(auth_response(&state, session)))
}

/// POST /api/login
pub async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();

    let session = state.auth.login(&req.email, &req.password).await?;

    Ok(HttpResponse::Ok().json(auth_response(&state, session)))
}

/// GET /api/me - Protected route
pub async fn me(state: web::Data<AppState>, user: CurrentUser) -> AppResult<HttpResponse> {
    Ok(HttpResponse::Ok().json(user_response(&user.0, &state.policy)))
}
