//! Authentication extractors.
//!
//! Use these in handlers to require a caller identity:
//! ```ignore
//! async fn protected_route(CurrentUser(user): CurrentUser) -> impl Responder {
//!     format!("Hello, {}!", user.username)
//! }
//! ```

use actix_web::{FromRequest, HttpRequest, dev::Payload, http::header, web};
use futures::future::LocalBoxFuture;

use portal_core::domain::User;
use portal_core::ports::AuthError;

use crate::middleware::error::AppError;
use crate::state::AppState;

/// The stored user named by a valid bearer token.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl CurrentUser {
    pub fn into_inner(self) -> User {
        self.0
    }
}

/// A [`CurrentUser`] that also passes the founder privilege check.
#[derive(Debug, Clone)]
pub struct FounderUser(pub User);

/// Pull the token out of `Authorization: Bearer <token>`.
pub fn bearer_token(req: &HttpRequest) -> Result<String, AuthError> {
    let value = req
        .headers()
        .get(header::AUTHORIZATION)
        .ok_or(AuthError::MissingAuth)?;

    let value = value
        .to_str()
        .map_err(|_| AuthError::InvalidToken("Invalid authorization header".to_string()))?;

    value
        .strip_prefix("Bearer ")
        .filter(|token| !token.is_empty())
        .map(String::from)
        .ok_or(AuthError::MissingAuth)
}

impl FromRequest for CurrentUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let token = bearer_token(req);

        Box::pin(async move {
            let Some(state) = state else {
                return Err(AppError::Internal(
                    "AppState not found in app data".to_string(),
                ));
            };

            let user = state.auth.authenticate(&token?).await?;
            Ok(CurrentUser(user))
        })
    }
}

impl FromRequest for FounderUser {
    type Error = AppError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let state = req.app_data::<web::Data<AppState>>().cloned();
        let current = CurrentUser::from_request(req, payload);

        Box::pin(async move {
            let CurrentUser(user) = current.await?;

            let privileged = state.is_some_and(|state| state.policy.is_privileged(&user));
            if !privileged {
                tracing::debug!(user_id = %user.id, "Founder check failed");
                return Err(AuthError::InsufficientPermissions.into());
            }

            Ok(FounderUser(user))
        })
    }
}
