//! Authentication extractor
//!
//! Protected handlers take a [`CurrentUser`] argument. The token is checked
//! with the pre-computed keys in `AppState` and the named user must still
//! exist; every failure becomes a 401 before the handler body runs.

use crate::error::ApiError;
use crate::repositories::{UserRecord, UserRepository};
use crate::state::AppState;
use axum::{
    extract::FromRef,
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
};
use movie_review_shared::AuthError;
use tracing::debug;

/// The user a request is authenticated as
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub id: i64,
}

impl From<UserRecord> for CurrentUser {
    fn from(user: UserRecord) -> Self {
        Self { id: user.id }
    }
}

/// Pull the token out of an `Authorization: Bearer <token>` header
pub fn bearer_token(headers: &HeaderMap) -> Result<&str, AuthError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or(AuthError::MissingToken)?;

    let (scheme, token) = value.split_once(' ').ok_or(AuthError::MissingToken)?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return Err(AuthError::MissingToken);
    }

    let token = token.trim();
    if token.is_empty() {
        return Err(AuthError::MissingToken);
    }
    Ok(token)
}

/// Resolve a bearer token to the user it was issued to
pub async fn current_user(state: &AppState, token: &str) -> Result<CurrentUser, ApiError> {
    let claims = state.jwt().validate(token)?;

    let user = UserRepository::find_by_username(state.db(), &claims.sub)
        .await?
        .ok_or_else(|| {
            debug!(username = %claims.sub, "Token subject no longer exists");
            AuthError::UnknownUser
        })?;

    Ok(user.into())
}

#[axum::async_trait]
impl<S> axum::extract::FromRequestParts<S> for CurrentUser
where
    AppState: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let app_state = AppState::from_ref(state);
        let token = bearer_token(&parts.headers)?;
        current_user(&app_state, token).await
    }
}
