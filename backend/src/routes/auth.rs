//! Signup and login routes

use super::extract::{LoginForm, ValidatedJson};
use crate::error::ApiResult;
use crate::services::UserService;
use crate::state::AppState;
use axum::{extract::State, Json};
use movie_review_shared::{AccessToken, SignupRequest, UserResponse};

/// Register a new user
///
/// POST /signup
pub async fn signup(
    State(state): State<AppState>,
    ValidatedJson(req): ValidatedJson<SignupRequest>,
) -> ApiResult<Json<UserResponse>> {
    let user = UserService::signup(state.db(), req).await?;
    Ok(Json(user))
}

/// Exchange a username and password for an access token
///
/// POST /login
///
/// Accepts a JSON body or an `application/x-www-form-urlencoded` OAuth2
/// password form.
pub async fn login(
    State(state): State<AppState>,
    LoginForm(req): LoginForm,
) -> ApiResult<Json<AccessToken>> {
    let token = UserService::login(state.db(), state.jwt(), req).await?;
    Ok(Json(token))
}
