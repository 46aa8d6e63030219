//! Movie catalogue routes
//!
//! Reads are public. Creating needs a logged-in user, and only the user
//! who created a movie may change or delete it.

use super::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::services::MovieService;
use crate::state::AppState;
use axum::{extract::State, http::StatusCode, Json};
use movie_review_shared::{
    CreateMovieRequest, MessageResponse, MovieListQuery, MovieResponse, UpdateMovieRequest,
};
use tracing::warn;

/// List movies
///
/// GET /movies/?offset=0&limit=10
pub async fn list_movies(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<MovieListQuery>,
) -> ApiResult<Json<Vec<MovieResponse>>> {
    let (offset, limit) = query.normalize();
    let movies = MovieService::list_movies(state.db(), offset, limit).await?;
    Ok(Json(movies))
}

/// GET /movies/:id
pub async fn get_movie(
    State(state): State<AppState>,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MovieResponse>> {
    let movie = MovieService::get_movie(state.db(), id)
        .await?
        .ok_or_else(|| {
            warn!(movie_id = id, "Movie not found");
            ApiError::NotFound("movie not found".to_string())
        })?;
    Ok(Json(movie))
}

/// Create a movie owned by the caller
///
/// POST /movies/
pub async fn create_movie(
    State(state): State<AppState>,
    user: CurrentUser,
    ValidatedJson(req): ValidatedJson<CreateMovieRequest>,
) -> ApiResult<(StatusCode, Json<MovieResponse>)> {
    let movie = MovieService::create_movie(state.db(), req, user.id).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// Update the supplied fields of one of the caller's movies
///
/// PUT /movies/:id
pub async fn update_movie(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<UpdateMovieRequest>,
) -> ApiResult<(StatusCode, Json<MovieResponse>)> {
    let movie = MovieService::update_movie(state.db(), id, req, user.id).await?;
    Ok((StatusCode::CREATED, Json(movie)))
}

/// DELETE /movies/:id
pub async fn delete_movie(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = MovieService::delete_movie(state.db(), id, user.id).await?;
    Ok(Json(message))
}
