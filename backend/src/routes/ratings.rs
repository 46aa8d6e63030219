//! Rating routes

use super::extract::ApiPath;
use crate::auth::CurrentUser;
use crate::error::{ApiError, ApiResult};
use crate::services::RatingService;
use crate::state::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use movie_review_shared::{CreateRatingRequest, MessageResponse, RatingResponse};

/// Rate a movie as the caller
///
/// POST /ratings/:id
///
/// The rating value is range-checked by the service, after the movie and
/// duplicate checks, so the body only has to parse here.
pub async fn create_rating(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(movie_id): ApiPath<i64>,
    body: Result<Json<CreateRatingRequest>, JsonRejection>,
) -> ApiResult<Json<RatingResponse>> {
    let Json(req) = body.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let rating = RatingService::create_rating(state.db(), movie_id, user.id, req.rating).await?;
    Ok(Json(rating))
}

/// All ratings of a movie
///
/// GET /ratings/:id/rate
pub async fn ratings_for_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i64>,
) -> ApiResult<Json<Vec<RatingResponse>>> {
    let ratings = RatingService::ratings_for_movie(state.db(), movie_id).await?;
    Ok(Json(ratings))
}

/// DELETE /ratings/:id
pub async fn delete_rating(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = RatingService::delete_rating(state.db(), id).await?;
    Ok(Json(message))
}
