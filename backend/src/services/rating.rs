//! Rating service
//!
//! Keeps `movies.rating` equal to the rounded mean of the movie's ratings.
//! The insert or delete and the recompute commit in one transaction.

use crate::error::ApiError;
use crate::repositories::{unique_violation, MovieRepository, RatingRepository};
use movie_review_shared::validation::validate_rating;
use movie_review_shared::{MessageResponse, RatingResponse};
use rust_decimal::prelude::{FromPrimitive, ToPrimitive};
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::{PgConnection, PgPool};
use tracing::{debug, info};

/// Decimal places kept on a movie's average rating
const AVERAGE_DECIMAL_PLACES: u32 = 2;

/// Rating service
pub struct RatingService;

impl RatingService {
    /// Rate a movie
    ///
    /// Fails with 404 if the movie is missing, 409 if the user already rated
    /// it and 406 if the value is out of range, checked in that order.
    pub async fn create_rating(
        pool: &PgPool,
        movie_id: i64,
        user_id: i64,
        value: f64,
    ) -> Result<RatingResponse, ApiError> {
        if MovieRepository::find_by_id(pool, movie_id).await?.is_none() {
            return Err(ApiError::NotFound("movie not found".to_string()));
        }

        let mut tx = pool.begin().await?;

        if RatingRepository::find_by_user_and_movie(&mut tx, user_id, movie_id)
            .await?
            .is_some()
        {
            return Err(already_rated(movie_id));
        }

        validate_rating(value).map_err(ApiError::NotAcceptable)?;

        let rating = RatingRepository::create(&mut tx, user_id, movie_id, value)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(_) => already_rated(movie_id),
                None => ApiError::Internal(err),
            })?;

        recompute_average(&mut tx, movie_id).await?;
        tx.commit().await?;

        info!(rating_id = rating.id, movie_id, user_id, "Rating created");

        RatingRepository::find_detailed_by_id(pool, rating.id)
            .await?
            .map(RatingResponse::from)
            .ok_or_else(|| ApiError::NotFound("rating not found".to_string()))
    }

    /// Every rating of a movie, with the movie and each rater
    pub async fn ratings_for_movie(
        pool: &PgPool,
        movie_id: i64,
    ) -> Result<Vec<RatingResponse>, ApiError> {
        if MovieRepository::find_by_id(pool, movie_id).await?.is_none() {
            return Err(ApiError::NotFound("movie not found".to_string()));
        }

        let ratings = RatingRepository::find_detailed_by_movie(pool, movie_id).await?;
        Ok(ratings.into_iter().map(RatingResponse::from).collect())
    }

    pub async fn get_rating(pool: &PgPool, id: i64) -> Result<Option<RatingResponse>, ApiError> {
        let rating = RatingRepository::find_detailed_by_id(pool, id).await?;
        Ok(rating.map(RatingResponse::from))
    }

    /// Delete a rating and refresh its movie's average
    pub async fn delete_rating(pool: &PgPool, id: i64) -> Result<MessageResponse, ApiError> {
        let mut tx = pool.begin().await?;

        let movie_id = RatingRepository::delete(&mut tx, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("rating not found".to_string()))?;

        recompute_average(&mut tx, movie_id).await?;
        tx.commit().await?;

        info!(rating_id = id, movie_id, "Rating deleted");
        Ok(MessageResponse::new("rating deleted successfully"))
    }
}

fn already_rated(movie_id: i64) -> ApiError {
    ApiError::Conflict(format!("You have already rated movie_id {movie_id}"))
}

async fn recompute_average(conn: &mut PgConnection, movie_id: i64) -> Result<(), ApiError> {
    let values = RatingRepository::values_for_movie(&mut *conn, movie_id).await?;
    let average = average_rating(&values);
    debug!(movie_id, count = values.len(), ?average, "Recomputed average rating");
    MovieRepository::set_rating(conn, movie_id, average).await?;
    Ok(())
}

/// Mean of `values` rounded half away from zero to two decimal places
///
/// Returns `None` for an empty slice.
pub fn average_rating(values: &[f64]) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let sum: Decimal = values.iter().filter_map(|v| Decimal::from_f64(*v)).sum();
    let count = Decimal::from(values.len());

    (sum / count)
        .round_dp_with_strategy(AVERAGE_DECIMAL_PLACES, RoundingStrategy::MidpointAwayFromZero)
        .to_f64()
}
