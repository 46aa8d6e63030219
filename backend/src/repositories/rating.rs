//! Rating repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use movie_review_shared::{MovieRatingEntry, MovieSummary, RatingResponse, UserResponse};
use sqlx::{PgConnection, PgPool};

/// Rating record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingRecord {
    pub id: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub movie_id: i64,
}

impl From<RatingRecord> for MovieRatingEntry {
    fn from(record: RatingRecord) -> Self {
        Self {
            id: record.id,
            rating: record.rating,
            user_id: record.user_id,
            created_at: record.created_at,
        }
    }
}

/// Rating joined with the rated movie and the rater
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct RatingDetailRecord {
    pub id: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub user_id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
    pub movie_id: i64,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub year_published: i32,
}

impl From<RatingDetailRecord> for RatingResponse {
    fn from(record: RatingDetailRecord) -> Self {
        Self {
            id: record.id,
            rating: record.rating,
            created_at: record.created_at,
            movie: MovieSummary {
                id: record.movie_id,
                title: record.title,
                genre: record.genre,
                publisher: record.publisher,
                year_published: record.year_published,
            },
            user: UserResponse {
                id: record.user_id,
                username: record.username,
                full_name: record.full_name,
                email: record.email,
            },
        }
    }
}

/// Rating repository for database operations
pub struct RatingRepository;

impl RatingRepository {
    /// Insert a rating
    pub async fn create(
        conn: &mut PgConnection,
        user_id: i64,
        movie_id: i64,
        rating: f64,
    ) -> Result<RatingRecord> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r#"
            INSERT INTO ratings (rating, user_id, movie_id)
            VALUES ($1, $2, $3)
            RETURNING id, rating, created_at, user_id, movie_id
            "#,
        )
        .bind(rating)
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(conn)
        .await?;

        Ok(record)
    }

    /// Find rating by ID, with its movie and rater
    pub async fn find_detailed_by_id(pool: &PgPool, id: i64) -> Result<Option<RatingDetailRecord>> {
        let record = sqlx::query_as::<_, RatingDetailRecord>(
            r#"
            SELECT r.id, r.rating, r.created_at,
                   u.id AS user_id, u.username, u.full_name, u.email,
                   m.id AS movie_id, m.title, m.genre, m.publisher, m.year_published
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            JOIN movies m ON m.id = r.movie_id
            WHERE r.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// All ratings of a movie, with the movie and each rater
    pub async fn find_detailed_by_movie(
        pool: &PgPool,
        movie_id: i64,
    ) -> Result<Vec<RatingDetailRecord>> {
        let records = sqlx::query_as::<_, RatingDetailRecord>(
            r#"
            SELECT r.id, r.rating, r.created_at,
                   u.id AS user_id, u.username, u.full_name, u.email,
                   m.id AS movie_id, m.title, m.genre, m.publisher, m.year_published
            FROM ratings r
            JOIN users u ON u.id = r.user_id
            JOIN movies m ON m.id = r.movie_id
            WHERE r.movie_id = $1
            ORDER BY r.id
            "#,
        )
        .bind(movie_id)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// The rating a user gave a movie, if any
    pub async fn find_by_user_and_movie(
        conn: &mut PgConnection,
        user_id: i64,
        movie_id: i64,
    ) -> Result<Option<RatingRecord>> {
        let record = sqlx::query_as::<_, RatingRecord>(
            r#"
            SELECT id, rating, created_at, user_id, movie_id
            FROM ratings
            WHERE user_id = $1 AND movie_id = $2
            "#,
        )
        .bind(user_id)
        .bind(movie_id)
        .fetch_optional(conn)
        .await?;

        Ok(record)
    }

    /// Ratings of several movies at once
    pub async fn find_by_movie_ids(pool: &PgPool, movie_ids: &[i64]) -> Result<Vec<RatingRecord>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, RatingRecord>(
            r#"
            SELECT id, rating, created_at, user_id, movie_id
            FROM ratings
            WHERE movie_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(movie_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Every rating value currently stored for a movie
    pub async fn values_for_movie(conn: &mut PgConnection, movie_id: i64) -> Result<Vec<f64>> {
        let values = sqlx::query_scalar::<_, f64>(
            r#"
            SELECT rating
            FROM ratings
            WHERE movie_id = $1
            "#,
        )
        .bind(movie_id)
        .fetch_all(conn)
        .await?;

        Ok(values)
    }

    /// Delete a rating, returning the id of the movie it belonged to
    pub async fn delete(conn: &mut PgConnection, id: i64) -> Result<Option<i64>> {
        let movie_id = sqlx::query_scalar::<_, i64>(
            r#"
            DELETE FROM ratings
            WHERE id = $1
            RETURNING movie_id
            "#,
        )
        .bind(id)
        .fetch_optional(conn)
        .await?;

        Ok(movie_id)
    }
}
