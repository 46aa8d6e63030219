//! Movie repository for database operations
//!
//! Every read joins the owning user so a movie and its owner arrive in one
//! round trip.

use anyhow::Result;
use chrono::{DateTime, Utc};
use movie_review_shared::{MovieSummary, UserResponse};
use sqlx::{PgConnection, PgPool};

/// Movie record from database, with the owner's public columns
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MovieRecord {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub year_published: i32,
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub owner_username: Option<String>,
    pub owner_full_name: Option<String>,
    pub owner_email: Option<String>,
}

impl MovieRecord {
    pub fn summary(&self) -> MovieSummary {
        MovieSummary {
            id: self.id,
            title: self.title.clone(),
            genre: self.genre.clone(),
            publisher: self.publisher.clone(),
            year_published: self.year_published,
        }
    }

    /// The owning user, when the movie has one
    pub fn owner(&self) -> Option<UserResponse> {
        match (
            self.user_id,
            &self.owner_username,
            &self.owner_full_name,
            &self.owner_email,
        ) {
            (Some(id), Some(username), Some(full_name), Some(email)) => Some(UserResponse {
                id,
                username: username.clone(),
                full_name: full_name.clone(),
                email: email.clone(),
            }),
            _ => None,
        }
    }

    pub fn is_owned_by(&self, user_id: i64) -> bool {
        self.user_id == Some(user_id)
    }
}

/// Input for creating a movie
#[derive(Debug, Clone)]
pub struct CreateMovie {
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub year_published: i32,
    pub user_id: i64,
}

/// Input for a partial movie update
#[derive(Debug, Clone, Default)]
pub struct UpdateMovie {
    pub title: Option<String>,
    pub genre: Option<String>,
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
}

/// Movie repository for database operations
pub struct MovieRepository;

impl MovieRepository {
    /// Create a new movie
    pub async fn create(pool: &PgPool, input: CreateMovie) -> Result<MovieRecord> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            WITH inserted AS (
                INSERT INTO movies (title, genre, publisher, year_published, user_id)
                VALUES ($1, $2, $3, $4, $5)
                RETURNING *
            )
            SELECT m.id, m.title, m.genre, m.publisher, m.year_published, m.rating,
                   m.created_at, m.user_id,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.email AS owner_email
            FROM inserted m
            LEFT JOIN users u ON u.id = m.user_id
            "#,
        )
        .bind(&input.title)
        .bind(&input.genre)
        .bind(&input.publisher)
        .bind(input.year_published)
        .bind(input.user_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find movie by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            SELECT m.id, m.title, m.genre, m.publisher, m.year_published, m.rating,
                   m.created_at, m.user_id,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.email AS owner_email
            FROM movies m
            LEFT JOIN users u ON u.id = m.user_id
            WHERE m.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// List movies in id order
    pub async fn list(pool: &PgPool, offset: i64, limit: i64) -> Result<Vec<MovieRecord>> {
        let records = sqlx::query_as::<_, MovieRecord>(
            r#"
            SELECT m.id, m.title, m.genre, m.publisher, m.year_published, m.rating,
                   m.created_at, m.user_id,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.email AS owner_email
            FROM movies m
            LEFT JOIN users u ON u.id = m.user_id
            ORDER BY m.id
            OFFSET $1
            LIMIT $2
            "#,
        )
        .bind(offset)
        .bind(limit)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Apply a partial update; `None` fields keep their stored value
    pub async fn update(
        pool: &PgPool,
        id: i64,
        updates: UpdateMovie,
    ) -> Result<Option<MovieRecord>> {
        let record = sqlx::query_as::<_, MovieRecord>(
            r#"
            WITH updated AS (
                UPDATE movies SET
                    title = COALESCE($2, title),
                    genre = COALESCE($3, genre),
                    publisher = COALESCE($4, publisher),
                    year_published = COALESCE($5, year_published)
                WHERE id = $1
                RETURNING *
            )
            SELECT m.id, m.title, m.genre, m.publisher, m.year_published, m.rating,
                   m.created_at, m.user_id,
                   u.username AS owner_username, u.full_name AS owner_full_name,
                   u.email AS owner_email
            FROM updated m
            LEFT JOIN users u ON u.id = m.user_id
            "#,
        )
        .bind(id)
        .bind(updates.title)
        .bind(updates.genre)
        .bind(updates.publisher)
        .bind(updates.year_published)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Store a recomputed average rating
    pub async fn set_rating(conn: &mut PgConnection, id: i64, rating: Option<f64>) -> Result<()> {
        sqlx::query(
            r#"
            UPDATE movies SET rating = $2
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(rating)
        .execute(conn)
        .await?;

        Ok(())
    }

    /// Delete a movie; its ratings and comments go with it
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM movies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(user_id: Option<i64>) -> MovieRecord {
        MovieRecord {
            id: 1,
            title: "Alien".to_string(),
            genre: "Horror".to_string(),
            publisher: "20th Century Fox".to_string(),
            year_published: 1979,
            rating: None,
            created_at: Utc::now(),
            user_id,
            owner_username: user_id.map(|_| "ripley".to_string()),
            owner_full_name: user_id.map(|_| "Ellen Ripley".to_string()),
            owner_email: user_id.map(|_| "ripley@example.com".to_string()),
        }
    }

    #[test]
    fn test_owner_present_when_joined() {
        let owner = record(Some(9)).owner().unwrap();
        assert_eq!(owner.id, 9);
        assert_eq!(owner.username, "ripley");
    }

    #[test]
    fn test_ownerless_movie() {
        let movie = record(None);
        assert!(movie.owner().is_none());
        assert!(!movie.is_owned_by(9));
    }

    #[test]
    fn test_ownership_check() {
        let movie = record(Some(9));
        assert!(movie.is_owned_by(9));
        assert!(!movie.is_owned_by(10));
    }

    #[test]
    fn test_summary_copies_descriptive_fields() {
        let summary = record(Some(9)).summary();
        assert_eq!(summary.title, "Alien");
        assert_eq!(summary.year_published, 1979);
    }
}
