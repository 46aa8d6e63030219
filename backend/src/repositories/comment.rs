//! Comment repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

/// Comment record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CommentRecord {
    pub id: i64,
    pub comment: String,
    pub user_id: i64,
    pub movie_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Comment repository for database operations
pub struct CommentRepository;

impl CommentRepository {
    /// Create a comment on a movie
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        movie_id: i64,
        comment: &str,
    ) -> Result<CommentRecord> {
        let record = sqlx::query_as::<_, CommentRecord>(
            r#"
            INSERT INTO comments (comment, user_id, movie_id)
            VALUES ($1, $2, $3)
            RETURNING id, comment, user_id, movie_id, created_at
            "#,
        )
        .bind(comment)
        .bind(user_id)
        .bind(movie_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find comment by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<CommentRecord>> {
        let record = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, comment, user_id, movie_id, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Comments of several movies at once, oldest first
    pub async fn find_by_movie_ids(
        pool: &PgPool,
        movie_ids: &[i64],
    ) -> Result<Vec<CommentRecord>> {
        if movie_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, CommentRecord>(
            r#"
            SELECT id, comment, user_id, movie_id, created_at
            FROM comments
            WHERE movie_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(movie_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    /// Delete a comment; its replies cascade
    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
