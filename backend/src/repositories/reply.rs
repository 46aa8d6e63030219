//! Reply repository for database operations

use anyhow::Result;
use chrono::{DateTime, Utc};
use movie_review_shared::ReplyResponse;
use sqlx::PgPool;

/// Reply record from database
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ReplyRecord {
    pub id: i64,
    pub reply: String,
    pub user_id: i64,
    pub comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

impl From<ReplyRecord> for ReplyResponse {
    fn from(record: ReplyRecord) -> Self {
        Self {
            id: record.id,
            reply: record.reply,
            user_id: record.user_id,
            comment_id: record.comment_id,
            created_at: record.created_at,
        }
    }
}

/// Reply repository for database operations
pub struct ReplyRepository;

impl ReplyRepository {
    /// Reply to a comment
    pub async fn create(
        pool: &PgPool,
        user_id: i64,
        comment_id: i64,
        reply: &str,
    ) -> Result<ReplyRecord> {
        let record = sqlx::query_as::<_, ReplyRecord>(
            r#"
            INSERT INTO replies (reply, user_id, comment_id)
            VALUES ($1, $2, $3)
            RETURNING id, reply, user_id, comment_id, created_at
            "#,
        )
        .bind(reply)
        .bind(user_id)
        .bind(comment_id)
        .fetch_one(pool)
        .await?;

        Ok(record)
    }

    /// Find reply by ID
    pub async fn find_by_id(pool: &PgPool, id: i64) -> Result<Option<ReplyRecord>> {
        let record = sqlx::query_as::<_, ReplyRecord>(
            r#"
            SELECT id, reply, user_id, comment_id, created_at
            FROM replies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(record)
    }

    /// Replies to several comments at once, oldest first
    pub async fn find_by_comment_ids(
        pool: &PgPool,
        comment_ids: &[i64],
    ) -> Result<Vec<ReplyRecord>> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let records = sqlx::query_as::<_, ReplyRecord>(
            r#"
            SELECT id, reply, user_id, comment_id, created_at
            FROM replies
            WHERE comment_id = ANY($1)
            ORDER BY id
            "#,
        )
        .bind(comment_ids)
        .fetch_all(pool)
        .await?;

        Ok(records)
    }

    pub async fn delete(pool: &PgPool, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM replies
            WHERE id = $1
            "#,
        )
        .bind(id)
        .execute(pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }
}
