//! Comment and reply service

use crate::error::ApiError;
use crate::repositories::{
    CommentRecord, CommentRepository, MovieRepository, ReplyRecord, ReplyRepository,
};
use crate::services::movie::group_replies;
use movie_review_shared::{
    CommentResponse, MessageResponse, MovieCommentsResponse, MovieSummary, ReplyResponse,
};
use sqlx::PgPool;
use tracing::info;

/// Comment service
pub struct CommentService;

impl CommentService {
    /// Comment on a movie
    pub async fn create_comment(
        pool: &PgPool,
        movie_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<CommentResponse, ApiError> {
        let movie = MovieRepository::find_by_id(pool, movie_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        let comment = CommentRepository::create(pool, user_id, movie_id, text).await?;
        info!(comment_id = comment.id, movie_id, user_id, "Comment created");

        Ok(comment_response(comment, movie.summary(), Vec::new()))
    }

    pub async fn get_comment(pool: &PgPool, id: i64) -> Result<Option<CommentRecord>, ApiError> {
        Ok(CommentRepository::find_by_id(pool, id).await?)
    }

    pub async fn get_reply(pool: &PgPool, id: i64) -> Result<Option<ReplyRecord>, ApiError> {
        Ok(ReplyRepository::find_by_id(pool, id).await?)
    }

    /// Reply to a comment, returning the comment with all of its replies
    pub async fn create_reply(
        pool: &PgPool,
        comment_id: i64,
        user_id: i64,
        text: &str,
    ) -> Result<CommentResponse, ApiError> {
        let comment = CommentRepository::find_by_id(pool, comment_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Comment not found".to_string()))?;

        let reply = ReplyRepository::create(pool, user_id, comment_id, text).await?;
        info!(reply_id = reply.id, comment_id, user_id, "Reply created");

        let movie = MovieRepository::find_by_id(pool, comment.movie_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        let replies = ReplyRepository::find_by_comment_ids(pool, &[comment_id])
            .await?
            .into_iter()
            .map(ReplyResponse::from)
            .collect();

        Ok(comment_response(comment, movie.summary(), replies))
    }

    /// Every comment thread of a movie
    pub async fn comments_for_movie(
        pool: &PgPool,
        movie_id: i64,
    ) -> Result<MovieCommentsResponse, ApiError> {
        let movie = MovieRepository::find_by_id(pool, movie_id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        let comments = CommentRepository::find_by_movie_ids(pool, &[movie_id]).await?;
        let comment_ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        let mut replies =
            group_replies(ReplyRepository::find_by_comment_ids(pool, &comment_ids).await?);

        let summary = movie.summary();
        let comments = comments
            .into_iter()
            .map(|comment| {
                let thread = replies.remove(&comment.id).unwrap_or_default();
                comment_response(comment, summary.clone(), thread)
            })
            .collect();

        Ok(MovieCommentsResponse {
            id: movie_id,
            comments,
        })
    }

    /// Delete a comment together with its replies
    pub async fn delete_comment(pool: &PgPool, id: i64) -> Result<MessageResponse, ApiError> {
        if !CommentRepository::delete(pool, id).await? {
            return Err(ApiError::NotFound("comment not found".to_string()));
        }

        info!(comment_id = id, "Comment deleted");
        Ok(MessageResponse::new("comment deleted successfully"))
    }

    pub async fn delete_reply(pool: &PgPool, id: i64) -> Result<MessageResponse, ApiError> {
        if !ReplyRepository::delete(pool, id).await? {
            return Err(ApiError::NotFound("reply not found".to_string()));
        }

        info!(reply_id = id, "Reply deleted");
        Ok(MessageResponse::new("reply deleted successfully"))
    }
}

fn comment_response(
    comment: CommentRecord,
    movie: MovieSummary,
    replies: Vec<ReplyResponse>,
) -> CommentResponse {
    CommentResponse {
        id: comment.id,
        comment: comment.comment,
        user_id: comment.user_id,
        created_at: comment.created_at,
        movie,
        replies,
    }
}
