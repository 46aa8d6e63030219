//! Movie service
//!
//! Reads eager-load each movie's owner, ratings and comment threads. The
//! owner arrives joined with the movie row; ratings, comments and replies
//! take one batched query per relation regardless of how many movies are
//! being loaded.

use crate::error::ApiError;
use crate::repositories::{
    CommentRecord, CommentRepository, CreateMovie, MovieRecord, MovieRepository, RatingRepository,
    ReplyRecord, ReplyRepository, UpdateMovie,
};
use movie_review_shared::{
    CommentThread, CreateMovieRequest, MessageResponse, MovieRatingEntry, MovieResponse,
    ReplyResponse, UpdateMovieRequest,
};
use sqlx::PgPool;
use std::collections::HashMap;
use tracing::{info, warn};

/// Movie service for catalogue operations
pub struct MovieService;

impl MovieService {
    /// Fetch one movie with everything attached to it
    pub async fn get_movie(pool: &PgPool, id: i64) -> Result<Option<MovieResponse>, ApiError> {
        let Some(record) = MovieRepository::find_by_id(pool, id).await? else {
            return Ok(None);
        };

        let mut movies = Self::load_relations(pool, vec![record]).await?;
        Ok(movies.pop())
    }

    /// A page of movies in id order
    pub async fn list_movies(
        pool: &PgPool,
        offset: i64,
        limit: i64,
    ) -> Result<Vec<MovieResponse>, ApiError> {
        let records = MovieRepository::list(pool, offset, limit).await?;
        Self::load_relations(pool, records).await
    }

    pub async fn create_movie(
        pool: &PgPool,
        request: CreateMovieRequest,
        owner_id: i64,
    ) -> Result<MovieResponse, ApiError> {
        let input = CreateMovie {
            title: request.title,
            genre: request.genre,
            publisher: request.publisher,
            year_published: request.year_published,
            user_id: owner_id,
        };

        let record = MovieRepository::create(pool, input).await?;
        info!(movie_id = record.id, user_id = owner_id, "Movie created");

        // A new movie has no ratings or comments yet
        Ok(build_response(record, Vec::new(), Vec::new()))
    }

    /// Update the supplied fields of a movie owned by `requester_id`
    pub async fn update_movie(
        pool: &PgPool,
        id: i64,
        request: UpdateMovieRequest,
        requester_id: i64,
    ) -> Result<MovieResponse, ApiError> {
        let existing = MovieRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        if !existing.is_owned_by(requester_id) {
            warn!(movie_id = id, user_id = requester_id, "Rejected update of foreign movie");
            return Err(ApiError::Forbidden(
                "Not authorized to update this movie".to_string(),
            ));
        }

        let updates = UpdateMovie {
            title: request.title,
            genre: request.genre,
            publisher: request.publisher,
            year_published: request.year_published,
        };

        let record = MovieRepository::update(pool, id, updates)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        info!(movie_id = id, "Movie updated");
        let mut movies = Self::load_relations(pool, vec![record]).await?;
        movies
            .pop()
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))
    }

    /// Delete a movie owned by `requester_id`
    pub async fn delete_movie(
        pool: &PgPool,
        id: i64,
        requester_id: i64,
    ) -> Result<MessageResponse, ApiError> {
        let existing = MovieRepository::find_by_id(pool, id)
            .await?
            .ok_or_else(|| ApiError::NotFound("Movie not found".to_string()))?;

        if !existing.is_owned_by(requester_id) {
            warn!(movie_id = id, user_id = requester_id, "Rejected delete of foreign movie");
            return Err(ApiError::Forbidden(format!(
                "You are not permitted to delete this movie: {}",
                existing.title
            )));
        }

        if !MovieRepository::delete(pool, id).await? {
            return Err(ApiError::NotFound("Movie not found".to_string()));
        }

        info!(movie_id = id, "Movie deleted");
        Ok(MessageResponse::new(format!("movie {id} deleted successfully")))
    }

    async fn load_relations(
        pool: &PgPool,
        records: Vec<MovieRecord>,
    ) -> Result<Vec<MovieResponse>, ApiError> {
        if records.is_empty() {
            return Ok(Vec::new());
        }

        let movie_ids: Vec<i64> = records.iter().map(|m| m.id).collect();

        let ratings = RatingRepository::find_by_movie_ids(pool, &movie_ids).await?;
        let comments = CommentRepository::find_by_movie_ids(pool, &movie_ids).await?;
        let comment_ids: Vec<i64> = comments.iter().map(|c| c.id).collect();
        let replies = ReplyRepository::find_by_comment_ids(pool, &comment_ids).await?;

        let mut ratings_by_movie: HashMap<i64, Vec<MovieRatingEntry>> = HashMap::new();
        for rating in ratings {
            ratings_by_movie
                .entry(rating.movie_id)
                .or_default()
                .push(rating.into());
        }

        let mut threads_by_movie: HashMap<i64, Vec<CommentThread>> = HashMap::new();
        for (movie_id, thread) in group_threads(comments, replies) {
            threads_by_movie.entry(movie_id).or_default().push(thread);
        }

        Ok(records
            .into_iter()
            .map(|record| {
                let ratings = ratings_by_movie.remove(&record.id).unwrap_or_default();
                let comments = threads_by_movie.remove(&record.id).unwrap_or_default();
                build_response(record, ratings, comments)
            })
            .collect())
    }
}

/// Attach replies to their comments, keeping comment order
pub(crate) fn group_threads(
    comments: Vec<CommentRecord>,
    replies: Vec<ReplyRecord>,
) -> Vec<(i64, CommentThread)> {
    let mut replies_by_comment = group_replies(replies);

    comments
        .into_iter()
        .map(|comment| {
            let replies = replies_by_comment.remove(&comment.id).unwrap_or_default();
            (
                comment.movie_id,
                CommentThread {
                    id: comment.id,
                    comment: comment.comment,
                    user_id: comment.user_id,
                    created_at: comment.created_at,
                    replies,
                },
            )
        })
        .collect()
}

pub(crate) fn group_replies(replies: Vec<ReplyRecord>) -> HashMap<i64, Vec<ReplyResponse>> {
    let mut grouped: HashMap<i64, Vec<ReplyResponse>> = HashMap::new();
    for reply in replies {
        if let Some(comment_id) = reply.comment_id {
            grouped.entry(comment_id).or_default().push(reply.into());
        }
    }
    grouped
}

fn build_response(
    record: MovieRecord,
    ratings: Vec<MovieRatingEntry>,
    comments: Vec<CommentThread>,
) -> MovieResponse {
    let user = record.owner();
    MovieResponse {
        id: record.id,
        title: record.title,
        genre: record.genre,
        publisher: record.publisher,
        year_published: record.year_published,
        rating: record.rating,
        created_at: record.created_at,
        user_id: record.user_id,
        user,
        ratings,
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn comment(id: i64, movie_id: i64) -> CommentRecord {
        CommentRecord {
            id,
            comment: format!("comment {id}"),
            user_id: 1,
            movie_id,
            created_at: Utc::now(),
        }
    }

    fn reply(id: i64, comment_id: Option<i64>) -> ReplyRecord {
        ReplyRecord {
            id,
            reply: format!("reply {id}"),
            user_id: 2,
            comment_id,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_replies_attach_to_their_comment() {
        let threads = group_threads(
            vec![comment(1, 10), comment(2, 10), comment(3, 11)],
            vec![reply(1, Some(2)), reply(2, Some(2)), reply(3, Some(3))],
        );

        assert_eq!(threads.len(), 3);
        assert!(threads[0].1.replies.is_empty());
        assert_eq!(threads[1].1.replies.len(), 2);
        assert_eq!(threads[2].0, 11);
        assert_eq!(threads[2].1.replies[0].id, 3);
    }

    #[test]
    fn test_orphan_replies_are_dropped() {
        let grouped = group_replies(vec![reply(1, None), reply(2, Some(5))]);
        assert_eq!(grouped.len(), 1);
        assert_eq!(grouped[&5].len(), 1);
    }

    #[test]
    fn test_build_response_without_owner() {
        let record = MovieRecord {
            id: 4,
            title: "Metropolis".to_string(),
            genre: "Science Fiction".to_string(),
            publisher: "UFA".to_string(),
            year_published: 1927,
            rating: Some(4.5),
            created_at: Utc::now(),
            user_id: None,
            owner_username: None,
            owner_full_name: None,
            owner_email: None,
        };

        let response = build_response(record, Vec::new(), Vec::new());
        assert_eq!(response.id, 4);
        assert_eq!(response.rating, Some(4.5));
        assert!(response.user.is_none());
        assert!(response.comments.is_empty());
    }
}
