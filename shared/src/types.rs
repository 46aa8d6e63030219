//! API request and response types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Default page size for movie listings
pub const DEFAULT_PAGE_LIMIT: i64 = 10;

/// Upper bound on a single page of movies
pub const MAX_PAGE_LIMIT: i64 = 100;

/// Plain acknowledgement body returned by delete endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Users and Authentication
// ============================================================================

/// Signup request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SignupRequest {
    #[validate(length(min = 1, max = 255, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, max = 255, message = "Full name cannot be empty"))]
    pub full_name: String,
    #[validate(email(message = "Invalid email format"))]
    pub email: String,
    #[validate(length(min = 1, max = 128, message = "Password cannot be empty"))]
    pub password: String,
}

/// Login request, accepted as JSON or as an OAuth2 password form
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username cannot be empty"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password cannot be empty"))]
    pub password: String,
}

/// Access token response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AccessToken {
    pub access_token: String,
    pub token_type: String,
    /// Lifetime of the token in seconds
    pub expires_in: i64,
}

/// Public view of a user; never carries the password hash
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserResponse {
    pub id: i64,
    pub username: String,
    pub full_name: String,
    pub email: String,
}

// ============================================================================
// Movies
// ============================================================================

/// Movie creation request
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateMovieRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: String,
    #[validate(length(min = 1, message = "Genre cannot be empty"))]
    pub genre: String,
    #[validate(length(min = 1, message = "Publisher cannot be empty"))]
    pub publisher: String,
    pub year_published: i32,
}

/// Partial movie update; omitted fields keep their stored value
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct UpdateMovieRequest {
    #[validate(length(min = 1, message = "Title cannot be empty"))]
    pub title: Option<String>,
    #[validate(length(min = 1, message = "Genre cannot be empty"))]
    pub genre: Option<String>,
    #[validate(length(min = 1, message = "Publisher cannot be empty"))]
    pub publisher: Option<String>,
    pub year_published: Option<i32>,
}

/// Movie listing query parameters
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MovieListQuery {
    pub offset: Option<i64>,
    pub limit: Option<i64>,
}

impl MovieListQuery {
    /// Resolve defaults and clamp to sane bounds, returning `(offset, limit)`
    pub fn normalize(&self) -> (i64, i64) {
        let offset = self.offset.unwrap_or(0).max(0);
        let limit = self
            .limit
            .unwrap_or(DEFAULT_PAGE_LIMIT)
            .clamp(1, MAX_PAGE_LIMIT);
        (offset, limit)
    }
}

/// The descriptive fields of a movie, embedded in rating and comment responses
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieSummary {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub year_published: i32,
}

/// Full movie view with its owner, ratings and comment threads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieResponse {
    pub id: i64,
    pub title: String,
    pub genre: String,
    pub publisher: String,
    pub year_published: i32,
    /// Average of all ratings, two decimal places; absent when unrated
    pub rating: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub user_id: Option<i64>,
    pub user: Option<UserResponse>,
    pub ratings: Vec<MovieRatingEntry>,
    pub comments: Vec<CommentThread>,
}

// ============================================================================
// Ratings
// ============================================================================

/// Rating submission
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRatingRequest {
    pub rating: f64,
}

/// Rating with the rated movie and the rater
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RatingResponse {
    pub id: i64,
    pub rating: f64,
    pub created_at: DateTime<Utc>,
    pub movie: MovieSummary,
    pub user: UserResponse,
}

/// Compact rating entry embedded in a movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieRatingEntry {
    pub id: i64,
    pub rating: f64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

// ============================================================================
// Comments and Replies
// ============================================================================

/// Comment submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateCommentRequest {
    #[validate(length(min = 1, message = "Comment cannot be empty"))]
    pub comment: String,
}

/// Query string of `POST /comments/`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateCommentQuery {
    pub movie_id: i64,
}

/// Reply submission
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateReplyRequest {
    #[validate(length(min = 1, message = "Reply cannot be empty"))]
    pub reply: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub id: i64,
    pub reply: String,
    pub user_id: i64,
    pub comment_id: Option<i64>,
    pub created_at: DateTime<Utc>,
}

/// Comment with the movie it belongs to and all of its replies
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentResponse {
    pub id: i64,
    pub comment: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub movie: MovieSummary,
    pub replies: Vec<ReplyResponse>,
}

/// Comment with replies, embedded in a movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommentThread {
    pub id: i64,
    pub comment: String,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
    pub replies: Vec<ReplyResponse>,
}

/// All comment threads of one movie
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MovieCommentsResponse {
    /// Movie id
    pub id: i64,
    pub comments: Vec<CommentResponse>,
}
