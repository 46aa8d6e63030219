//! Database repositories
//!
//! Provides the data access layer: one repository per table, each issuing
//! plain SQL through sqlx. Relationships are followed by id, never through
//! an in-memory object graph.

pub mod comment;
pub mod movie;
pub mod rating;
pub mod reply;
pub mod user;

pub use comment::{CommentRecord, CommentRepository};
pub use movie::{CreateMovie, MovieRecord, MovieRepository, UpdateMovie};
pub use rating::{RatingDetailRecord, RatingRecord, RatingRepository};
pub use reply::{ReplyRecord, ReplyRepository};
pub use user::{CreateUser, UserRecord, UserRepository};

/// Name of the violated unique constraint, if `err` is a unique violation
pub fn unique_violation(err: &anyhow::Error) -> Option<String> {
    let db_error = err.downcast_ref::<sqlx::Error>()?.as_database_error()?;
    if !db_error.is_unique_violation() {
        return None;
    }
    Some(db_error.constraint().unwrap_or_default().to_string())
}
