//! Business logic services
//!
//! Services encapsulate business logic and coordinate between
//! repositories, translating missing rows and rule violations into
//! [`ApiError`](crate::error::ApiError)s.

pub mod comment;
pub mod movie;
pub mod rating;
pub mod user;

pub use comment::CommentService;
pub use movie::MovieService;
pub use rating::{average_rating, RatingService};
pub use user::UserService;
