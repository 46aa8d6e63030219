//! Authentication module
//!
//! Provides JWT bearer authentication with argon2 password hashing.

mod jwt;
mod middleware;
mod password;

pub use jwt::{Claims, JwtService};
pub use middleware::{bearer_token, current_user, CurrentUser};
pub use password::PasswordService;
