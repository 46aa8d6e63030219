//! Error types for the Movie Review application

use thiserror::Error;

/// Authentication error types
///
/// Every variant is reported to the caller as `401 Unauthorized`. Token
/// failures share one message so a client cannot tell an expired token from
/// one naming a deleted user; use `Debug` to tell them apart in logs.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Incorrect username or password")]
    InvalidCredentials,

    #[error("Not authenticated")]
    MissingToken,

    #[error("Could not validate credentials")]
    InvalidToken,

    #[error("Could not validate credentials")]
    TokenExpired,

    #[error("Could not validate credentials")]
    MissingSubject,

    #[error("Could not validate credentials")]
    UnknownUser,
}
