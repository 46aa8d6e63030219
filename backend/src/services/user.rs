//! User service for signup and authentication
//!
//! Password hashing and verification run on the blocking thread pool, and
//! tokens are signed with the keys pre-computed in [`JwtService`].

use crate::auth::{JwtService, PasswordService};
use crate::error::ApiError;
use crate::repositories::{unique_violation, CreateUser, UserRecord, UserRepository};
use movie_review_shared::{AccessToken, AuthError, LoginRequest, SignupRequest, UserResponse};
use sqlx::PgPool;
use tracing::info;

/// Token type reported alongside every access token
pub const TOKEN_TYPE: &str = "bearer";

/// User service for authentication operations
pub struct UserService;

impl UserService {
    /// Register a new user
    ///
    /// Username, email and full name must each be unused. The checks run in
    /// that order so the first clash is the one reported.
    pub async fn signup(pool: &PgPool, request: SignupRequest) -> Result<UserResponse, ApiError> {
        if UserRepository::find_by_username(pool, &request.username)
            .await?
            .is_some()
        {
            return Err(duplicate_field("uq_users_username"));
        }
        if UserRepository::find_by_email(pool, &request.email)
            .await?
            .is_some()
        {
            return Err(duplicate_field("uq_users_email"));
        }
        if UserRepository::find_by_full_name(pool, &request.full_name)
            .await?
            .is_some()
        {
            return Err(duplicate_field("uq_users_full_name"));
        }

        let hashed_password = PasswordService::hash_async(request.password).await?;

        let input = CreateUser {
            username: request.username,
            full_name: request.full_name,
            email: request.email,
            hashed_password,
        };

        // A concurrent signup can still win the race between check and insert
        let user = UserRepository::create(pool, input)
            .await
            .map_err(|err| match unique_violation(&err) {
                Some(constraint) => duplicate_field(&constraint),
                None => ApiError::Internal(err),
            })?;

        info!(user_id = user.id, username = %user.username, "User registered");
        Ok(user.into())
    }

    /// Check a username and password pair
    ///
    /// Unknown usernames and wrong passwords are indistinguishable to the
    /// caller.
    pub async fn authenticate(
        pool: &PgPool,
        username: &str,
        password: &str,
    ) -> Result<UserRecord, ApiError> {
        let user = UserRepository::find_by_username(pool, username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let valid =
            PasswordService::verify_async(password.to_string(), user.hashed_password.clone())
                .await?;

        if !valid {
            return Err(AuthError::InvalidCredentials.into());
        }

        Ok(user)
    }

    /// Authenticate and issue an access token for the user
    pub async fn login(
        pool: &PgPool,
        jwt_service: &JwtService,
        request: LoginRequest,
    ) -> Result<AccessToken, ApiError> {
        let user = Self::authenticate(pool, &request.username, &request.password).await?;

        let access_token = jwt_service.issue(&user.username, None)?;

        info!(user_id = user.id, "User logged in");
        Ok(AccessToken {
            access_token,
            token_type: TOKEN_TYPE.to_string(),
            expires_in: jwt_service.access_token_expiry_secs(),
        })
    }
}

/// Map a users unique constraint to the message reported for it
fn duplicate_field(constraint: &str) -> ApiError {
    let message = match constraint {
        "uq_users_username" => "Username already registered",
        "uq_users_email" => "Email already registered",
        "uq_users_full_name" => "Fullname already registered",
        _ => "User already registered",
    };
    ApiError::BadRequest(message.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_field_messages() {
        let cases = [
            ("uq_users_username", "Username already registered"),
            ("uq_users_email", "Email already registered"),
            ("uq_users_full_name", "Fullname already registered"),
            ("something_else", "User already registered"),
        ];

        for (constraint, expected) in cases {
            match duplicate_field(constraint) {
                ApiError::BadRequest(message) => assert_eq!(message, expected),
                other => panic!("unexpected error: {other:?}"),
            }
        }
    }
}
