//! Request extractors that report failures as [`ApiError`]s
//!
//! axum's stock extractors answer a bad body, path or query with a plain
//! text response. These wrappers keep the `{detail, code}` error body on
//! every 400.

use crate::error::ApiError;
use axum::{
    extract::{
        rejection::{FormRejection, JsonRejection, PathRejection, QueryRejection},
        FromRequest, FromRequestParts, Request,
    },
    http::{header::CONTENT_TYPE, request::Parts},
    Form, Json,
};
use movie_review_shared::validation::describe_validation_errors;
use movie_review_shared::LoginRequest;
use serde::de::DeserializeOwned;
use validator::Validate;

/// JSON body that has been parsed and passed `validator` checks
#[derive(Debug, Clone)]
pub struct ValidatedJson<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;

        value
            .validate()
            .map_err(|errors| ApiError::Validation(describe_validation_errors(&errors)))?;

        Ok(Self(value))
    }
}

/// Login credentials sent either as JSON or as an OAuth2 password form
#[derive(Debug, Clone)]
pub struct LoginForm(pub LoginRequest);

#[axum::async_trait]
impl<S> FromRequest<S> for LoginForm
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let is_json = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.starts_with("application/json"))
            .unwrap_or(false);

        let request = if is_json {
            let Json(request) = Json::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|rejection: JsonRejection| ApiError::BadRequest(rejection.body_text()))?;
            request
        } else {
            let Form(request) = Form::<LoginRequest>::from_request(req, state)
                .await
                .map_err(|rejection: FormRejection| ApiError::BadRequest(rejection.body_text()))?;
            request
        };

        request
            .validate()
            .map_err(|errors| ApiError::Validation(describe_validation_errors(&errors)))?;

        Ok(Self(request))
    }
}

/// Path parameters; a parse failure is a 400 with a JSON body
#[derive(Debug, Clone)]
pub struct ApiPath<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiPath<T>
where
    T: DeserializeOwned + Send,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Path(value) = axum::extract::Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection: PathRejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string parameters; a parse failure is a 400 with a JSON body
#[derive(Debug, Clone)]
pub struct ApiQuery<T>(pub T);

#[axum::async_trait]
impl<T, S> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let axum::extract::Query(value) =
            axum::extract::Query::<T>::from_request_parts(parts, state)
                .await
                .map_err(|rejection: QueryRejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        body::{to_bytes, Body},
        http::StatusCode,
        response::IntoResponse,
        routing::post,
        Router,
    };
    use movie_review_shared::{CreateCommentQuery, SignupRequest};
    use tower::ServiceExt;

    async fn echo_signup(ValidatedJson(req): ValidatedJson<SignupRequest>) -> String {
        req.username
    }

    async fn echo_login(LoginForm(req): LoginForm) -> String {
        req.username
    }

    async fn echo_comment_target(ApiQuery(query): ApiQuery<CreateCommentQuery>) -> String {
        query.movie_id.to_string()
    }

    fn app() -> Router {
        Router::new()
            .route("/signup", post(echo_signup))
            .route("/login", post(echo_login))
            .route("/comments/", post(echo_comment_target))
    }

    async fn send(uri: &str, content_type: &str, body: &str) -> (StatusCode, String) {
        let request = axum::http::Request::builder()
            .method("POST")
            .uri(uri)
            .header(CONTENT_TYPE, content_type)
            .body(Body::from(body.to_string()))
            .unwrap();
        let response = app().oneshot(request).await.unwrap().into_response();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_valid_json_passes_through() {
        let body = r#"{"username":"neo","full_name":"Thomas Anderson","email":"neo@example.com","password":"redpill"}"#;
        let (status, text) = send("/signup", "application/json", body).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "neo");
    }

    #[tokio::test]
    async fn test_malformed_json_is_bad_request() {
        let (status, text) = send("/signup", "application/json", "{not json").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["detail"].is_string());
    }

    #[tokio::test]
    async fn test_failed_validation_names_the_field() {
        let body = r#"{"username":"neo","full_name":"Thomas Anderson","email":"not-an-email","password":"redpill"}"#;
        let (status, text) = send("/signup", "application/json", body).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["code"], "VALIDATION_ERROR");
        assert!(body["detail"].as_str().unwrap().contains("email"));
    }

    #[tokio::test]
    async fn test_login_accepts_form_body() {
        let (status, text) = send(
            "/login",
            "application/x-www-form-urlencoded",
            "username=trinity&password=zion",
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "trinity");
    }

    #[tokio::test]
    async fn test_login_accepts_json_body() {
        let (status, text) = send(
            "/login",
            "application/json",
            r#"{"username":"morpheus","password":"zion"}"#,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "morpheus");
    }

    #[tokio::test]
    async fn test_login_form_missing_password() {
        let (status, _) = send("/login", "application/x-www-form-urlencoded", "username=trinity").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_comment_query_reads_movie_id() {
        let (status, text) = send("/comments/?movie_id=42", "application/json", "{}").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(text, "42");
    }

    #[tokio::test]
    async fn test_comment_query_without_movie_id_is_bad_request() {
        let (status, text) = send("/comments/", "application/json", "{}").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let body: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(body["code"], "BAD_REQUEST");
        assert!(body["detail"].as_str().unwrap().contains("movie_id"));

        for uri in ["/comments/?movie_id=", "/comments/?movie_id=abc"] {
            let (status, _) = send(uri, "application/json", "{}").await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
    }
}
