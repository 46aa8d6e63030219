//! Integration tests for signup and login

mod common;

use axum::http::StatusCode;
use movie_review_backend::repositories::UserRepository;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_success() {
    let app = common::TestApp::new().await;
    let body = common::signup_body();

    let (status, user) = app.post("/signup", body.clone()).await;

    assert_eq!(status, StatusCode::OK);
    assert!(user["id"].as_i64().unwrap() > 0);
    assert_eq!(user["username"], body["username"]);
    assert_eq!(user["email"], body["email"]);
    assert!(user.get("password").is_none());
    assert!(user.get("hashed_password").is_none());

    let stored = UserRepository::find_by_id(&app.pool, user["id"].as_i64().unwrap())
        .await
        .unwrap()
        .unwrap();
    assert!(stored.hashed_password.starts_with("$argon2"));
    assert_ne!(stored.hashed_password, body["password"].as_str().unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_duplicates_reported_in_order() {
    let app = common::TestApp::new().await;
    let first = common::signup_body();
    let (status, _) = app.post("/signup", first.clone()).await;
    assert_eq!(status, StatusCode::OK);

    // Every field clashes: the username is reported
    let (status, body) = app.post("/signup", first.clone()).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Username already registered");

    // Fresh username, same email and full name: the email is reported
    let mut second = common::signup_body();
    second["email"] = first["email"].clone();
    second["full_name"] = first["full_name"].clone();
    let (status, body) = app.post("/signup", second).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Email already registered");

    let mut third = common::signup_body();
    third["full_name"] = first["full_name"].clone();
    let (status, body) = app.post("/signup", third).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Fullname already registered");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_signup_invalid_email() {
    let app = common::TestApp::new().await;
    let mut body = common::signup_body();
    body["email"] = json!("not-an-email");

    let (status, _) = app.post("/signup", body).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_returns_bearer_token() {
    let app = common::TestApp::new().await;
    let body = common::signup_body();
    app.post("/signup", body.clone()).await;

    let (status, token) = app
        .post(
            "/login",
            json!({ "username": body["username"], "password": body["password"] }),
        )
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(token["token_type"], "bearer");
    assert_eq!(token["expires_in"], 30 * 60);

    let access_token = token["access_token"].as_str().unwrap();
    let claims = app.state.jwt().validate(access_token).unwrap();
    assert_eq!(claims.sub, body["username"].as_str().unwrap());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_with_password_form() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;

    let form = format!(
        "grant_type=password&username={}&password={}",
        user.username, user.password
    );
    let (status, token) = app.post_form("/login", &form).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!token["access_token"].as_str().unwrap().is_empty());
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_wrong_password() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;

    let (status, body) = app
        .post(
            "/login",
            json!({ "username": user.username, "password": "not-the-password" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect username or password");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_login_unknown_user() {
    let app = common::TestApp::new().await;

    let (status, body) = app
        .post(
            "/login",
            json!({ "username": format!("ghost_{}", common::unique_suffix()), "password": "x" }),
        )
        .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["detail"], "Incorrect username or password");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_token_for_deleted_user_is_rejected() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user.id)
        .execute(&app.pool)
        .await
        .unwrap();

    let (status, _) = app
        .post_auth(
            "/movies/",
            json!({ "title": "T", "genre": "G", "publisher": "P", "year_published": 2000 }),
            &user.token,
        )
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
