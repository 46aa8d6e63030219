//! Integration tests for comments and replies

mod common;

use axum::http::StatusCode;
use movie_review_backend::services::CommentService;
use serde_json::json;

#[tokio::test]
#[ignore = "requires database"]
async fn test_comment_and_reply_thread() {
    let app = common::TestApp::new().await;
    let author = app.signup_and_login().await;
    let replier = app.signup_and_login().await;
    let movie_id = app.create_movie(&author).await;

    let (status, comment) = app
        .post_auth(
            &format!("/comments/?movie_id={}", movie_id),
            json!({ "comment": "What an ending" }),
            &author.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(comment["movie"]["id"], movie_id);
    assert_eq!(comment["replies"], json!([]));
    let comment_id = comment["id"].as_i64().unwrap();

    let (status, thread) = app
        .post_auth(
            &format!("/comments/{}/replies", comment_id),
            json!({ "reply": "Agreed" }),
            &replier.token,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(thread["id"], comment_id);
    assert_eq!(thread["replies"][0]["reply"], "Agreed");
    assert_eq!(thread["replies"][0]["user_id"], replier.id);

    let (status, listing) = app.get(&format!("/comments/{}/comments", movie_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["id"], movie_id);
    assert_eq!(listing["comments"].as_array().unwrap().len(), 1);
    assert_eq!(listing["comments"][0]["replies"].as_array().unwrap().len(), 1);

    let (_, movie) = app.get(&format!("/movies/{}", movie_id)).await;
    assert_eq!(movie["comments"][0]["replies"][0]["reply"], "Agreed");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_comments_of_uncommented_movie_is_empty() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;
    let movie_id = app.create_movie(&user).await;

    let (status, listing) = app.get(&format!("/comments/{}/comments", movie_id)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listing["comments"], json!([]));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_comment_requires_existing_movie() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;

    let (status, _) = app
        .post_auth(
            "/comments/?movie_id=987654321",
            json!({ "comment": "Hello" }),
            &user.token,
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // No movie_id is a client error; nothing falls back to a default movie
    let (status, body) = app
        .post_auth("/comments/", json!({ "comment": "Hello" }), &user.token)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].as_str().unwrap().contains("movie_id"));
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_reply_to_missing_comment() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;

    let (status, body) = app
        .post_auth("/comments/987654321/replies", json!({ "reply": "Hi" }), &user.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "Comment not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_deleting_comment_removes_replies() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;
    let movie_id = app.create_movie(&user).await;

    let (_, comment) = app
        .post_auth(
            &format!("/comments/?movie_id={}", movie_id),
            json!({ "comment": "First" }),
            &user.token,
        )
        .await;
    let comment_id = comment["id"].as_i64().unwrap();
    app.post_auth(
        &format!("/comments/{}/replies", comment_id),
        json!({ "reply": "Second" }),
        &user.token,
    )
    .await;

    let (status, _) = app
        .delete_auth(&format!("/comments/{}", comment_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);

    let replies: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM replies WHERE comment_id = $1")
        .bind(comment_id)
        .fetch_one(&app.pool)
        .await
        .unwrap();
    assert_eq!(replies, 0);
    assert!(CommentService::get_comment(&app.pool, comment_id)
        .await
        .unwrap()
        .is_none());

    let (status, body) = app
        .delete_auth(&format!("/comments/{}", comment_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "comment not found");
}

#[tokio::test]
#[ignore = "requires database"]
async fn test_delete_reply() {
    let app = common::TestApp::new().await;
    let user = app.signup_and_login().await;
    let movie_id = app.create_movie(&user).await;

    let (_, comment) = app
        .post_auth(
            &format!("/comments/?movie_id={}", movie_id),
            json!({ "comment": "Root" }),
            &user.token,
        )
        .await;
    let (_, thread) = app
        .post_auth(
            &format!("/comments/{}/replies", comment["id"]),
            json!({ "reply": "Leaf" }),
            &user.token,
        )
        .await;
    let reply_id = thread["replies"][0]["id"].as_i64().unwrap();

    let reply = CommentService::get_reply(&app.pool, reply_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(reply.comment_id, comment["id"].as_i64());

    let (status, body) = app
        .delete_auth(&format!("/comments/replies/{}/", reply_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "reply deleted successfully");

    let (status, body) = app
        .delete_auth(&format!("/comments/replies/{}/", reply_id), &user.token)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], "reply not found");
}
