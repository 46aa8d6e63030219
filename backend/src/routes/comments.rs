//! Comment and reply routes

use super::extract::{ApiPath, ApiQuery, ValidatedJson};
use crate::auth::CurrentUser;
use crate::error::ApiResult;
use crate::services::CommentService;
use crate::state::AppState;
use axum::{extract::State, Json};
use movie_review_shared::{
    CommentResponse, CreateCommentQuery, CreateCommentRequest, CreateReplyRequest,
    MessageResponse, MovieCommentsResponse,
};

/// Comment on a movie
///
/// POST /comments/?movie_id=:id
pub async fn create_comment(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiQuery(query): ApiQuery<CreateCommentQuery>,
    ValidatedJson(req): ValidatedJson<CreateCommentRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment =
        CommentService::create_comment(state.db(), query.movie_id, user.id, &req.comment).await?;
    Ok(Json(comment))
}

/// Reply to a comment
///
/// POST /comments/:id/replies
pub async fn create_reply(
    State(state): State<AppState>,
    user: CurrentUser,
    ApiPath(comment_id): ApiPath<i64>,
    ValidatedJson(req): ValidatedJson<CreateReplyRequest>,
) -> ApiResult<Json<CommentResponse>> {
    let comment = CommentService::create_reply(state.db(), comment_id, user.id, &req.reply).await?;
    Ok(Json(comment))
}

/// GET /comments/:id/comments
pub async fn comments_for_movie(
    State(state): State<AppState>,
    ApiPath(movie_id): ApiPath<i64>,
) -> ApiResult<Json<MovieCommentsResponse>> {
    let comments = CommentService::comments_for_movie(state.db(), movie_id).await?;
    Ok(Json(comments))
}

/// DELETE /comments/:id
pub async fn delete_comment(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = CommentService::delete_comment(state.db(), id).await?;
    Ok(Json(message))
}

/// DELETE /comments/replies/:id/
pub async fn delete_reply(
    State(state): State<AppState>,
    _user: CurrentUser,
    ApiPath(id): ApiPath<i64>,
) -> ApiResult<Json<MessageResponse>> {
    let message = CommentService::delete_reply(state.db(), id).await?;
    Ok(Json(message))
}
