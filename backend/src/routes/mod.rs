//! Route definitions for the Movie Review API
//!
//! This module lays out the route table and applies middleware. Routes are
//! flat: each collection path is registered with and without its trailing
//! slash.

use crate::state::AppState;
use axum::{
    http::{header, Method},
    routing::{delete, get, post},
    Router,
};
use std::time::Duration;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    limit::RequestBodyLimitLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

mod auth;
mod comments;
pub mod extract;
mod health;
mod movies;
mod ratings;


/// Largest request body accepted, in bytes
const BODY_LIMIT: usize = 1024 * 1024;

/// Create the main application router with all middleware
pub fn create_router(state: AppState) -> Router {
    let request_timeout = Duration::from_secs(state.config().server.request_timeout_secs);

    Router::new()
        .route("/", get(health::home))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
        .route("/health/live", get(health::liveness_check))
        .merge(user_routes())
        .merge(movie_routes())
        .merge(rating_routes())
        .merge(comment_routes())
        // Apply middleware layers
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(request_timeout))
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
                .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]),
        )
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/login", post(auth::login))
}

fn movie_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/movies",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/",
            get(movies::list_movies).post(movies::create_movie),
        )
        .route(
            "/movies/:id",
            get(movies::get_movie)
                .put(movies::update_movie)
                .delete(movies::delete_movie),
        )
}

fn rating_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/ratings/:id",
            post(ratings::create_rating).delete(ratings::delete_rating),
        )
        .route("/ratings/:id/rate", get(ratings::ratings_for_movie))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/comments", post(comments::create_comment))
        .route("/comments/", post(comments::create_comment))
        .route("/comments/:id", delete(comments::delete_comment))
        .route("/comments/:id/replies", post(comments::create_reply))
        .route("/comments/:id/comments", get(comments::comments_for_movie))
        .route("/comments/replies/:id", delete(comments::delete_reply))
        .route("/comments/replies/:id/", delete(comments::delete_reply))
}
